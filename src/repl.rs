//! Line‑oriented interactive loop.
//!
//! Each line read from `input` is handled in isolation with a fresh
//! tokenizer (and parser, in [`Mode::Parse`]); nothing carries over between
//! lines.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::parser::{Parser, ParserOptions};
use crate::token::TokenKind;
use crate::tokenizer::Tokenizer;

/// Written before every line is read.
pub const PROMPT: &str = "Monkey DO >> ";

/// What the loop does with each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Print every token of the line, one per line.
    #[default]
    Tokens,

    /// Parse the line and print the reconstructed program or the errors.
    Parse,
}

/// Run the loop until `input` is exhausted.
pub fn start<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    mode: Mode,
    options: ParserOptions,
) -> io::Result<()> {
    info!("REPL started in {:?} mode", mode);

    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            info!("End of input, leaving REPL");

            return Ok(());
        };

        let line = line?;
        debug!("REPL line: {:?}", line);

        match mode {
            Mode::Tokens => print_tokens(&line, &mut output)?,
            Mode::Parse => print_program(&line, &mut output, options)?,
        }
    }
}

fn print_tokens<W: Write>(line: &str, output: &mut W) -> io::Result<()> {
    for token in Tokenizer::new(line).take_while(|t| t.kind != TokenKind::EOF) {
        writeln!(output, "{}", token)?;
    }

    Ok(())
}

fn print_program<W: Write>(line: &str, output: &mut W, options: ParserOptions) -> io::Result<()> {
    let mut parser = Parser::with_options(Tokenizer::new(line), options);
    let program = parser.parse_program();

    if parser.errors().is_empty() {
        return writeln!(output, "{}", program);
    }

    writeln!(output, "parser errors:")?;

    for err in parser.errors() {
        writeln!(output, "\t{}", err)?;
    }

    Ok(())
}
