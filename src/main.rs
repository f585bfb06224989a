use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use env_logger::Builder;
use log::{debug, info};

use monkey::ast_printer::AstPrinter;
use monkey::parser::{Parser, ParserOptions};
use monkey::repl::{self, Mode};
use monkey::tokenizer::Tokenizer;

#[derive(ClapParser, Debug)]
#[command(version, about = "Monkey language front end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to monkey.log
    #[arg(long, global = true)]
    log: bool,

    /// Trace parser entry/exit (written to the log)
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts the interactive prompt (default)
    Repl {
        /// Parse each line instead of listing its tokens
        #[arg(long)]
        parse: bool,
    },

    /// Tokenizes input from a file, printing each token
    Tokenize { filename: PathBuf },

    /// Parses input from a file and prints the program
    Parse {
        filename: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Fully parenthesised source form
    Text,
    /// Prefix S-expressions, one statement per line
    Sexpr,
    /// The syntax tree as JSON
    Json,
}

fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let source = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", source.len(), filename);

    Ok(source)
}

fn init_logger(args: &Cli) -> Result<()> {
    let level = if args.trace {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Debug
    };

    if !args.log {
        // Without --log only parser traces are shown, on stderr.
        let level = if args.trace {
            level
        } else {
            log::LevelFilter::Off
        };

        Builder::new().filter_level(level).init();

        return Ok(());
    }

    let log_file = File::create("monkey.log").context("Failed to create monkey.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'monkey::' from module path
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("monkey::").unwrap_or(module);

            writeln!(
                buf,
                "{} [{}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, level) // RUST_LOG is ignored, the flags decide
        .init();

    info!("Logger initialized, writing to monkey.log");

    Ok(())
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| String::from("friend"))
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    init_logger(&args)?;

    info!("CLI arguments: {:?}", args);

    let options = ParserOptions { trace: args.trace };

    match args.commands {
        None | Some(Commands::Repl { parse: false }) => run_repl(Mode::Tokens, options)?,

        Some(Commands::Repl { parse: true }) => run_repl(Mode::Parse, options)?,

        Some(Commands::Tokenize { filename }) => {
            info!("Running Tokenize subcommand");

            let source = read_file(&filename)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();

            for token in Tokenizer::new(&source) {
                writeln!(out, "{}", token)?;
            }

            info!("Tokenization completed");
        }

        Some(Commands::Parse { filename, format }) => {
            info!("Running Parse subcommand");

            let source = read_file(&filename)?;
            let mut parser = Parser::with_options(Tokenizer::new(&source), options);
            let program = parser.parse_program();

            if !parser.errors().is_empty() {
                for err in parser.errors() {
                    debug!("Parse debug: {}", err);
                    eprintln!("{}", err);
                }

                debug!("Parsing failed, exiting with code 65");
                std::process::exit(65);
            }

            match format {
                OutputFormat::Text => println!("{}", program),
                OutputFormat::Sexpr => println!("{}", AstPrinter::print_program(&program)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&program).context("Failed to serialize AST")?
                ),
            }

            info!("Parse subcommand completed");
        }
    }

    Ok(())
}

fn run_repl(mode: Mode, options: ParserOptions) -> Result<()> {
    println!("Hello {}! Welcome to Monkey-Lang!", current_user());

    let stdin = io::stdin();
    repl::start(stdin.lock(), io::stdout(), mode, options).context("REPL I/O failure")
}
