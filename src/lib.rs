pub mod ast;
pub mod ast_printer;
pub mod error;
pub mod parser;
pub mod repl;
pub mod token;
pub mod tokenizer;
