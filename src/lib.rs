pub mod diagnostic;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runner;
pub mod token;
