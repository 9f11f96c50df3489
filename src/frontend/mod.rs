//! The frontend module contains everything that is concerned with tokenizing and parsing the input string.
//!
//! # Lexer
//! Firstly the lexer is responsible for converting the input string into a queue of tokens which
//! are defined in the token module.
//! ### Example
//! ```rust
//! use tpc::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("[ a, b ] a * (b + 2)").tokenize();
//! ```
//! `tokenize` either returns an error or a queue containing all tokens.
//!
//! # Parser
//! The parser module is responsible for consuming the token stream and turning it into an
//! AST (abstract syntax tree). While doing so the parameter names of the program are
//! replaced by their positional index.
//! ### Example
//! ```rust
//! use tpc::frontend::{lexer::Lexer, parser::Parser};
//! let tokens_or_err = Lexer::new("[ a, b ] a * (b + 2)").tokenize();
//! let ast_or_err = Parser::new(tokens_or_err.unwrap()).parse();
//! ```
//! Again, the parser returns either an error informing the user of a syntax error or an
//! unknown parameter, or the parse result which is a `frontend::ast::AstNode`.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod token;
