use snafu::Snafu;

use crate::frontend::position::Position;

pub type CompilerResult<T> = Result<T, CompilerError>;

/// Every failure the pipeline can report. All of them are fatal: a stage either
/// returns a complete result or stops at the first error.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum CompilerError {
    #[snafu(display("Lexical error at {pos}: unexpected character '{found}'."))]
    LexicalError { pos: Position, found: char },
    #[snafu(display("Syntax error: {msg}"))]
    SyntaxError { msg: String },
    #[snafu(display("Unknown parameter '{name}'."))]
    UnknownParameter { name: String },
    #[snafu(display("Arithmetic error: {msg}"))]
    ArithmeticError { msg: String },
    #[snafu(display("Invalid instruction '{line}': {msg}"))]
    InvalidMnemonic { line: String, msg: String },
}

impl CompilerError {
    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        CompilerError::SyntaxError { msg: msg.into() }
    }

    pub(crate) fn arithmetic(msg: impl Into<String>) -> Self {
        CompilerError::ArithmeticError { msg: msg.into() }
    }
}
