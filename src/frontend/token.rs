use phf::phf_map;
use std::fmt;

use super::ast::Operator;

/// Tokens produced by the lexer. They carry no position since nothing downstream of
/// the lexer reports one.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Comma,
    Equal,
    Operator(Operator),
    Identifier(String),
    /// The literal text as written, e.g. `42` or `.5`. Conversion to an integer is
    /// left to the parser.
    Number(String),
}

impl Token {
    /// Look up a single character token like `(` or `*`.
    pub fn get_symbol(key: &str) -> Option<Token> {
        SYMBOLS.get(key).cloned()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "<Operator: {}>", op),
            Token::Identifier(name) => write!(f, "<Identifier: {}>", name),
            Token::Number(lit) => write!(f, "<Number: {}>", lit),
            _ => write!(f, "<{:?}>", self),
        }
    }
}

static SYMBOLS: phf::Map<&'static str, Token> = phf_map! {
    "[" => Token::OpenBracket,
    "]" => Token::CloseBracket,
    "(" => Token::OpenParen,
    ")" => Token::CloseParen,
    "," => Token::Comma,
    "=" => Token::Equal,
    "+" => Token::Operator(Operator::Add),
    "-" => Token::Operator(Operator::Subtract),
    "*" => Token::Operator(Operator::Multiply),
    "/" => Token::Operator(Operator::Divide),
};

/// Shorthand for the punctuation and operator tokens.
#[macro_export]
macro_rules! T {
    ['['] => { $crate::frontend::token::Token::OpenBracket };
    [']'] => { $crate::frontend::token::Token::CloseBracket };
    ['('] => { $crate::frontend::token::Token::OpenParen };
    [')'] => { $crate::frontend::token::Token::CloseParen };
    [,] => { $crate::frontend::token::Token::Comma };
    [=] => { $crate::frontend::token::Token::Equal };
    [+] => { $crate::frontend::token::Token::Operator($crate::frontend::ast::Operator::Add) };
    [-] => { $crate::frontend::token::Token::Operator($crate::frontend::ast::Operator::Subtract) };
    [*] => { $crate::frontend::token::Token::Operator($crate::frontend::ast::Operator::Multiply) };
    [/] => { $crate::frontend::token::Token::Operator($crate::frontend::ast::Operator::Divide) };
}
