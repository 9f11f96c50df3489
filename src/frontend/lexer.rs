//! The lexer struct is responsible for tokenizing the source code so that it can be used by the parser to create the AST.
//!
//! The lexer recognizes the brackets of the parameter list, parentheses, the four arithmetic
//! operators, `,` and `=`, identifiers (`[A-Za-z_][A-Za-z0-9_]*`) and numeric literals
//! (`[0-9]*\.?[0-9]+`). Whitespace is skipped. Any other character is rejected.
//!
//! Example:
//! ```rust
//! use tpc::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("[ x ] x + 2").tokenize();
//! ```
//! `tokenize` either returns an error or all tokens in source order.

use std::{collections::VecDeque, iter::Peekable, str::Chars};

use super::{position::Position, token::Token};
use crate::error::CompilerError::{self, LexicalError};

/// The lexer struct is responsible for the tokeniziation of the source code.
pub struct Lexer<'a> {
    /// Contains the source code. Used for 'cutting' out lexemes for the tokens.
    source: &'a str,
    /// Peekable iterator over all characters of the source string.
    chars: Peekable<Chars<'a>>,
    tokens: VecDeque<Token>,
    /// Position of the last consumed character. Only used for error reporting.
    pos: Position,
    /// The current absolute starting byte offset of a token.
    start_idx: usize,
    /// The current absolute byte offset in the source code.
    current_idx: usize,
}

type LexerResult = Result<Option<Token>, CompilerError>;

/// Tokenize a whole source string.
pub fn tokenize(source: &str) -> Result<VecDeque<Token>, CompilerError> {
    Lexer::new(source).tokenize()
}

impl<'a> Lexer<'a> {
    /// Create a new instance of `Lexer`
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            tokens: VecDeque::new(),
            pos: Position::new(1, 0),
            start_idx: 0,
            current_idx: 0,
        }
    }

    /// Tokenize the source string into a queue of tokens.
    pub fn tokenize(mut self) -> Result<VecDeque<Token>, CompilerError> {
        while !self.is_at_end() {
            self.start_idx = self.current_idx;
            if let Some(token) = self.next_token()? {
                self.tokens.push_back(token);
            }
        }
        Ok(self.tokens)
    }

    /// Return the next token or `None` for skipped whitespace.
    fn next_token(&mut self) -> LexerResult {
        match self.advance() {
            Some('\n') => {
                self.pos.next_line();
                Ok(None)
            }
            Some(c) if c.is_whitespace() => Ok(None),
            Some(c) if c.is_ascii_digit() => self.number(),
            Some('.') if self.chars.peek().map_or(false, |c| c.is_ascii_digit()) => self.number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
            Some(c) => match Token::get_symbol(self.get_substr_from_current_range()) {
                Some(token) => Ok(Some(token)),
                None => Err(LexicalError {
                    pos: self.pos,
                    found: c,
                }),
            },
            None => Ok(None),
        }
    }

    //-------
    // HELPER
    //-------

    /// Extracts a substring from the source string starting at `start_idx` and ending at `current_idx`.
    fn get_substr_from_current_range(&self) -> &'a str {
        &self.source[self.start_idx..self.current_idx]
    }

    /// Consume the current iterator and return the char it pointed at.
    /// If the iterator reached the end `None` will be returned.
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos.next_column();
        self.current_idx += c.len_utf8();
        Some(c)
    }

    /// Consumes characters while a given predicate is fullfilled.
    fn advance_while(&mut self, predicate: &dyn Fn(&char) -> bool) {
        while let Some(c) = self.chars.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    /// Look one character past the next one.
    fn peek_second(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    /// Check if the char iterator has reached the end.
    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    //---------
    // Literals
    //---------

    /// Tokenize a number literal. The first character (a digit or a `.` followed by a
    /// digit) has already been consumed.
    fn number(&mut self) -> LexerResult {
        let seen_dot = self.get_substr_from_current_range() == ".";
        self.advance_while(&|c| c.is_ascii_digit());
        if !seen_dot
            && self.chars.peek() == Some(&'.')
            && self.peek_second().map_or(false, |c| c.is_ascii_digit())
        {
            self.advance();
            self.advance_while(&|c| c.is_ascii_digit());
        }
        Ok(Some(Token::Number(
            self.get_substr_from_current_range().to_string(),
        )))
    }

    /// Tokenize an identifier.
    fn identifier(&mut self) -> LexerResult {
        self.advance_while(&|c| c.is_ascii_alphanumeric() || *c == '_');
        Ok(Some(Token::Identifier(
            self.get_substr_from_current_range().to_string(),
        )))
    }
}
