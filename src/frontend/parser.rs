//! Recursive descent parser implementation.
//!
//! Grammar:
//! ```text
//! program    := '[' param_list ']' expr EOF
//! param_list := (identifier ','?)*
//! expr       := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := number | identifier | '(' expr ')'
//! ```
//! Both binary levels are left-associative, `a - b - c` parses as `(a - b) - c`.

use std::collections::{hash_map::HashMap, VecDeque};

use super::{
    ast::{AstNode, Operator},
    token::Token,
};
use crate::{error::CompilerError, T};

/// Ordered mapping of parameter names to their positional index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParameterTable {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. The index is its position in declaration order.
    pub fn declare(&mut self, name: &str) -> Result<usize, CompilerError> {
        if self.indices.contains_key(name) {
            return Err(CompilerError::syntax(format!(
                "Parameter '{}' is declared more than once.",
                name
            )));
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.indices.insert(name.to_string(), idx);
        Ok(idx)
    }

    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// The `Parser` struct is repsonsible for parsing a queue of tokens to the AST
/// representation.
pub struct Parser {
    tokens: VecDeque<Token>,
    params: ParameterTable,
}

/// Represents the result of most parser functions where either an AstNode is returned or
/// a parse error occured and Err is returned.
type ParserResult = Result<AstNode, CompilerError>;

impl Parser {
    pub fn new(tokens: VecDeque<Token>) -> Self {
        Self {
            tokens,
            params: ParameterTable::new(),
        }
    }

    /// Parameters declared by the program parsed so far.
    pub fn params(&self) -> &ParameterTable {
        &self.params
    }

    //-------
    // HELPER
    //-------

    /// Peeks at the token at front of the queue.
    fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// True if next token is of expected type.
    fn expect_type(&self, t: &Token) -> bool {
        self.peek() == Some(t)
    }

    /// Pops the first token of the queue.
    fn next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Tries consuming the next token. If it matches the expected token it is returned,
    /// otherwise a syntax error is.
    fn consume(&mut self, expected: &Token) -> Result<Token, CompilerError> {
        match self.next() {
            Some(token) if &token == expected => Ok(token),
            Some(token) => Err(CompilerError::syntax(format!(
                "Expected {} but found {}.",
                expected, token
            ))),
            None => Err(CompilerError::syntax(format!(
                "Expected {} but there was none.",
                expected
            ))),
        }
    }

    /// Create a syntax error for an unexpected token or the end of input.
    fn unexpected(&self, found: Option<Token>, err: &str) -> CompilerError {
        match found {
            Some(token) => CompilerError::syntax(format!("{} Found {} instead.", err, token)),
            None => CompilerError::syntax(format!("{} Found end of input instead.", err)),
        }
    }

    //--------
    // PARSING
    //--------

    /// Parse a whole program.
    /// Corresponds to the <program> non-terminal in the grammar rules.
    pub fn parse(&mut self) -> ParserResult {
        self.parse_params()?;
        if self.peek().is_none() {
            return Err(CompilerError::syntax("Expected expression after ']'."));
        }
        let expr = self.parse_expr()?;
        match self.next() {
            None => Ok(expr),
            Some(T![')']) => Err(CompilerError::syntax("Unbalanced parentheses: unexpected ')'.")),
            found => Err(self.unexpected(found, "Expected end of input.")),
        }
    }

    /// Parse the bracketed parameter list into the parameter table.
    fn parse_params(&mut self) -> Result<(), CompilerError> {
        self.consume(&T!['['])?;
        loop {
            match self.next() {
                Some(T![']']) => return Ok(()),
                Some(Token::Identifier(name)) => {
                    self.params.declare(&name)?;
                    if self.expect_type(&T![,]) {
                        self.next();
                    }
                }
                found => {
                    return Err(self.unexpected(found, "Expected parameter name or ']'."));
                }
            }
        }
    }

    /// Operands of equal precedence are folded into the left operand while looping, so
    /// long chains neither recurse nor associate to the right.
    pub fn parse_expr(&mut self) -> ParserResult {
        let mut lhs = self.parse_term()?;
        while let Some(T![+]) | Some(T![-]) = self.peek() {
            let op = self.parse_operator()?;
            let term = self.parse_term()?;
            lhs = AstNode::binary(op, lhs, term);
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> ParserResult {
        let mut lhs = self.parse_factor()?;
        while let Some(T![*]) | Some(T![/]) = self.peek() {
            let op = self.parse_operator()?;
            let factor = self.parse_factor()?;
            lhs = AstNode::binary(op, lhs, factor);
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> ParserResult {
        match self.next() {
            Some(Token::Number(lit)) => self.parse_number(&lit),
            Some(Token::Identifier(name)) => match self.params.resolve(&name) {
                Some(idx) => Ok(AstNode::argument(idx)),
                None => Err(CompilerError::UnknownParameter { name }),
            },
            Some(T!['(']) => {
                let expr = self.parse_expr()?;
                match self.next() {
                    Some(T![')']) => Ok(expr),
                    None => Err(CompilerError::syntax("Unbalanced parentheses: missing ')'.")),
                    found => Err(self.unexpected(found, "Expected ')'.")),
                }
            }
            found => Err(self.unexpected(
                found,
                "Expected number, parameter or parenthesized expression.",
            )),
        }
    }

    fn parse_number(&self, lit: &str) -> ParserResult {
        lit.parse::<i64>().map(AstNode::immediate).map_err(|_| {
            CompilerError::syntax(format!("'{}' is not a valid integer literal.", lit))
        })
    }

    fn parse_operator(&mut self) -> Result<Operator, CompilerError> {
        match self.next() {
            Some(Token::Operator(op)) => Ok(op),
            found => Err(self.unexpected(found, "Expected operator (+, -, *, /).")),
        }
    }
}

/// Parse a token queue into an AST.
pub fn parse(tokens: VecDeque<Token>) -> ParserResult {
    Parser::new(tokens).parse()
}
