//! Abstract syntax tree datastructures.
//! In here are all datastructures needed for creating the AST in the parser.
//!
//! The tree is strict: every `BinaryOp` exclusively owns both of its children. Passes
//! never mutate a tree in place, they build a new one.

use std::fmt;

/// The four binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    /// Integer known at compile time.
    Immediate(i64),
    /// Positional index into the parameter list of the program.
    Argument(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Basic nodes of which the AST consists.
///     - Leaves are either immediates or argument references
///     - BinaryOp applies an operator to a left and right operand
pub enum AstNode {
    Leaf(Leaf),
    BinaryOp(Operator, Box<AstNode>, Box<AstNode>),
}

impl AstNode {
    pub fn immediate(n: i64) -> Self {
        AstNode::Leaf(Leaf::Immediate(n))
    }

    pub fn argument(idx: usize) -> Self {
        AstNode::Leaf(Leaf::Argument(idx))
    }

    /// Apply an operator to two operands.
    pub fn binary(op: Operator, lhs: AstNode, rhs: AstNode) -> Self {
        AstNode::BinaryOp(op, Box::new(lhs), Box::new(rhs))
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            AstNode::Leaf(_) => 1,
            AstNode::BinaryOp(_, lhs, rhs) => 1 + lhs.size() + rhs.size(),
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AstNode::Leaf(Leaf::Immediate(n)) => write!(f, "Imm:{}", n),
            AstNode::Leaf(Leaf::Argument(i)) => write!(f, "Arg:{}", i),
            AstNode::BinaryOp(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}
