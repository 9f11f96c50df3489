//! Constant folding.
//!
//! Every subtree whose operands are all immediates is collapsed into a single immediate
//! leaf. Argument references are unknown until the program runs and are left alone.

use crate::{
    error::CompilerError,
    frontend::ast::{AstNode, Leaf, Operator},
};

type OptimizerResult = Result<AstNode, CompilerError>;

/// Fold all compile time computable subtrees of `ast` in a single bottom-up pass.
pub fn fold(ast: &AstNode) -> OptimizerResult {
    match ast {
        AstNode::Leaf(_) => Ok(ast.clone()),
        AstNode::BinaryOp(op, lhs, rhs) => {
            let lhs = fold(lhs)?;
            let rhs = fold(rhs)?;
            match (&lhs, &rhs) {
                (AstNode::Leaf(Leaf::Immediate(a)), AstNode::Leaf(Leaf::Immediate(b))) => {
                    Ok(AstNode::immediate(evaluate(*op, *a, *b)?))
                }
                _ => Ok(AstNode::binary(*op, lhs, rhs)),
            }
        }
    }
}

/// Apply `op` to two integers the way the target machine would. Division truncates
/// toward zero.
fn evaluate(op: Operator, a: i64, b: i64) -> Result<i64, CompilerError> {
    let result = match op {
        Operator::Add => a.checked_add(b),
        Operator::Subtract => a.checked_sub(b),
        Operator::Multiply => a.checked_mul(b),
        Operator::Divide if b == 0 => {
            return Err(CompilerError::arithmetic(format!(
                "Division by zero in '{} / {}'.",
                a, b
            )))
        }
        Operator::Divide => a.checked_div(b),
    };
    result.ok_or_else(|| CompilerError::arithmetic(format!("Overflow in '{} {} {}'.", a, op, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{lexer::Lexer, parser::Parser};

    fn parse(input: &str) -> AstNode {
        Parser::new(Lexer::new(input).tokenize().unwrap())
            .parse()
            .unwrap()
    }

    fn fold_str(input: &str) -> String {
        fold(&parse(input)).unwrap().to_string()
    }

    #[test]
    fn test_fold_constants() {
        assert_eq!(fold(&parse("[ ] 2 * (3 + 4)")).unwrap(), AstNode::immediate(14));
        assert_eq!(fold_str("[ ] 10 - 2 - 3"), "Imm:5");
        assert_eq!(fold_str("[ ] 7 / 2"), "Imm:3");
        assert_eq!(fold_str("[ ] (0 - 7) / 2"), "Imm:-3");
        assert_eq!(fold_str("[ ] 1"), "Imm:1");
    }

    #[test]
    fn test_fold_keeps_arguments() {
        assert_eq!(fold_str("[ x ] x"), "Arg:0");
        assert_eq!(fold_str("[ x ] x + 2 * 3"), "(Arg:0 + Imm:6)");
        assert_eq!(fold_str("[ x ] (1 + 1) * x - 4 / 2"), "((Imm:2 * Arg:0) - Imm:2)");
        // Left associativity keeps `x + 1` as its own subtree, so nothing folds here.
        assert_eq!(fold_str("[ x ] x + 1 + 2"), "((Arg:0 + Imm:1) + Imm:2)");
    }

    #[test]
    fn test_fold_idempotent() {
        for src in &[
            "[ ] 1 + 2 * 3",
            "[ x ] x",
            "[ x y ] (x + 3 * 4) / (y - (2 - 2 * 1))",
            "[ a b ] a * b - (6 / 3) * (a + (1 - 1))",
        ] {
            let once = fold(&parse(src)).unwrap();
            assert_eq!(fold(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_fold_errors() {
        assert!(matches!(
            fold(&parse("[ ] 1 / (2 - 2)")),
            Err(CompilerError::ArithmeticError { .. })
        ));
        assert!(matches!(
            fold(&parse("[ ] 9223372036854775807 + 1")),
            Err(CompilerError::ArithmeticError { .. })
        ));
        // Division by an argument is left to the machine.
        assert_eq!(fold_str("[ x ] 1 / x"), "(Imm:1 / Arg:0)");
    }
}
