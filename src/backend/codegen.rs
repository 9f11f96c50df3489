//! Lowering of an AST into instructions for the two register stack machine.
//!
//! The code emitted for every subtree computes its value and leaves it as the single new
//! item on top of the stack. It neither touches deeper stack items nor relies on any
//! register contents. A binary operation therefore runs
//!
//! ```text
//! <lhs> <rhs> PO SW PO <op> PU
//! ```
//!
//! After the rhs is popped into primary and swapped into secondary, the lhs is popped into
//! primary and `primary <op> secondary` is exactly `lhs <op> rhs`. The driver pops the
//! final value back into primary. Every `PU` directly followed by a `PO` is a no-op, the
//! peephole pass removes those pairs.

use tracing::trace;

use super::instruction::Instruction;
use crate::frontend::ast::{AstNode, Leaf};

pub struct CodeGenerator {
    /// Elide adjacent `PU PO` pairs.
    peephole: bool,
    code: Vec<Instruction>,
}

impl CodeGenerator {
    pub fn new(peephole: bool) -> Self {
        Self {
            peephole,
            code: Vec::new(),
        }
    }

    /// Generate the instructions for a whole program. The result is left in the primary
    /// register and the stack is as deep as before.
    pub fn generate(mut self, ast: &AstNode) -> Vec<Instruction> {
        self.emit_node(ast);
        self.code.push(Instruction::Pop);
        if self.peephole {
            let before = self.code.len();
            self.code = peephole(self.code);
            trace!(removed = before - self.code.len(), "peephole pass");
        }
        self.code
    }

    fn emit_node(&mut self, node: &AstNode) {
        match node {
            AstNode::Leaf(leaf) => {
                self.code.push(load(leaf));
                self.code.push(Instruction::Push);
            }
            AstNode::BinaryOp(op, lhs, rhs) => {
                self.emit_node(lhs);
                self.emit_node(rhs);
                self.code.extend_from_slice(&[
                    Instruction::Pop,
                    Instruction::Swap,
                    Instruction::Pop,
                    Instruction::from_operator(*op),
                    Instruction::Push,
                ]);
            }
        }
    }
}

fn load(leaf: &Leaf) -> Instruction {
    match *leaf {
        Leaf::Immediate(n) => Instruction::LoadImmediate(n),
        Leaf::Argument(i) => Instruction::LoadArgument(i),
    }
}

/// Remove every `PU` that is immediately followed by a `PO`. Removing a pair can make
/// another pair adjacent, which is removed as well.
pub fn peephole(code: Vec<Instruction>) -> Vec<Instruction> {
    let mut out: Vec<Instruction> = Vec::with_capacity(code.len());
    for instr in code {
        if instr == Instruction::Pop && out.last() == Some(&Instruction::Push) {
            out.pop();
        } else {
            out.push(instr);
        }
    }
    out
}

/// Generate code for `ast` with the peephole pass enabled.
pub fn generate(ast: &AstNode) -> Vec<Instruction> {
    CodeGenerator::new(true).generate(ast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::Operator;
    use Instruction::*;

    /// Minimal model of the target machine, only used to check generated code.
    fn run(code: &[Instruction], args: &[i64]) -> (i64, usize) {
        let (mut primary, mut secondary) = (0i64, 0i64);
        let mut stack = Vec::new();
        for instr in code {
            match *instr {
                LoadImmediate(n) => primary = n,
                LoadArgument(i) => primary = args[i],
                Swap => std::mem::swap(&mut primary, &mut secondary),
                Push => stack.push(primary),
                Pop => primary = stack.pop().expect("pop from empty stack"),
                Add => primary += secondary,
                Subtract => primary -= secondary,
                Multiply => primary *= secondary,
                Divide => primary /= secondary,
            }
        }
        (primary, stack.len())
    }

    fn sub(lhs: AstNode, rhs: AstNode) -> AstNode {
        AstNode::binary(Operator::Subtract, lhs, rhs)
    }

    #[test]
    fn test_leaf_is_single_instruction() {
        assert_eq!(generate(&AstNode::immediate(7)), vec![LoadImmediate(7)]);
        assert_eq!(generate(&AstNode::argument(3)), vec![LoadArgument(3)]);
    }

    #[test]
    fn test_unoptimized_shape() {
        let code =
            CodeGenerator::new(false).generate(&sub(AstNode::argument(0), AstNode::immediate(1)));
        assert_eq!(
            code,
            vec![
                LoadArgument(0),
                Push,
                LoadImmediate(1),
                Push,
                Pop,
                Swap,
                Pop,
                Subtract,
                Push,
                Pop
            ]
        );
        assert_eq!(run(&code, &[10]), (9, 0));
    }

    #[test]
    fn test_binary_op() {
        let code = generate(&sub(AstNode::argument(0), AstNode::argument(1)));
        assert_eq!(code, vec![LoadArgument(0), Push, LoadArgument(1), Swap, Pop, Subtract]);
        assert_eq!(run(&code, &[5, 8]), (-3, 0));
    }

    #[test]
    fn test_right_nested() {
        // a - (b - c)
        let ast = sub(
            AstNode::argument(0),
            sub(AstNode::argument(1), AstNode::argument(2)),
        );
        let code = generate(&ast);
        assert_eq!(
            code,
            vec![
                LoadArgument(0),
                Push,
                LoadArgument(1),
                Push,
                LoadArgument(2),
                Swap,
                Pop,
                Subtract,
                Swap,
                Pop,
                Subtract
            ]
        );
        assert_eq!(run(&code, &[10, 4, 1]), (7, 0));
    }

    #[test]
    fn test_peephole_preserves_result() {
        let ast = AstNode::binary(
            Operator::Divide,
            AstNode::binary(Operator::Multiply, AstNode::argument(0), AstNode::immediate(6)),
            sub(
                AstNode::immediate(5),
                AstNode::binary(Operator::Add, AstNode::argument(1), AstNode::argument(0)),
            ),
        );
        let plain = CodeGenerator::new(false).generate(&ast);
        let optimized = CodeGenerator::new(true).generate(&ast);
        assert!(optimized.len() < plain.len());
        for args in &[[1, 1], [7, -3], [-4, 2], [0, 9]] {
            assert_eq!(run(&plain, args), run(&optimized, args));
            assert_eq!(run(&optimized, args).1, 0);
        }
        assert_eq!(run(&optimized, &[7, -3]), (42, 0));
    }

    #[test]
    fn test_peephole_cascades() {
        assert!(peephole(vec![Push, Push, Pop, Pop]).is_empty());
        assert_eq!(peephole(vec![Pop, Push]), vec![Pop, Push]);
        assert_eq!(
            peephole(vec![LoadImmediate(1), Push, Swap, Pop]),
            vec![LoadImmediate(1), Push, Swap, Pop]
        );
    }
}
