//! A three pass compiler for a tiny arithmetic language.
//!
//! A program declares its parameters in brackets followed by an expression over those
//! parameters, integer literals, `+ - * /` and parentheses:
//!
//! ```rust
//! let code = tpc::compile("[ x, y ] x + y").unwrap();
//! let listing: Vec<String> = code.iter().map(|i| i.to_string()).collect();
//! assert_eq!(listing, ["AR 0", "PU", "AR 1", "SW", "PO", "AD"]);
//! ```

pub mod backend;
pub mod error;
pub mod frontend;

use tracing::{debug, info_span};

use backend::{codegen::CodeGenerator, instruction::Instruction, optimizer};
use error::CompilerResult;
use frontend::{ast::AstNode, lexer, parser::Parser};

/// Lex and parse a program into an AST.
pub fn compile_to_ast(source: &str) -> CompilerResult<AstNode> {
    let tokens = {
        let _span = info_span!("pipeline.lex").entered();
        let tokens = lexer::tokenize(source)?;
        debug!(tokens = tokens.len(), "tokenized source");
        tokens
    };
    let _span = info_span!("pipeline.parse").entered();
    let mut parser = Parser::new(tokens);
    let ast = parser.parse()?;
    debug!(
        params = parser.params().len(),
        nodes = ast.size(),
        "parsed program"
    );
    Ok(ast)
}

/// Fold all constant subtrees of `ast`.
pub fn optimize(ast: &AstNode) -> CompilerResult<AstNode> {
    let _span = info_span!("pipeline.optimize").entered();
    let folded = optimizer::fold(ast)?;
    debug!(before = ast.size(), after = folded.size(), "folded constants");
    Ok(folded)
}

/// Generate the instruction sequence for `ast`. Never fails.
pub fn generate_code(ast: &AstNode) -> Vec<Instruction> {
    lower(ast, true)
}

fn lower(ast: &AstNode, peephole: bool) -> Vec<Instruction> {
    let _span = info_span!("pipeline.codegen", peephole).entered();
    let code = CodeGenerator::new(peephole).generate(ast);
    debug!(instructions = code.len(), "generated code");
    code
}

/// Lex, parse and generate code without constant folding.
pub fn compile(source: &str) -> CompilerResult<Vec<Instruction>> {
    let ast = compile_to_ast(source)?;
    Ok(generate_code(&ast))
}

/// Switches for the optional passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Run constant folding before code generation.
    pub optimize: bool,
    /// Remove redundant push/pop pairs from the generated code.
    pub peephole: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            optimize: false,
            peephole: true,
        }
    }
}

/// Runs the whole pipeline with a fixed set of options.
#[derive(Debug, Default, Clone)]
pub struct Compiler {
    options: CompilerOptions,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CompilerOptions {
        self.options
    }

    /// Run every pass up to (and including) the optimizer if it is enabled.
    pub fn build_ast(&self, source: &str) -> CompilerResult<AstNode> {
        let ast = compile_to_ast(source)?;
        if self.options.optimize {
            optimize(&ast)
        } else {
            Ok(ast)
        }
    }

    pub fn compile(&self, source: &str) -> CompilerResult<Vec<Instruction>> {
        let ast = self.build_ast(source)?;
        Ok(lower(&ast, self.options.peephole))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompilerError;

    fn listing(code: &[Instruction]) -> Vec<String> {
        code.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_compile() {
        assert_eq!(listing(&compile("[ ] 1").unwrap()), ["IM 1"]);
        assert_eq!(listing(&compile("[ x ] x").unwrap()), ["AR 0"]);
        assert_eq!(
            listing(&compile("[ ] 1 + 1").unwrap()),
            ["IM 1", "PU", "IM 1", "SW", "PO", "AD"]
        );
    }

    #[test]
    fn test_compiler_options() {
        let src = "[ x ] x * (2 + 3)";
        let plain = Compiler::default().compile(src).unwrap();
        assert_eq!(
            listing(&plain),
            ["AR 0", "PU", "IM 2", "PU", "IM 3", "SW", "PO", "AD", "SW", "PO", "MU"]
        );
        let folded = Compiler::new(CompilerOptions {
            optimize: true,
            peephole: true,
        })
        .compile(src)
        .unwrap();
        assert_eq!(listing(&folded), ["AR 0", "PU", "IM 5", "SW", "PO", "MU"]);
        let raw = Compiler::new(CompilerOptions {
            optimize: true,
            peephole: false,
        })
        .compile("[ ] 4 / 2")
        .unwrap();
        assert_eq!(listing(&raw), ["IM 2", "PU", "PO"]);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(
            compile("[ x ] x $ 1"),
            Err(CompilerError::LexicalError { found: '$', .. })
        ));
        assert!(matches!(
            compile("[ x ] y"),
            Err(CompilerError::UnknownParameter { .. })
        ));
        let optimizing = Compiler::new(CompilerOptions {
            optimize: true,
            ..CompilerOptions::default()
        });
        assert!(matches!(
            optimizing.compile("[ x ] x + 1 / 0"),
            Err(CompilerError::ArithmeticError { .. })
        ));
        // Without folding the division is left to the machine.
        assert!(Compiler::default().compile("[ x ] x + 1 / 0").is_ok());
    }
}
