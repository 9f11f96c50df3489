//! This module contains all modules needed for the backend of the compiler.
//!
//! The backend features two stages:
//! 1. Constant folding, which collapses every subtree made only of immediates into a single
//! immediate. This stage is handled by the `optimizer` and can be activated by setting
//! the `-o` flag.
//! 2. Code generation for the two register stack machine. This stage is handled by the
//! `CodeGenerator`, which also removes redundant push/pop pairs unless `--no-peephole`
//! is given.

pub mod codegen;
pub mod instruction;
pub mod optimizer;
