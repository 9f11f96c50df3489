//! Instructions of the two register stack machine and their mnemonic text form.
//!
//! | Mnemonic | Effect                                  |
//! |----------|-----------------------------------------|
//! | `IM n`   | primary <- n                            |
//! | `AR i`   | primary <- argument i                   |
//! | `SW`     | swap primary and secondary              |
//! | `PU`     | push primary onto the stack             |
//! | `PO`     | primary <- pop                          |
//! | `AD`     | primary <- primary + secondary          |
//! | `SU`     | primary <- primary - secondary          |
//! | `MU`     | primary <- primary * secondary          |
//! | `DI`     | primary <- primary / secondary          |

use phf::phf_map;
use std::{fmt, str::FromStr};

use crate::{error::CompilerError, frontend::ast::Operator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    LoadImmediate(i64),
    LoadArgument(usize),
    Swap,
    Push,
    Pop,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Instruction {
    /// The arithmetic instruction computing `op`.
    pub fn from_operator(op: Operator) -> Self {
        match op {
            Operator::Add => Instruction::Add,
            Operator::Subtract => Instruction::Subtract,
            Operator::Multiply => Instruction::Multiply,
            Operator::Divide => Instruction::Divide,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::LoadImmediate(_) => "IM",
            Instruction::LoadArgument(_) => "AR",
            Instruction::Swap => "SW",
            Instruction::Push => "PU",
            Instruction::Pop => "PO",
            Instruction::Add => "AD",
            Instruction::Subtract => "SU",
            Instruction::Multiply => "MU",
            Instruction::Divide => "DI",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LoadImmediate(n) => write!(f, "{} {}", self.mnemonic(), n),
            Instruction::LoadArgument(i) => write!(f, "{} {}", self.mnemonic(), i),
            _ => write!(f, "{}", self.mnemonic()),
        }
    }
}

static NULLARY: phf::Map<&'static str, Instruction> = phf_map! {
    "SW" => Instruction::Swap,
    "PU" => Instruction::Push,
    "PO" => Instruction::Pop,
    "AD" => Instruction::Add,
    "SU" => Instruction::Subtract,
    "MU" => Instruction::Multiply,
    "DI" => Instruction::Divide,
};

impl FromStr for Instruction {
    type Err = CompilerError;

    /// Read back a single line of a listing, e.g. `IM 5` or `SW`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = |msg: &str| CompilerError::InvalidMnemonic {
            line: line.to_string(),
            msg: msg.to_string(),
        };
        let mut parts = line.split_whitespace();
        let mnemonic = parts.next().ok_or_else(|| invalid("empty line"))?;
        let operand = parts.next();
        if parts.next().is_some() {
            return Err(invalid("too many operands"));
        }
        match (mnemonic, operand) {
            ("IM", Some(n)) => n
                .parse()
                .map(Instruction::LoadImmediate)
                .map_err(|_| invalid("expected an integer operand")),
            ("AR", Some(i)) => i
                .parse()
                .map(Instruction::LoadArgument)
                .map_err(|_| invalid("expected an argument index")),
            ("IM", None) | ("AR", None) => Err(invalid("missing operand")),
            (m, None) => NULLARY
                .get(m)
                .copied()
                .ok_or_else(|| invalid("unknown mnemonic")),
            (m, Some(_)) if NULLARY.contains_key(m) => Err(invalid("unexpected operand")),
            _ => Err(invalid("unknown mnemonic")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Instruction::LoadImmediate(-4).to_string(), "IM -4");
        assert_eq!(Instruction::LoadArgument(2).to_string(), "AR 2");
        assert_eq!(Instruction::Swap.to_string(), "SW");
        assert_eq!(Instruction::from_operator(Operator::Divide).to_string(), "DI");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("IM 12".parse::<Instruction>(), Ok(Instruction::LoadImmediate(12)));
        assert_eq!("IM -1".parse::<Instruction>(), Ok(Instruction::LoadImmediate(-1)));
        assert_eq!("  AR 0 ".parse::<Instruction>(), Ok(Instruction::LoadArgument(0)));
        assert_eq!("PO".parse::<Instruction>(), Ok(Instruction::Pop));
        assert_eq!("MU".parse::<Instruction>(), Ok(Instruction::Multiply));
    }

    #[test]
    fn test_from_str_errors() {
        for (line, msg) in &[
            ("", "empty line"),
            ("IM", "missing operand"),
            ("AR x", "expected an argument index"),
            ("AR -1", "expected an argument index"),
            ("IM 1 2", "too many operands"),
            ("SW 1", "unexpected operand"),
            ("XX", "unknown mnemonic"),
            ("XX 1", "unknown mnemonic"),
        ] {
            assert_eq!(
                line.parse::<Instruction>(),
                Err(CompilerError::InvalidMnemonic {
                    line: line.to_string(),
                    msg: msg.to_string()
                })
            );
        }
    }
}
