//! Arithmetic operations a player can practice.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseOperationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Self; 4] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
        }
    }

    /// Symbol shown between the two operands.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "×",
            Self::Division => "÷",
        }
    }

    /// Parse a symbol or name, falling back to addition for anything unknown.
    #[must_use]
    pub fn from_symbol_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Exact result of `a op b`. Division by zero yields NaN, which never
    /// compares equal to a submitted answer.
    #[must_use]
    pub fn evaluate(self, a: u32, b: u32) -> f64 {
        if matches!(self, Self::Division) && b == 0 {
            return f64::NAN;
        }
        let (a, b) = (f64::from(a), f64::from(b));
        match self {
            Self::Addition => a + b,
            Self::Subtraction => a - b,
            Self::Multiplication => a * b,
            Self::Division => a / b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" | "addition" => Ok(Self::Addition),
            "-" | "sub" | "subtraction" => Ok(Self::Subtraction),
            "×" | "*" | "x" | "mul" | "multiplication" => Ok(Self::Multiplication),
            "÷" | "/" | "div" | "division" => Ok(Self::Division),
            _ => Err(ParseOperationError(s.to_string())),
        }
    }
}

impl From<Operation> for String {
    fn from(value: Operation) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbols_and_names() {
        assert_eq!("+".parse::<Operation>().unwrap(), Operation::Addition);
        assert_eq!("-".parse::<Operation>().unwrap(), Operation::Subtraction);
        assert_eq!("×".parse::<Operation>().unwrap(), Operation::Multiplication);
        assert_eq!("÷".parse::<Operation>().unwrap(), Operation::Division);
        assert_eq!(" Division ".parse::<Operation>().unwrap(), Operation::Division);
        assert!("%".parse::<Operation>().is_err());
    }

    #[test]
    fn unknown_symbol_falls_back_to_addition() {
        assert_eq!(Operation::from_symbol_lenient("?"), Operation::Addition);
        assert_eq!(Operation::from_symbol_lenient("x"), Operation::Multiplication);
    }

    #[test]
    fn evaluate_handles_division() {
        assert!((Operation::Division.evaluate(12, 4) - 3.0).abs() < f64::EPSILON);
        assert!(Operation::Division.evaluate(3, 0).is_nan());
        assert!((Operation::Subtraction.evaluate(2, 5) + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_uses_symbol() {
        assert_eq!(Operation::Multiplication.to_string(), "×");
        assert_eq!(String::from(Operation::Division), "division");
    }
}
