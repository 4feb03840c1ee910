use std::io;

/// Errors raised while converting, parsing or evaluating a formula.
///
/// Every variant is caused by caller-supplied input; none of them are
/// transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// Unknown symbol, unbalanced parentheses or trailing input.
    #[error("malformed formula at position {position}: {reason}")]
    MalformedFormula { position: usize, reason: String },
    /// The prefix token stream ended while a subtree was still expected.
    #[error("truncated formula: expected a subformula at position {position}")]
    TruncatedFormula { position: usize },
    #[error("atom {0} is not bound by the assignment")]
    UnboundAtom(String),
    #[error("truth table over {atoms} atoms exceeds the supported maximum of {max}")]
    TooManyAtoms { atoms: usize, max: usize },
}

impl FormulaError {
    pub fn unknown_symbol(symbol: char, position: usize) -> Self {
        FormulaError::MalformedFormula {
            position,
            reason: format!("unknown symbol '{symbol}'"),
        }
    }

    pub fn unbalanced(position: usize) -> Self {
        FormulaError::MalformedFormula {
            position,
            reason: "unbalanced parentheses".to_string(),
        }
    }
}

/// Errors raised while reading DIMACS CNF input.
#[derive(Debug, thiserror::Error)]
pub enum DimacsError {
    #[error("missing 'p cnf <variables> <clauses>' header")]
    MissingHeader,
    #[error("invalid header on line {line}: {header}")]
    InvalidHeader { line: usize, header: String },
    #[error("invalid literal '{literal}' on line {line}")]
    InvalidLiteral { line: usize, literal: String },
    #[error("clause starting on line {line} is not terminated by 0")]
    UnterminatedClause { line: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}
