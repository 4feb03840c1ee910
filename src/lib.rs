#![warn(clippy::disallowed_types)]

pub use error::{DimacsError, FormulaError};
pub use formula::{BinaryOperator, Formula};
pub use symbols::*;
pub use truth_table::{Assignment, TruthTable, TruthTableRow, MAX_TRUTH_TABLE_ATOMS};

pub mod clauses;
pub mod cnf;
pub mod dimacs;
pub mod parser;
pub mod parser_io;

mod error;
mod formula;
mod truth_table;

mod symbols;
