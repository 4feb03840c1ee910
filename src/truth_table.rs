use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use itertools::Itertools;

use crate::error::FormulaError;
use crate::formula::{BinaryOperator, Formula};
use crate::Symbol;

/// Largest number of atoms a truth table can enumerate with a 64-bit counter.
pub const MAX_TRUTH_TABLE_ATOMS: usize = 63;

/// Truth values of atoms, ordered by atom name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<Symbol, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, atom: impl Into<Symbol>, value: bool) -> Option<bool> {
        self.values.insert(atom.into(), value)
    }

    pub fn get(&self, atom: &str) -> Option<bool> {
        self.values.get(atom).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, bool)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}

impl<S: Into<Symbol>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Formula {
    /// Truth value of the formula under `assignment`.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, FormulaError> {
        match self {
            Formula::Atom(symbol) => assignment
                .get(symbol.name())
                .ok_or_else(|| FormulaError::UnboundAtom(symbol.name().to_string())),
            Formula::Not(operand) => Ok(!operand.evaluate(assignment)?),
            Formula::BinaryOp(op, l, r) => {
                let l = l.evaluate(assignment)?;
                let r = r.evaluate(assignment)?;

                Ok(match op {
                    BinaryOperator::And => l & r,
                    BinaryOperator::Or => l | r,
                    BinaryOperator::Implies => !l | r,
                })
            }
        }
    }
}

/// One row of a truth table: the value of the formula under an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRow {
    pub assignment: Assignment,
    pub value: bool,
}

impl TruthTableRow {
    /// The assignment as a string of `0`/`1`, one digit per atom in lexical order.
    pub fn bits(&self) -> String {
        self.assignment
            .iter()
            .map(|(_, v)| if v { '1' } else { '0' })
            .collect()
    }
}

impl Display for TruthTableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bits(), u8::from(self.value))
    }
}

/// Exhaustive enumeration of the assignments of a formula.
///
/// With atoms `a_0 < a_1 < ... < a_{n-1}` in lexical order, row `i` assigns
/// bit `n-1-j` of `i` to `a_j`, so the first atom is the most significant bit
/// and rows appear in increasing counter order.
#[derive(Debug, Clone)]
pub struct TruthTable<'a> {
    formula: &'a Formula,
    atoms: Vec<Symbol>,
}

impl<'a> TruthTable<'a> {
    pub fn new(formula: &'a Formula) -> Result<Self, FormulaError> {
        Self::with_max_atoms(formula, MAX_TRUTH_TABLE_ATOMS)
    }

    /// Like [`TruthTable::new`], with a tighter bound on the number of atoms.
    /// Bounds above [`MAX_TRUTH_TABLE_ATOMS`] are clamped to it.
    pub fn with_max_atoms(formula: &'a Formula, max_atoms: usize) -> Result<Self, FormulaError> {
        let max = max_atoms.min(MAX_TRUTH_TABLE_ATOMS);
        let atoms: Vec<Symbol> = formula.atoms().into_iter().collect();

        if atoms.len() > max {
            return Err(FormulaError::TooManyAtoms {
                atoms: atoms.len(),
                max,
            });
        }

        Ok(Self { formula, atoms })
    }

    pub fn atoms(&self) -> &[Symbol] {
        &self.atoms
    }

    /// Number of rows, `2^n`.
    pub fn len(&self) -> u64 {
        1 << self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Header line listing the atoms followed by the value column.
    pub fn header(&self) -> String {
        format!("{} Truth value", self.atoms.iter().join(""))
    }

    /// Assignment for counter value `i`.
    pub fn assignment(&self, i: u64) -> Assignment {
        let n = self.atoms.len();

        self.atoms
            .iter()
            .enumerate()
            .map(|(j, atom)| (atom.clone(), (i >> (n - 1 - j)) & 1 == 1))
            .collect()
    }

    /// Lazily evaluates every row. Each call starts a fresh enumeration.
    pub fn rows(&self) -> impl Iterator<Item = Result<TruthTableRow, FormulaError>> + '_ {
        (0..self.len()).map(move |i| {
            let assignment = self.assignment(i);
            let value = self.formula.evaluate(&assignment)?;
            Ok(TruthTableRow { assignment, value })
        })
    }

    /// True when every row evaluates to true.
    pub fn is_tautology(&self) -> Result<bool, FormulaError> {
        for row in self.rows() {
            if !row?.value {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
