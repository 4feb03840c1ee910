//! Classification of the clauses of a CNF formula.
//!
//! A clause is tautological when some atom occurs both asserted and negated in
//! it. A CNF formula is called valid here when *every* clause is tautological.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::formula::Formula;

/// Serializes a CNF tree without parentheses: `*` between clauses, `+` between
/// literals and `~` before negated atoms.
pub fn flatten_to_string(formula: Option<&Formula>) -> String {
    let mut result = String::new();

    if let Some(formula) = formula {
        flatten(formula, &mut result);
    }

    result
}

fn flatten(formula: &Formula, result: &mut String) {
    match formula {
        Formula::Atom(symbol) => result.push_str(symbol.name()),
        Formula::Not(operand) => {
            result.push('~');
            flatten(operand, result);
        }
        Formula::BinaryOp(op, l, r) => {
            flatten(l, result);
            result.push(op.symbol());
            flatten(r, result);
        }
    }
}

/// Atoms of a disjunction, split by polarity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clause {
    pub asserted: BTreeSet<String>,
    pub negated: BTreeSet<String>,
}

impl Clause {
    /// Parses a flattened clause such as `p+~q+r`.
    pub fn parse(token: &str) -> Self {
        let mut clause = Clause::default();
        let mut negated = false;
        let mut chars = token.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '~' => negated = !negated,
                c if c.is_alphabetic() => {
                    let mut name = String::from(c);
                    while let Some(next) = chars.next_if(|c| c.is_alphanumeric()) {
                        name.push(next);
                    }

                    if negated {
                        clause.negated.insert(name);
                    } else {
                        clause.asserted.insert(name);
                    }
                    negated = false;
                }
                _ => {}
            }
        }

        clause
    }

    pub fn is_tautological(&self) -> bool {
        !self.asserted.is_disjoint(&self.negated)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literals = self
            .asserted
            .iter()
            .map(String::from)
            .chain(self.negated.iter().map(|a| format!("~{a}")));

        write!(f, "({})", literals.format("+"))
    }
}

/// Splits the flattened formula into its clauses.
pub fn clauses(formula: Option<&Formula>) -> Vec<Clause> {
    split_clauses(&flatten_to_string(formula))
        .map(Clause::parse)
        .collect()
}

fn split_clauses(flat: &str) -> impl Iterator<Item = &str> {
    // an empty formula has no clauses at all
    flat.split('*').filter(move |_| !flat.is_empty())
}

pub fn count_clauses(formula: Option<&Formula>) -> usize {
    split_clauses(&flatten_to_string(formula)).count()
}

pub fn is_tautological_clause(token: &str) -> bool {
    Clause::parse(token).is_tautological()
}

pub fn count_tautological_clauses(formula: Option<&Formula>) -> usize {
    split_clauses(&flatten_to_string(formula))
        .filter(|token| is_tautological_clause(token))
        .count()
}

pub fn count_non_tautological_clauses(formula: Option<&Formula>) -> usize {
    count_clauses(formula) - count_tautological_clauses(formula)
}

/// True iff every clause is tautological.
pub fn is_valid_cnf(formula: Option<&Formula>) -> bool {
    count_tautological_clauses(formula) == count_clauses(formula)
}

/// Clause counts of a CNF formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseReport {
    pub clauses: usize,
    pub tautological: usize,
}

impl ClauseReport {
    pub fn new(formula: Option<&Formula>) -> Self {
        let flat = flatten_to_string(formula);
        let (clauses, tautological) = split_clauses(&flat)
            .fold((0, 0), |(total, taut), token| {
                (total + 1, taut + usize::from(is_tautological_clause(token)))
            });

        Self {
            clauses,
            tautological,
        }
    }

    pub fn non_tautological(&self) -> usize {
        self.clauses - self.tautological
    }

    pub fn is_valid(&self) -> bool {
        self.tautological == self.clauses
    }
}

impl fmt::Display for ClauseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            if self.is_valid() {
                "Valid Formula"
            } else {
                "Not Valid Formula"
            }
        )?;
        writeln!(f, "No of valid clauses = {}", self.tautological)?;
        write!(f, "No of invalid clauses = {}", self.non_tautological())
    }
}
