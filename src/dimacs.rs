use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::DimacsError;

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"^p\s+cnf\s+(?P<vars>\d+)\s+(?P<clauses>\d+)\s*$")
        .expect("valid DIMACS header regex");
}

/// Clause of signed DIMACS literals, without the terminating `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsClause {
    pub literals: Vec<i64>,
}

impl DimacsClause {
    /// A clause is tautological when it contains both `v` and `-v`.
    pub fn is_tautological(&self) -> bool {
        let mut seen: FxHashSet<i64> = FxHashSet::default();

        self.literals.iter().any(|&lit| {
            let complement = lit.checked_neg().is_some_and(|neg| seen.contains(&neg));
            seen.insert(lit);
            complement
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsFormula {
    pub num_vars: usize,
    /// Clause count declared by the header.
    pub num_clauses: usize,
    pub clauses: Vec<DimacsClause>,
}

impl DimacsFormula {
    /// Reads a DIMACS CNF problem.
    ///
    /// Lines before the header and lines starting with `c` are skipped. After
    /// the header, literals are read as one stream; each `0` closes a clause.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, DimacsError> {
        let mut lines = reader.lines().enumerate();
        let mut header = None;

        for (i, line) in lines.by_ref() {
            let line = line?;
            let line = line.trim();

            if line.starts_with('p') {
                let captures = HEADER.captures(line).ok_or_else(|| DimacsError::InvalidHeader {
                    line: i + 1,
                    header: line.to_string(),
                })?;

                let count = |name: &str| {
                    captures[name].parse::<usize>().map_err(|_| DimacsError::InvalidHeader {
                        line: i + 1,
                        header: line.to_string(),
                    })
                };

                header = Some((count("vars")?, count("clauses")?));
                break;
            }
        }

        let (num_vars, num_clauses) = header.ok_or(DimacsError::MissingHeader)?;

        let mut clauses = Vec::with_capacity(num_clauses);
        let mut current = Vec::new();
        let mut clause_start = 0;

        for (i, line) in lines {
            let line = line?;
            let line = line.trim();

            if line.starts_with('c') {
                continue;
            }

            // SATLIB end marker
            if line.starts_with('%') {
                break;
            }

            for literal in line.split_whitespace() {
                // every literal must have a complement, which rules out i64::MIN
                let value: i64 = literal
                    .parse()
                    .ok()
                    .filter(|v: &i64| v.checked_neg().is_some())
                    .ok_or_else(|| DimacsError::InvalidLiteral {
                        line: i + 1,
                        literal: literal.to_string(),
                    })?;

                if current.is_empty() {
                    clause_start = i + 1;
                }

                if value == 0 {
                    clauses.push(DimacsClause {
                        literals: std::mem::take(&mut current),
                    });
                } else {
                    current.push(value);
                }
            }
        }

        if !current.is_empty() {
            return Err(DimacsError::UnterminatedClause { line: clause_start });
        }

        if clauses.len() != num_clauses {
            log::warn!(
                "header declares {} clauses, found {}",
                num_clauses,
                clauses.len()
            );
        }

        Ok(DimacsFormula {
            num_vars,
            num_clauses,
            clauses,
        })
    }

    pub fn tautological_clause_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.is_tautological()).count()
    }

    /// Declared clauses that are not tautological.
    pub fn non_tautological_clause_count(&self) -> usize {
        self.num_clauses.saturating_sub(self.tautological_clause_count())
    }

    /// Every declared clause is tautological.
    pub fn is_valid(&self) -> bool {
        self.tautological_clause_count() == self.num_clauses
    }
}
