use std::fmt;
use std::iter::Peekable;
use std::slice::Iter;

use crate::cnf;
use crate::error::FormulaError;
use crate::formula::{BinaryOperator, Formula};
use crate::symbols::SymbolTable;

/// Symbol of the linear prefix notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixToken {
    Atom(char),
    Not,
    Binary(BinaryOperator),
}

impl fmt::Display for PrefixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixToken::Atom(c) => write!(f, "{c}"),
            PrefixToken::Not => write!(f, "~"),
            PrefixToken::Binary(op) => write!(f, "{}", op.symbol()),
        }
    }
}

type TokenReader<'a> = Peekable<Iter<'a, (usize, PrefixToken)>>;

/// Converts a fully parenthesized infix formula into prefix notation.
///
/// The input is scanned back to front. A `)` acts as the opening sentinel,
/// binary operators are stacked until the matching `(` releases them, and
/// negations and atoms go straight to the output. Reversing the output gives
/// the prefix form, e.g. `(p>q)` becomes `>pq` and `((~p)*q)` becomes `*~pq`.
///
/// Whitespace is ignored.
pub fn infix_to_prefix(infix: &str) -> Result<String, FormulaError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut output = String::with_capacity(infix.len());

    for (position, c) in infix.char_indices().rev() {
        match c {
            ')' | '*' | '+' | '>' => stack.push((c, position)),
            '(' => loop {
                match stack.pop() {
                    Some((')', _)) => break,
                    Some((op, _)) => output.push(op),
                    None => return Err(FormulaError::unbalanced(position)),
                }
            },
            '~' => output.push(c),
            c if c.is_ascii_alphabetic() => output.push(c),
            c if c.is_whitespace() => {}
            other => return Err(FormulaError::unknown_symbol(other, position)),
        }
    }

    // operators outside of any parentheses are flushed; a stray ')' is not
    while let Some((c, position)) = stack.pop() {
        if c == ')' {
            return Err(FormulaError::unbalanced(position));
        }
        output.push(c);
    }

    Ok(output.chars().rev().collect())
}

/// Builds a formula tree from its prefix notation.
///
/// An empty (or all-whitespace) input yields the empty formula `None`.
pub fn build_tree(prefix: &str) -> Result<Option<Formula>, FormulaError> {
    let tokens = tokenize_prefix(prefix)?;

    if tokens.is_empty() {
        return Ok(None);
    }

    let mut symbols = SymbolTable::new();
    let mut reader = tokens.iter().peekable();
    let formula = Formula::parse_prefix(&mut reader, &mut symbols, prefix.len())?;

    if let Some((position, token)) = reader.next() {
        return Err(FormulaError::MalformedFormula {
            position: *position,
            reason: format!("unexpected trailing symbol '{token}'"),
        });
    }

    log::trace!(
        "built tree with {} nodes over {} atoms",
        formula.size(),
        symbols.len()
    );

    Ok(Some(formula))
}

/// Inverse of [`build_tree`] after [`infix_to_prefix`]: prints the tree with
/// parentheses around every binary node and negation.
pub fn print_infix(tree: Option<&Formula>) -> String {
    tree.map(Formula::to_string).unwrap_or_default()
}

/// Parses a fully parenthesized infix formula.
pub fn parse(infix: &str) -> Result<Option<Formula>, FormulaError> {
    build_tree(&infix_to_prefix(infix)?)
}

pub fn tokenize_prefix(prefix: &str) -> Result<Vec<(usize, PrefixToken)>, FormulaError> {
    let mut result = Vec::with_capacity(prefix.len());

    for (position, c) in prefix.char_indices() {
        let token = match c {
            '~' => PrefixToken::Not,
            c if c.is_ascii_alphabetic() => PrefixToken::Atom(c),
            c if c.is_whitespace() => continue,
            c => match BinaryOperator::from_symbol(c) {
                Some(op) => PrefixToken::Binary(op),
                None => return Err(FormulaError::unknown_symbol(c, position)),
            },
        };

        result.push((position, token));
    }

    Ok(result)
}

impl Formula {
    fn parse_prefix(
        tokens: &mut TokenReader,
        symbols: &mut SymbolTable,
        end: usize,
    ) -> Result<Formula, FormulaError> {
        match tokens.next() {
            Some((_, PrefixToken::Atom(c))) => {
                Ok(Formula::Atom(symbols.intern(c.encode_utf8(&mut [0; 4]))))
            }
            Some((_, PrefixToken::Not)) => {
                let operand = Formula::parse_prefix(tokens, symbols, end)?;
                Ok(Formula::Not(Box::new(operand)))
            }
            Some((_, PrefixToken::Binary(op))) => {
                let left = Formula::parse_prefix(tokens, symbols, end)?;
                let right = Formula::parse_prefix(tokens, symbols, end)?;
                Ok(Formula::BinaryOp(*op, Box::new(left), Box::new(right)))
            }
            None => Err(FormulaError::TruncatedFormula { position: end }),
        }
    }
}

/// A formula together with the prefix form it was built from.
#[derive(Debug, Clone)]
pub struct ParsedFormula {
    pub prefix: String,
    pub root: Option<Formula>,
}

impl ParsedFormula {
    pub fn new(infix: &str) -> Result<Self, FormulaError> {
        let prefix = infix_to_prefix(infix)?;
        let root = build_tree(&prefix)?;

        Ok(ParsedFormula { prefix, root })
    }

    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Formula::height)
    }

    pub fn infix(&self) -> String {
        print_infix(self.root.as_ref())
    }

    /// Runs the full CNF pipeline on a copy of the tree.
    pub fn cnf(&self) -> Option<Formula> {
        self.root.clone().map(cnf::to_cnf)
    }
}
