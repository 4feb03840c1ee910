use std::collections::BTreeSet;
use std::fmt;

use crate::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Implies,
}

impl BinaryOperator {
    pub const fn symbol(self) -> char {
        match self {
            BinaryOperator::And => '*',
            BinaryOperator::Or => '+',
            BinaryOperator::Implies => '>',
        }
    }

    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '*' => Some(BinaryOperator::And),
            '+' => Some(BinaryOperator::Or),
            '>' => Some(BinaryOperator::Implies),
            _ => None,
        }
    }
}

/// Propositional formula tree.
///
/// The variant fixes the arity of every node: atoms are leaves, negation has a
/// single operand and binary operators always carry both children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Atom(Symbol),
    Not(Box<Formula>),
    BinaryOp(BinaryOperator, Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<Symbol>) -> Self {
        Formula::Atom(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Self) -> Self {
        Formula::Not(Box::new(operand))
    }

    pub fn and(left: Self, right: Self) -> Self {
        Formula::BinaryOp(BinaryOperator::And, Box::new(left), Box::new(right))
    }

    pub fn or(left: Self, right: Self) -> Self {
        Formula::BinaryOp(BinaryOperator::Or, Box::new(left), Box::new(right))
    }

    pub fn implies(left: Self, right: Self) -> Self {
        Formula::BinaryOp(BinaryOperator::Implies, Box::new(left), Box::new(right))
    }

    /// An atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(operand) => matches!(operand.as_ref(), Formula::Atom(_)),
            Formula::BinaryOp(..) => false,
        }
    }

    /// Longest root-to-leaf path, counting nodes.
    pub fn height(&self) -> usize {
        match self {
            Formula::Atom(_) => 1,
            Formula::Not(operand) => 1 + operand.height(),
            Formula::BinaryOp(_, l, r) => 1 + l.height().max(r.height()),
        }
    }

    /// Total number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Formula::Atom(_) => 1,
            Formula::Not(operand) => 1 + operand.size(),
            Formula::BinaryOp(_, l, r) => 1 + l.size() + r.size(),
        }
    }

    /// The distinct atoms of the formula in lexical order.
    pub fn atoms(&self) -> BTreeSet<Symbol> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms(&self, atoms: &mut BTreeSet<Symbol>) {
        match self {
            Formula::Atom(symbol) => {
                atoms.insert(symbol.clone());
            }
            Formula::Not(operand) => operand.collect_atoms(atoms),
            Formula::BinaryOp(_, l, r) => {
                l.collect_atoms(atoms);
                r.collect_atoms(atoms);
            }
        }
    }
}

/// Canonical fully-parenthesized infix notation.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(symbol) => write!(f, "{symbol}"),
            Formula::Not(operand) => write!(f, "(~{operand})"),
            Formula::BinaryOp(op, l, r) => write!(f, "({l}{}{r})", op.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert!(Formula::atom('p').is_literal());
        assert!(Formula::not(Formula::atom('p')).is_literal());
        assert!(!Formula::not(Formula::not(Formula::atom('p'))).is_literal());
        assert!(!Formula::or(Formula::atom('p'), Formula::atom('q')).is_literal());
    }

    #[test]
    fn height_counts_nodes_on_longest_path() {
        let f = Formula::and(
            Formula::not(Formula::atom('p')),
            Formula::atom('q'),
        );

        assert_eq!(f.height(), 3);
        assert_eq!(f.size(), 4);
    }
}
