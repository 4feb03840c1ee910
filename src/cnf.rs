//! Conversion to conjunctive normal form.
//!
//! The conversion runs three passes in a fixed order:
//! [`eliminate_implications`], [`negation_normal_form`] and [`distribute`].
//! Each pass takes ownership of its input and returns the rewritten tree.
//! Running the passes in any other order is not supported.
//!
//! Distribution of `+` over `*` can grow the formula exponentially, e.g.
//! `((a*b)+(c*d))+(e*f)` expands into eight clauses. This is inherent to plain
//! CNF conversion.

use crate::formula::{BinaryOperator, Formula};

/// Runs the three passes in order.
pub fn to_cnf(formula: Formula) -> Formula {
    let size = formula.size();

    let formula = eliminate_implications(formula);
    log::debug!("implication elimination: {} -> {} nodes", size, formula.size());

    let size = formula.size();
    let formula = negation_normal_form(formula);
    log::debug!("negation normal form: {} -> {} nodes", size, formula.size());

    let size = formula.size();
    let formula = distribute(formula);
    log::debug!("distribution: {} -> {} nodes", size, formula.size());

    formula
}

/// Rewrites every `A>B` into `(~A)+B`.
pub fn eliminate_implications(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(operand) => Formula::not(eliminate_implications(*operand)),
        Formula::BinaryOp(BinaryOperator::Implies, l, r) => Formula::or(
            Formula::not(eliminate_implications(*l)),
            eliminate_implications(*r),
        ),
        Formula::BinaryOp(op, l, r) => Formula::BinaryOp(
            op,
            Box::new(eliminate_implications(*l)),
            Box::new(eliminate_implications(*r)),
        ),
    }
}

/// Pushes negations down to the atoms with De Morgan's laws and removes
/// double negations.
///
/// Expects an implication-free formula. A negated implication is still
/// rewritten as `A*(~B)`.
pub fn negation_normal_form(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(operand) => match *operand {
            Formula::Atom(_) => Formula::Not(operand),
            Formula::Not(inner) => negation_normal_form(*inner),
            Formula::BinaryOp(BinaryOperator::Or, l, r) => Formula::and(
                negation_normal_form(Formula::Not(l)),
                negation_normal_form(Formula::Not(r)),
            ),
            Formula::BinaryOp(BinaryOperator::And, l, r) => Formula::or(
                negation_normal_form(Formula::Not(l)),
                negation_normal_form(Formula::Not(r)),
            ),
            Formula::BinaryOp(BinaryOperator::Implies, l, r) => Formula::and(
                negation_normal_form(*l),
                negation_normal_form(Formula::Not(r)),
            ),
        },
        Formula::BinaryOp(op, l, r) => Formula::BinaryOp(
            op,
            Box::new(negation_normal_form(*l)),
            Box::new(negation_normal_form(*r)),
        ),
    }
}

/// Distributes disjunctions over conjunctions so that no `+` has a `*` below it.
///
/// Expects a formula in negation normal form.
pub fn distribute(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) | Formula::Not(_) => formula,
        Formula::BinaryOp(BinaryOperator::Or, l, r) => distr(distribute(*l), distribute(*r)),
        Formula::BinaryOp(op, l, r) => Formula::BinaryOp(
            op,
            Box::new(distribute(*l)),
            Box::new(distribute(*r)),
        ),
    }
}

/// Disjunction of two formulas in CNF, itself in CNF.
fn distr(a: Formula, b: Formula) -> Formula {
    match (a, b) {
        (Formula::BinaryOp(BinaryOperator::And, l, r), b) => {
            log::trace!("distributing {b} over ({l}*{r})");
            Formula::and(distr(*l, b.clone()), distr(*r, b))
        }
        (a, Formula::BinaryOp(BinaryOperator::And, l, r)) => {
            log::trace!("distributing {a} over ({l}*{r})");
            Formula::and(distr(a.clone(), *l), distr(a, *r))
        }
        (a, b) => Formula::or(a, b),
    }
}

/// Checks the CNF shape: no implications, negations only on atoms and no
/// conjunction below a disjunction.
pub fn is_cnf(formula: &Formula) -> bool {
    match formula {
        Formula::BinaryOp(BinaryOperator::And, l, r) => is_cnf(l) && is_cnf(r),
        other => is_clause(other),
    }
}

fn is_clause(formula: &Formula) -> bool {
    match formula {
        Formula::BinaryOp(BinaryOperator::Or, l, r) => is_clause(l) && is_clause(r),
        other => other.is_literal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Formula {
        Formula::atom('p')
    }

    fn q() -> Formula {
        Formula::atom('q')
    }

    #[test]
    fn double_negation() {
        let f = Formula::not(Formula::not(Formula::not(p())));
        assert_eq!(negation_normal_form(f), Formula::not(p()));
    }

    #[test]
    fn distribution_on_the_right() {
        let f = Formula::or(p(), Formula::and(q(), Formula::atom('r')));
        let expected = Formula::and(
            Formula::or(p(), q()),
            Formula::or(p(), Formula::atom('r')),
        );

        assert_eq!(distribute(f), expected);
    }

    #[test]
    fn clause_shape() {
        assert!(is_cnf(&Formula::or(p(), Formula::not(q()))));
        assert!(!is_cnf(&Formula::or(p(), Formula::and(p(), q()))));
        assert!(!is_cnf(&Formula::implies(p(), q())));
    }
}
