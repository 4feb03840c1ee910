use pretty_assertions::assert_eq;

use propcnf::clauses::*;
use propcnf::cnf::to_cnf;
use propcnf::parser::parse;
use propcnf::Formula;

fn cnf(infix: &str) -> Option<Formula> {
    parse(infix).expect("could not parse formula").map(to_cnf)
}

#[test]
fn test_tautological_clauses() {
    assert!(is_tautological_clause("p+~p+q"));
    assert!(is_tautological_clause("~q+q"));
    assert!(!is_tautological_clause("p+q+~r"));
    assert!(!is_tautological_clause("~p"));
    assert!(!is_tautological_clause(""));
}

#[test]
fn test_clause_sets() {
    let clause = Clause::parse("~p+q+~p");

    assert_eq!(clause.asserted.iter().map(String::as_str).collect::<Vec<_>>(), vec!["q"]);
    assert_eq!(clause.negated.iter().map(String::as_str).collect::<Vec<_>>(), vec!["p"]);
    assert!(!clause.is_tautological());
}

#[test]
fn test_flatten() {
    let f = cnf("((p>q)*(q>q))");

    assert_eq!(flatten_to_string(f.as_ref()), "~p+q*~q+q");
    assert_eq!(flatten_to_string(None), "");
}

#[test]
fn test_one_of_two_clauses_tautological() {
    let f = cnf("((p>q)*(q>q))");
    let f = f.as_ref();

    assert_eq!(count_clauses(f), 2);
    assert_eq!(count_tautological_clauses(f), 1);
    assert_eq!(count_non_tautological_clauses(f), 1);
    assert!(!is_valid_cnf(f));

    let report = ClauseReport::new(f);
    assert_eq!(
        report,
        ClauseReport {
            clauses: 2,
            tautological: 1
        }
    );
    assert_eq!(
        report.to_string(),
        "Not Valid Formula\nNo of valid clauses = 1\nNo of invalid clauses = 1"
    );
}

#[test]
fn test_all_clauses_tautological() {
    let f = cnf("((p+(~p))*(q>q))");

    assert!(is_valid_cnf(f.as_ref()));
    assert!(ClauseReport::new(f.as_ref()).is_valid());
    assert_eq!(
        clauses(f.as_ref()),
        vec![Clause::parse("p+~p"), Clause::parse("~q+q")]
    );
}

#[test]
fn test_validity_is_per_clause() {
    // (p*(~p)) is unsatisfiable, yet neither of its unit clauses is tautological
    let f = cnf("(p*(~p))");
    assert_eq!(count_tautological_clauses(f.as_ref()), 0);
    assert!(!is_valid_cnf(f.as_ref()));

    // a formula true under every assignment whose clauses are all tautologies
    let f = cnf("(p>p)");
    assert!(is_valid_cnf(f.as_ref()));
}

#[test]
fn test_single_literal() {
    let f = cnf("p");

    assert_eq!(count_clauses(f.as_ref()), 1);
    assert!(!is_valid_cnf(f.as_ref()));
}
