mod common;

use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;

use common::ArbitraryFormula;
use propcnf::parser::*;
use propcnf::{Formula, FormulaError};

#[test]
fn test_prefix_conversion() -> Result<(), FormulaError> {
    assert_eq!(infix_to_prefix("(p>q)")?, ">pq");
    assert_eq!(infix_to_prefix("((~p)*q)")?, "*~pq");
    assert_eq!(infix_to_prefix("(~(~(~A)))")?, "~~~A");
    assert_eq!(infix_to_prefix("((p>q)*(q>q))")?, "*>pq>qq");
    assert_eq!(infix_to_prefix("p")?, "p");
    assert_eq!(infix_to_prefix("")?, "");

    Ok(())
}

#[test]
fn test_build_tree() -> Result<(), FormulaError> {
    assert_eq!(
        build_tree(">pq")?,
        Some(Formula::implies(Formula::atom('p'), Formula::atom('q')))
    );
    assert_eq!(
        build_tree("*~pq")?,
        Some(Formula::and(
            Formula::not(Formula::atom('p')),
            Formula::atom('q')
        ))
    );
    assert_eq!(build_tree("")?, None);

    Ok(())
}

#[test]
fn test_round_trip() -> Result<(), FormulaError> {
    let test_strs: Vec<&str> = vec![
        "p",
        "(~p)",
        "(p+q)",
        "(p*q)",
        "(p>q)",
        "((p>q)*(q>q))",
        "((~(p*q))>(r+(~s)))",
        "(~(~(~A)))",
        "((a+b)*(c+(d>e)))",
        "(((A>b)>C)>d)",
    ];

    for test_str in test_strs {
        let tree = build_tree(&infix_to_prefix(test_str)?)?;
        assert_eq!(print_infix(tree.as_ref()), test_str);
    }

    Ok(())
}

#[test]
fn test_whitespace_is_ignored() -> Result<(), FormulaError> {
    let parsed = ParsedFormula::new("( (~ p) + q )")?;

    assert_eq!(parsed.infix(), "((~p)+q)");
    assert_eq!(parsed.prefix, "+~pq");

    Ok(())
}

#[test]
fn test_empty_formula() -> Result<(), FormulaError> {
    let parsed = ParsedFormula::new("")?;

    assert_eq!(parsed.root, None);
    assert_eq!(parsed.infix(), "");
    assert_eq!(parsed.height(), 0);
    assert_eq!(parsed.cnf(), None);

    Ok(())
}

#[test]
fn test_height() -> Result<(), FormulaError> {
    assert_eq!(ParsedFormula::new("p")?.height(), 1);
    assert_eq!(ParsedFormula::new("((p>q)*(q>q))")?.height(), 3);
    assert_eq!(ParsedFormula::new("(~(~(~A)))")?.height(), 4);

    Ok(())
}

#[test]
fn test_unknown_symbol() {
    assert!(matches!(
        infix_to_prefix("(p&q)"),
        Err(FormulaError::MalformedFormula { position: 2, .. })
    ));
    assert!(matches!(
        infix_to_prefix("(p1+q)"),
        Err(FormulaError::MalformedFormula { position: 2, .. })
    ));
    assert!(matches!(
        build_tree("#p"),
        Err(FormulaError::MalformedFormula { position: 0, .. })
    ));
}

#[test]
fn test_unbalanced_parentheses() {
    assert_eq!(infix_to_prefix("(p+q))"), Err(FormulaError::unbalanced(5)));
    assert_eq!(infix_to_prefix("((p+q)"), Err(FormulaError::unbalanced(0)));
    assert_eq!(infix_to_prefix(")"), Err(FormulaError::unbalanced(0)));
}

#[test]
fn test_truncated_formula() {
    assert_eq!(
        parse("(p+)"),
        Err(FormulaError::TruncatedFormula { position: 2 })
    );
    assert_eq!(
        build_tree(">p"),
        Err(FormulaError::TruncatedFormula { position: 2 })
    );
    assert_eq!(
        build_tree("~"),
        Err(FormulaError::TruncatedFormula { position: 1 })
    );
}

#[test]
fn test_trailing_symbols() {
    assert!(matches!(
        build_tree("pq"),
        Err(FormulaError::MalformedFormula { position: 1, .. })
    ));
    assert!(matches!(
        parse("(pq)"),
        Err(FormulaError::MalformedFormula { .. })
    ));
}

#[quickcheck]
fn printed_formulas_parse_back(f: ArbitraryFormula) -> bool {
    let printed = f.0.to_string();

    matches!(parse(&printed), Ok(Some(ref parsed)) if *parsed == f.0)
}

#[test]
fn test_render_dot() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = ParsedFormula::new("((~p)+q)")?;
    let root = parsed.root.as_ref().ok_or("formula is empty")?;

    let tree = propcnf::parser_io::FormulaTree::new(root);
    assert_eq!(tree.nodes.len(), 4);

    let mut output: Vec<u8> = Vec::new();
    tree.render_dot(&mut output)?;
    let output = String::from_utf8(output)?;

    assert!(output.starts_with("digraph parse_tree {"));
    assert!(output.contains("Atom p"));
    assert!(output.contains("Not"));
    assert!(output.contains("Or"));

    Ok(())
}
