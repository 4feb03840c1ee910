use propcnf::Formula;
use quickcheck::{Arbitrary, Gen};

const ATOMS: [char; 6] = ['a', 'b', 'c', 'd', 'P', 'Q'];

/// Random formula of bounded depth, for property tests.
#[derive(Debug, Clone)]
pub struct ArbitraryFormula(pub Formula);

impl Arbitrary for ArbitraryFormula {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbitraryFormula(formula(g, 4))
    }
}

fn formula(g: &mut Gen, depth: usize) -> Formula {
    if depth == 0 || u8::arbitrary(g) % 4 == 0 {
        return Formula::atom(*g.choose(&ATOMS).unwrap());
    }

    match u8::arbitrary(g) % 4 {
        0 => Formula::not(formula(g, depth - 1)),
        1 => Formula::and(formula(g, depth - 1), formula(g, depth - 1)),
        2 => Formula::or(formula(g, depth - 1), formula(g, depth - 1)),
        _ => Formula::implies(formula(g, depth - 1), formula(g, depth - 1)),
    }
}
