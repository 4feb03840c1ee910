use std::{
    borrow::Borrow,
    fmt::{self, Display},
    rc::Rc,
};

use rustc_hash::FxHashMap;

/// Interned atom identifier.
///
/// Symbols compare by name, so sorting a set of symbols yields the lexical
/// order used for truth-table enumeration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    name: Rc<str>,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self { name: name.into() }
    }
}

impl From<char> for Symbol {
    fn from(name: char) -> Self {
        Self::new(name.encode_utf8(&mut [0; 4]))
    }
}

/// Hands out one shared [`Symbol`] per distinct name.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<Rc<str>, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(symbol) = self.symbols.get(name) {
            return symbol.clone();
        }

        let symbol = Symbol::new(name);
        self.symbols.insert(symbol.name.clone(), symbol.clone());
        symbol
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_shares_names() {
        let mut table = SymbolTable::new();
        let a = table.intern("p");
        let b = table.intern("p");

        assert!(Rc::ptr_eq(&a.name, &b.name));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn lexical_order_matches_char_order() {
        let mut symbols: Vec<Symbol> = "qZaA".chars().map(Symbol::from).collect();
        symbols.sort();

        let names: String = symbols.iter().map(Symbol::name).collect();
        assert_eq!(names, "AZaq");
    }
}
