use crate::term::{Symbol, Term};
use internment::Intern;

/// Source of fresh variable and symbol names.
///
/// Passed explicitly to everything that invents names (standardizing apart,
/// renaming unbound variables in answers, anonymous `_` in the reader), so
/// fresh-name sequences are reproducible: two generators created with the
/// same starting point hand out the same names.
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    counter: u64,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    pub fn starting_at(counter: u64) -> Self {
        Self { counter }
    }

    /// Number of names handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }

    fn next(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    /// `V<n>`
    pub fn fresh_var(&mut self) -> Term {
        Term::Var(self.fresh_var_name())
    }

    pub fn fresh_var_name(&mut self) -> Symbol {
        let n = self.next();
        Intern::new(format!("V{}", n))
    }

    /// `_<n>`, the spelling used for anonymous variables.
    pub fn fresh_anonymous(&mut self) -> Term {
        let n = self.next();
        Term::Var(Intern::new(format!("_{}", n)))
    }

    /// `c<n>`
    pub fn fresh_symbol(&mut self) -> Term {
        let n = self.next();
        Term::Sym(Intern::new(format!("c{}", n)))
    }
}
