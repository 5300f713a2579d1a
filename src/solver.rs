//! Decision procedure backends.
//!
//! A [`Backend`] is one solver session: it hands out variable handles, accepts assertions, decides
//! satisfiability and produces a [`Valuation`] of the declared variables. Two implementations are
//! provided:
//!
//! - [`smt::Z3`] drives a `z3` process through [`rsmt2`], for real searches;
//! - [`search::Search`] is a small built-in backtracking procedure over finite domains, which
//!   needs no external binary and is used by the test suite.
//!
//! Integer variables are unbounded when declared; finite-domain searches bound them by asserting
//! `(>= v lo)` and `(< v hi)`.

crate::prelude!();

pub mod search;
pub mod smt;

#[cfg(test)]
mod test;

pub use search::Search;
pub use smt::Z3;

/// Result of a satisfiability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The assertions have a model.
    Sat,
    /// The assertions provably have no model.
    Unsat,
    /// The backend could not decide (incompleteness, resource limits...).
    Unknown,
}
impl Outcome {
    /// True on [`Outcome::Sat`].
    pub fn is_sat(self) -> bool {
        self == Self::Sat
    }
    /// True on [`Outcome::Unsat`].
    pub fn is_unsat(self) -> bool {
        self == Self::Unsat
    }
    /// True on [`Outcome::Unknown`].
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }
}
impl fmt::Display for Outcome {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Sat => write!(fmt, "sat"),
            Self::Unsat => write!(fmt, "unsat"),
            Self::Unknown => write!(fmt, "unknown"),
        }
    }
}

/// A model produced by a backend: values for (some of) the declared variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Valuation {
    /// Map from variable indices to values.
    values: Map<usize, Cst>,
}
impl Valuation {
    /// Empty valuation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a variable.
    ///
    /// # Errors
    ///
    /// - when `var` already has a value;
    /// - when `cst` does not have the type of `var`.
    pub fn insert(&mut self, var: Var, cst: Cst) -> Res<()> {
        if cst.typ() != var.typ() {
            bail!(
                "trying to give value `{}` of type `{}` to variable `{}` of type `{}`",
                cst,
                cst.typ(),
                var,
                var.typ(),
            )
        }
        if self.values.contains_key(&var.idx()) {
            bail!("trying to insert a value for {} twice", var)
        }
        self.values.insert(var.idx(), cst);
        Ok(())
    }

    /// Value of a variable.
    pub fn get(&self, var: Var) -> Option<&Cst> {
        self.values.get(&var.idx())
    }

    /// Number of variables with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }
    /// True if no variable has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A solver session.
pub trait Backend {
    /// Declares a fresh variable of some type.
    ///
    /// The handle returned is distinct from all the handles previously returned by `self`.
    fn declare(&mut self, typ: Typ) -> Res<Var>;

    /// Asserts a boolean expression over variables declared by `self`.
    fn assert(&mut self, expr: &Expr) -> Res<()>;

    /// Attaches a comment to the session, for backends that keep a trace.
    fn comment(&mut self, _txt: &str) -> Res<()> {
        Ok(())
    }

    /// Checks the satisfiability of the assertions so far.
    ///
    /// May block for an unbounded amount of time.
    fn check_sat(&mut self) -> Res<Outcome>;

    /// Retrieves the model of the last check.
    ///
    /// Only legal right after a check that returned [`Outcome::Sat`].
    fn valuation(&mut self) -> Res<Valuation>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn declare(&mut self, typ: Typ) -> Res<Var> {
        (**self).declare(typ)
    }
    fn assert(&mut self, expr: &Expr) -> Res<()> {
        (**self).assert(expr)
    }
    fn comment(&mut self, txt: &str) -> Res<()> {
        (**self).comment(txt)
    }
    fn check_sat(&mut self) -> Res<Outcome> {
        (**self).check_sat()
    }
    fn valuation(&mut self) -> Res<Valuation> {
        (**self).valuation()
    }
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn declare(&mut self, typ: Typ) -> Res<Var> {
        (**self).declare(typ)
    }
    fn assert(&mut self, expr: &Expr) -> Res<()> {
        (**self).assert(expr)
    }
    fn comment(&mut self, txt: &str) -> Res<()> {
        (**self).comment(txt)
    }
    fn check_sat(&mut self) -> Res<Outcome> {
        (**self).check_sat()
    }
    fn valuation(&mut self) -> Res<Valuation> {
        (**self).valuation()
    }
}
