//! Search orchestration.
//!
//! A [`Finder`] owns a backend session, the variables of the structure searched for and its
//! configuration. It encodes the configured axioms, runs the check and, on `sat`, extracts and
//! verifies the structure.
//!
//! ```rust
//! # use finmodel::prelude::*;
//! use finmodel::{find::{Answer, GroupFinder}, solver::Search};
//!
//! let mut finder = GroupFinder::new(Conf::group(3), Search::new()).unwrap();
//! match finder.run().unwrap() {
//!     Answer::Found { structure, report } => {
//!         assert!(report.is_ok());
//!         assert!(verify::latin_square(&structure).is_pass());
//!         println!("{}", structure);
//!     }
//!     answer => panic!("unexpected answer `{}`", answer.outcome()),
//! }
//! ```

crate::prelude!();

use std::marker::PhantomData;

use extract::{GroupTable, Relation};
use store::{RelationVars, TableVars};
use verify::Report;

#[cfg(test)]
mod test;

/// Family-specific parts of a search.
pub trait Theory {
    /// Family of the structures.
    const KIND: Kind;
    /// Symbolic variables of a structure.
    type Vars;
    /// Concrete structures.
    type Structure: fmt::Display;

    /// Declares the variables of a structure of some size.
    fn declare<S: Backend + ?Sized>(size: usize, solver: &mut S) -> Res<Self::Vars>;
    /// Encodes an axiom, returns the number of assertions made.
    fn encode<S: Backend + ?Sized>(axiom: Axiom, vars: &Self::Vars, solver: &mut S)
        -> Res<usize>;
    /// Extracts a concrete structure from a valuation.
    fn extract(vars: &Self::Vars, model: &Valuation) -> Res<Self::Structure>;
    /// Verifies some axioms over a concrete structure.
    fn verify(structure: &Self::Structure, axioms: &Set<Axiom>) -> Res<Report>;
}

/// Finite groups.
#[derive(Debug, Clone, Copy)]
pub struct Group;
impl Theory for Group {
    const KIND: Kind = Kind::Group;
    type Vars = TableVars;
    type Structure = GroupTable;

    fn declare<S: Backend + ?Sized>(size: usize, solver: &mut S) -> Res<TableVars> {
        TableVars::new(size, solver)
    }
    fn encode<S: Backend + ?Sized>(axiom: Axiom, vars: &TableVars, solver: &mut S) -> Res<usize> {
        encode::group(axiom, vars, solver)
    }
    fn extract(vars: &TableVars, model: &Valuation) -> Res<GroupTable> {
        extract::group(vars, model)
    }
    fn verify(structure: &GroupTable, axioms: &Set<Axiom>) -> Res<Report> {
        verify::group(structure, axioms.iter().copied())
    }
}

/// Preorders over a powerset.
#[derive(Debug, Clone, Copy)]
pub struct Preorder;
impl Theory for Preorder {
    const KIND: Kind = Kind::Preorder;
    type Vars = RelationVars;
    type Structure = Relation;

    fn declare<S: Backend + ?Sized>(universe: usize, solver: &mut S) -> Res<RelationVars> {
        RelationVars::new(universe, solver)
    }
    fn encode<S: Backend + ?Sized>(
        axiom: Axiom,
        vars: &RelationVars,
        solver: &mut S,
    ) -> Res<usize> {
        encode::preorder(axiom, vars, solver)
    }
    fn extract(vars: &RelationVars, model: &Valuation) -> Res<Relation> {
        extract::relation(vars, model)
    }
    fn verify(structure: &Relation, axioms: &Set<Axiom>) -> Res<Report> {
        verify::preorder(structure, axioms.iter().copied())
    }
}

/// Result of a complete search, see [`Finder::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<Structure> {
    /// A structure was found.
    Found {
        /// The structure.
        structure: Structure,
        /// Verification report for the configured axioms.
        report: Report,
    },
    /// No structure satisfies the axioms.
    Unsat,
    /// The backend could not decide.
    Unknown,
}
impl<Structure> Answer<Structure> {
    /// Outcome of the check this answer comes from.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Found { .. } => Outcome::Sat,
            Self::Unsat => Outcome::Unsat,
            Self::Unknown => Outcome::Unknown,
        }
    }
    /// Structure found, if any.
    pub fn structure(&self) -> Option<&Structure> {
        match self {
            Self::Found { structure, .. } => Some(structure),
            Self::Unsat | Self::Unknown => None,
        }
    }
    /// Verification report, if a structure was found.
    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Found { report, .. } => Some(report),
            Self::Unsat | Self::Unknown => None,
        }
    }
}

/// Group finder.
pub type GroupFinder<S> = Finder<S, Group>;
/// Preorder finder.
pub type PreorderFinder<S> = Finder<S, Preorder>;

/// Search orchestrator.
pub struct Finder<S: Backend, T: Theory> {
    /// Backend session.
    solver: S,
    /// Symbolic structure.
    vars: T::Vars,
    /// Configuration.
    conf: Conf,
    /// Axioms already asserted.
    encoded: Set<Axiom>,
    /// Outcome of the last check, `None` if there is none or if assertions were made since.
    outcome: Option<Outcome>,
    _theory: PhantomData<T>,
}
impl<S: Backend, T: Theory> Finder<S, T> {
    /// Constructor, declares the variables of the structure in `solver`.
    ///
    /// # Errors
    ///
    /// - when `conf` is illegal, see [`Conf::check`];
    /// - [usage error](Error::Usage) if `conf` is for another structure family.
    pub fn new(conf: Conf, mut solver: S) -> Res<Self> {
        conf.check()?;
        if conf.kind() != T::KIND {
            bail!(Error::usage(format!(
                "cannot build a {} finder from a {} configuration",
                T::KIND,
                conf.kind(),
            )))
        }
        solver.comment(&format!("{}", conf))?;
        let vars = T::declare(conf.size(), &mut solver)
            .chain_err(|| format!("while declaring {} variables", T::KIND))?;
        info!(kind = %T::KIND, size = conf.size(), "finder ready");
        Ok(Self {
            solver,
            vars,
            conf,
            encoded: Set::new(),
            outcome: None,
            _theory: PhantomData,
        })
    }

    /// Configuration.
    pub fn conf(&self) -> &Conf {
        &self.conf
    }
    /// Symbolic structure, to build extra constraints for [`Self::assert`].
    pub fn vars(&self) -> &T::Vars {
        &self.vars
    }
    /// Outcome of the last check, if any and if nothing was asserted since.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
    /// Backend session.
    pub fn solver(&self) -> &S {
        &self.solver
    }
    /// Destroys the finder, yields the backend session.
    pub fn into_solver(self) -> S {
        self.solver
    }

    /// Asserts the configured axioms that are not asserted yet.
    ///
    /// Returns the number of assertions made.
    pub fn encode(&mut self) -> Res<usize> {
        let mut total = 0;
        for axiom in self.conf.axioms() {
            if self.encoded.contains(axiom) {
                continue;
            }
            self.solver.comment(&format!("{} axiom", axiom))?;
            let count = T::encode(*axiom, &self.vars, &mut self.solver)
                .chain_err(|| format!("while encoding {} axiom `{}`", T::KIND, axiom))?;
            debug!(%axiom, assertions = count, "encoded axiom");
            self.encoded.insert(*axiom);
            self.outcome = None;
            total += count;
        }
        Ok(total)
    }

    /// Asserts an extra constraint, typically built over [`Self::vars`].
    pub fn assert(&mut self, expr: &Expr) -> Res<()> {
        let typ = expr.typ()?;
        if typ != Typ::Bool {
            bail!("cannot assert `{}` of type `{}`", expr, typ)
        }
        self.solver.comment("extra constraint")?;
        self.solver.assert(expr)?;
        self.outcome = None;
        Ok(())
    }

    /// Encodes the axioms if needed and checks satisfiability.
    pub fn solve(&mut self) -> Res<Outcome> {
        let assertions = self.encode()?;
        let outcome = self
            .solver
            .check_sat()
            .chain_err(|| format!("while searching for a {}", T::KIND))?;
        info!(kind = %T::KIND, size = self.conf.size(), assertions, %outcome, "check done");
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    /// Extracts the structure found by the last check.
    ///
    /// # Errors
    ///
    /// - [usage error](Error::Usage) if the last check did not yield [`Outcome::Sat`];
    /// - [model error](Error::Model) if the backend's model does not cover the structure.
    pub fn extract(&mut self) -> Res<T::Structure> {
        match self.outcome {
            Some(Outcome::Sat) => (),
            Some(outcome) => bail!(Error::usage(format!(
                "cannot extract a {} after an `{}` check",
                T::KIND,
                outcome,
            ))),
            None => bail!(Error::usage(format!(
                "cannot extract a {} before solving",
                T::KIND
            ))),
        }
        let model = self.solver.valuation()?;
        T::extract(&self.vars, &model)
    }

    /// Verifies the configured axioms over a structure.
    pub fn verify(&self, structure: &T::Structure) -> Res<Report> {
        T::verify(structure, self.conf.axioms())
    }

    /// Solves, and on success extracts and verifies the structure.
    pub fn run(&mut self) -> Res<Answer<T::Structure>> {
        let answer = match self.solve()? {
            Outcome::Sat => {
                let structure = self.extract()?;
                let report = self.verify(&structure)?;
                if !report.is_ok() {
                    warn!(
                        kind = %T::KIND,
                        failures = report.failures().count(),
                        "extracted structure fails verification",
                    )
                }
                Answer::Found { structure, report }
            }
            Outcome::Unsat => Answer::Unsat,
            Outcome::Unknown => Answer::Unknown,
        };
        Ok(answer)
    }
}
