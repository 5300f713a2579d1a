//! Search configuration.

crate::prelude!();

use solver::{Search, Z3};


/// Default ceiling on the size of preorder universes.
///
/// A universe of size `n` yields `4^n` variables and `8^n` transitivity assertions.
pub const MAX_UNIVERSE: usize = 6;

/// Configuration of a search: structure family, size and axioms.
///
/// For groups the size is the cardinality of the carrier, for preorders it is the size of the
/// universe whose powerset the relation ranges over.
///
/// # Examples
///
/// ```rust
/// # use finmodel::prelude::*;
/// let conf = Conf::group(4).with(Axiom::Commutativity);
/// assert!(conf.check().is_ok());
/// assert!(conf.axioms().contains(&Axiom::Associativity));
///
/// let conf = Conf::preorder(3)
///     .with(Axiom::Monotonicity)
///     .with(Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty));
/// assert_eq!(conf.axioms().len(), 4);
///
/// assert!(Conf::preorder(7).check().unwrap_err().is_config());
/// assert!(Conf::group(3).with(Axiom::Reflexivity).check().unwrap_err().is_usage());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conf {
    kind: Kind,
    size: usize,
    axioms: Set<Axiom>,
    max_universe: usize,
}
impl Conf {
    /// Constructor, uses the [default axioms](Kind::default_axioms) of `kind`.
    pub fn new(kind: Kind, size: usize) -> Self {
        Self {
            kind,
            size,
            axioms: kind.default_axioms().iter().copied().collect(),
            max_universe: MAX_UNIVERSE,
        }
    }
    /// Group search over a carrier of size `size`.
    pub fn group(size: usize) -> Self {
        Self::new(Kind::Group, size)
    }
    /// Preorder search over the powerset of a universe of size `universe`.
    pub fn preorder(universe: usize) -> Self {
        Self::new(Kind::Preorder, universe)
    }

    /// Adds an axiom.
    pub fn with(mut self, axiom: Axiom) -> Self {
        self.axioms.insert(axiom);
        self
    }
    /// Removes an axiom.
    pub fn without(mut self, axiom: Axiom) -> Self {
        self.axioms.remove(&axiom);
        self
    }
    /// Sets the ceiling on the size of preorder universes, [`MAX_UNIVERSE`] by default.
    pub fn with_max_universe(mut self, max_universe: usize) -> Self {
        self.max_universe = max_universe;
        self
    }

    /// Structure family.
    pub fn kind(&self) -> Kind {
        self.kind
    }
    /// Size of the carrier (groups) or of the universe (preorders).
    pub fn size(&self) -> usize {
        self.size
    }
    /// Axioms to encode.
    pub fn axioms(&self) -> &Set<Axiom> {
        &self.axioms
    }
    /// Ceiling on the size of preorder universes.
    pub fn max_universe(&self) -> usize {
        self.max_universe
    }

    /// Checks the configuration is legal.
    ///
    /// # Errors
    ///
    /// - [configuration error](Error::Config) if the size is `0`, or if the universe of a preorder
    ///   search is larger than the ceiling;
    /// - [usage error](Error::Usage) if an axiom belongs to the other family.
    pub fn check(&self) -> Res<()> {
        if self.size == 0 {
            bail!(Error::config(format!(
                "{} search of size 0, size must be at least 1",
                self.kind
            )))
        }
        if self.kind == Kind::Preorder {
            if self.size > self.max_universe {
                bail!(Error::config(format!(
                    "universe of size {} is above the ceiling ({}): {} variables, {} transitivity assertions",
                    self.size,
                    self.max_universe,
                    4u128.saturating_pow(self.size as u32),
                    8u128.saturating_pow(self.size as u32),
                )))
            }
            if self.size >= Mask::BITS as usize {
                bail!(Error::config(format!(
                    "universe of size {} does not fit bitmasks",
                    self.size
                )))
            }
        }
        if let Some(axiom) = self.axioms.iter().find(|axiom| axiom.kind() != self.kind) {
            bail!(Error::usage(format!(
                "{} axiom `{}` configured for a {} search",
                axiom.kind(),
                axiom,
                self.kind,
            )))
        }
        Ok(())
    }
}
impl fmt::Display for Conf {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} of size {} with", self.kind, self.size)?;
        for (idx, axiom) in self.axioms.iter().enumerate() {
            write!(fmt, "{} {}", if idx > 0 { "," } else { "" }, axiom)?;
        }
        Ok(())
    }
}

/// Backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverConf {
    /// SMT backend, see [`Z3`].
    Z3 {
        /// Z3 command line, extra words are passed as options.
        cmd: String,
        /// File to write the SMT-LIB session to.
        tee: Option<PathBuf>,
    },
    /// Built-in backend, see [`Search`].
    Search {
        /// Node budget per check.
        max_nodes: Option<u64>,
    },
}
impl Default for SolverConf {
    fn default() -> Self {
        Self::Search { max_nodes: None }
    }
}
impl SolverConf {
    /// Z3 with default options and no tee file.
    pub fn z3() -> Self {
        Self::Z3 {
            cmd: "z3".into(),
            tee: None,
        }
    }
    /// Built-in backend without node budget.
    pub fn search() -> Self {
        Self::default()
    }

    /// Creates the backend.
    pub fn spawn(&self) -> Res<Box<dyn Backend>> {
        match self {
            Self::Z3 { cmd, tee } => Ok(Box::new(Z3::new(cmd.clone(), tee.as_ref())?)),
            Self::Search { max_nodes: None } => Ok(Box::new(Search::new())),
            Self::Search {
                max_nodes: Some(max),
            } => Ok(Box::new(Search::with_max_nodes(*max))),
        }
    }
}
