//! Translation of axioms into constraints.
//!
//! Each encoder asserts the constraints of one axiom over the variables of a [store] into a
//! [`Backend`] session, and returns the number of assertions it made. Encoders are pure
//! translations: they never check satisfiability.
//!
//! Table cells hold integers, so a table lookup whose index is itself a cell (`(a*b)*c`) cannot be
//! written directly. Encoders case-split instead, writing one guarded implication per possible
//! value of the index: `table[a][b] = p => ... table[p][c] ...`.
//!
//! [store]: crate::store

crate::prelude!();

use store::{RelationVars, TableVars};

pub mod group;
pub mod preorder;


/// Structure families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Finite groups, as multiplication tables.
    Group,
    /// Preorders over the powerset of a finite universe, as boolean matrices.
    Preorder,
}
impl Kind {
    /// Name of the family.
    pub fn name(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Preorder => "preorder",
        }
    }

    /// Axioms searches of this family use unless told otherwise.
    pub fn default_axioms(self) -> &'static [Axiom] {
        match self {
            Self::Group => &[
                Axiom::Domain,
                Axiom::Identity,
                Axiom::Associativity,
                Axiom::Inverse,
            ],
            Self::Preorder => &[Axiom::Reflexivity, Axiom::Transitivity],
        }
    }

    /// All the axioms of this family.
    pub fn axioms(self) -> &'static [Axiom] {
        match self {
            Self::Group => &[
                Axiom::Domain,
                Axiom::Identity,
                Axiom::Associativity,
                Axiom::Inverse,
                Axiom::Commutativity,
            ],
            Self::Preorder => &[
                Axiom::Reflexivity,
                Axiom::Transitivity,
                Axiom::Monotonicity,
                Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty),
                Axiom::NonTrivial(NonTrivial::SomeStrictPair),
            ],
        }
    }
}
impl fmt::Display for Kind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}

/// Non-triviality flavors for preorders.
///
/// Neither implies the other in general, hence two distinct axioms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NonTrivial {
    /// The full set is not related to the empty set.
    FullNotBelowEmpty,
    /// Some pair of distinct subsets is strictly ordered: `R[i][j]` and not `R[j][i]`.
    SomeStrictPair,
}

/// Axioms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axiom {
    /// Group: all cells and the identity lie in the carrier.
    Domain,
    /// Group: `e*a = a*e = a`.
    Identity,
    /// Group: `(a*b)*c = a*(b*c)`.
    Associativity,
    /// Group: every element has a left and a right inverse.
    Inverse,
    /// Group, optional: `a*b = b*a`.
    Commutativity,
    /// Preorder: `R[i][i]`.
    Reflexivity,
    /// Preorder: `R[i][j] and R[j][k] => R[i][k]`.
    Transitivity,
    /// Preorder, optional: `i ⊆ j => R[i][j]`.
    Monotonicity,
    /// Preorder, optional: non-triviality.
    NonTrivial(NonTrivial),
}
impl Axiom {
    /// Family of the axiom.
    pub fn kind(self) -> Kind {
        match self {
            Self::Domain
            | Self::Identity
            | Self::Associativity
            | Self::Inverse
            | Self::Commutativity => Kind::Group,
            Self::Reflexivity | Self::Transitivity | Self::Monotonicity | Self::NonTrivial(_) => {
                Kind::Preorder
            }
        }
    }

    /// Name of the axiom.
    pub fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Identity => "identity",
            Self::Associativity => "associativity",
            Self::Inverse => "inverse",
            Self::Commutativity => "commutativity",
            Self::Reflexivity => "reflexivity",
            Self::Transitivity => "transitivity",
            Self::Monotonicity => "monotonicity",
            Self::NonTrivial(NonTrivial::FullNotBelowEmpty) => "full-not-below-empty",
            Self::NonTrivial(NonTrivial::SomeStrictPair) => "some-strict-pair",
        }
    }

    /// Retrieves an axiom from its name.
    ///
    /// ```rust
    /// # use finmodel::encode::{Axiom, NonTrivial};
    /// assert_eq!(Axiom::of_str("associativity"), Some(Axiom::Associativity));
    /// assert_eq!(
    ///     Axiom::of_str("some-strict-pair"),
    ///     Some(Axiom::NonTrivial(NonTrivial::SomeStrictPair)),
    /// );
    /// assert_eq!(Axiom::of_str("distributivity"), None);
    /// ```
    pub fn of_str(s: impl AsRef<str>) -> Option<Self> {
        let s = s.as_ref().trim();
        Kind::Group
            .axioms()
            .iter()
            .chain(Kind::Preorder.axioms())
            .find(|axiom| axiom.name() == s)
            .copied()
    }
}
impl fmt::Display for Axiom {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}

fn wrong_family(axiom: Axiom, kind: Kind) -> Error {
    Error::usage(format!(
        "cannot encode {} axiom `{}` on a {} structure",
        axiom.kind(),
        axiom,
        kind,
    ))
}

/// Encodes a group axiom.
pub fn group<S: Backend + ?Sized>(axiom: Axiom, vars: &TableVars, solver: &mut S) -> Res<usize> {
    match axiom {
        Axiom::Domain => group::domain(vars, solver),
        Axiom::Identity => group::identity(vars, solver),
        Axiom::Associativity => group::associativity(vars, solver),
        Axiom::Inverse => group::inverse(vars, solver),
        Axiom::Commutativity => group::commutativity(vars, solver),
        Axiom::Reflexivity | Axiom::Transitivity | Axiom::Monotonicity | Axiom::NonTrivial(_) => {
            bail!(wrong_family(axiom, Kind::Group))
        }
    }
}

/// Encodes a preorder axiom.
pub fn preorder<S: Backend + ?Sized>(
    axiom: Axiom,
    vars: &RelationVars,
    solver: &mut S,
) -> Res<usize> {
    match axiom {
        Axiom::Reflexivity => preorder::reflexivity(vars, solver),
        Axiom::Transitivity => preorder::transitivity(vars, solver),
        Axiom::Monotonicity => preorder::monotonicity(vars, solver),
        Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty) => {
            preorder::full_not_below_empty(vars, solver)
        }
        Axiom::NonTrivial(NonTrivial::SomeStrictPair) => preorder::some_strict_pair(vars, solver),
        Axiom::Domain
        | Axiom::Identity
        | Axiom::Associativity
        | Axiom::Inverse
        | Axiom::Commutativity => bail!(wrong_family(axiom, Kind::Preorder)),
    }
}
