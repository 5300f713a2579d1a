//! Independent re-verification of concrete structures.
//!
//! The checks below recompute the axioms directly over [extracted structures], without any
//! backend, and share no code with the [encoders]. A failed check is not an error: it is recorded
//! as a [`Verdict::Fail`] in the [`Report`], along with witness indices.
//!
//! Checks never panic, even on tables with out-of-range values.
//!
//! [extracted structures]: crate::extract
//! [encoders]: crate::encode

crate::prelude!();

use extract::{GroupTable, Relation};

#[cfg(test)]
mod test;

/// Result of checking one axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The axiom holds.
    Pass,
    /// The axiom does not hold.
    Fail {
        /// Indices exhibiting the failure, their meaning depends on the axiom.
        witness: Vec<usize>,
    },
}
impl Verdict {
    /// Failure constructor.
    pub fn fail(witness: impl Into<Vec<usize>>) -> Self {
        Self::Fail {
            witness: witness.into(),
        }
    }
    /// True on [`Verdict::Pass`].
    pub fn is_pass(&self) -> bool {
        *self == Self::Pass
    }
    /// Witness of a failure, if any.
    pub fn witness(&self) -> Option<&[usize]> {
        match self {
            Self::Pass => None,
            Self::Fail { witness } => Some(witness),
        }
    }
}
impl fmt::Display for Verdict {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Pass => write!(fmt, "pass"),
            Self::Fail { witness } => {
                write!(fmt, "fail")?;
                if !witness.is_empty() {
                    write!(fmt, " on")?;
                    for idx in witness {
                        write!(fmt, " {}", idx)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Verdicts for a set of axioms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    verdicts: Map<Axiom, Verdict>,
}
impl Report {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a verdict.
    fn insert(&mut self, axiom: Axiom, verdict: Verdict) {
        if !verdict.is_pass() {
            debug!(%axiom, %verdict, "axiom failed verification");
        }
        self.verdicts.insert(axiom, verdict);
    }

    /// True if all axioms pass.
    pub fn is_ok(&self) -> bool {
        self.verdicts.values().all(Verdict::is_pass)
    }

    /// Verdict for an axiom, `None` if it was not checked.
    pub fn get(&self, axiom: Axiom) -> Option<&Verdict> {
        self.verdicts.get(&axiom)
    }

    /// Number of axioms checked.
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }
    /// True if no axiom was checked.
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Iterator over all verdicts.
    pub fn iter(&self) -> impl Iterator<Item = (Axiom, &Verdict)> {
        self.verdicts.iter().map(|(axiom, verdict)| (*axiom, verdict))
    }
    /// Iterator over the axioms that passed.
    pub fn passed(&self) -> impl Iterator<Item = Axiom> + '_ {
        self.iter()
            .filter(|(_, verdict)| verdict.is_pass())
            .map(|(axiom, _)| axiom)
    }
    /// Iterator over the axioms that failed, with their witness.
    pub fn failures(&self) -> impl Iterator<Item = (Axiom, &[usize])> {
        self.iter()
            .filter_map(|(axiom, verdict)| verdict.witness().map(|witness| (axiom, witness)))
    }
}
impl fmt::Display for Report {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (idx, (axiom, verdict)) in self.iter().enumerate() {
            if idx > 0 {
                writeln!(fmt)?;
            }
            write!(fmt, "{}: {}", axiom, verdict)?;
        }
        Ok(())
    }
}

fn check_family(axioms: &Set<Axiom>, kind: Kind) -> Res<()> {
    if let Some(axiom) = axioms.iter().find(|axiom| axiom.kind() != kind) {
        bail!(Error::usage(format!(
            "cannot verify {} axiom `{}` on a {} structure",
            axiom.kind(),
            axiom,
            kind,
        )))
    }
    Ok(())
}

/// Verifies some group axioms over a table.
pub fn group(table: &GroupTable, axioms: impl IntoIterator<Item = Axiom>) -> Res<Report> {
    let axioms: Set<Axiom> = axioms.into_iter().collect();
    check_family(&axioms, Kind::Group)?;
    let mut report = Report::new();
    for axiom in axioms {
        let verdict = match axiom {
            Axiom::Domain => domain(table),
            Axiom::Identity => identity(table),
            Axiom::Associativity => associativity(table),
            Axiom::Inverse => inverse(table),
            Axiom::Commutativity => commutativity(table),
            Axiom::Reflexivity | Axiom::Transitivity | Axiom::Monotonicity | Axiom::NonTrivial(_) => {
                continue
            }
        };
        report.insert(axiom, verdict)
    }
    Ok(report)
}

/// Verifies some preorder axioms over a relation.
pub fn preorder(relation: &Relation, axioms: impl IntoIterator<Item = Axiom>) -> Res<Report> {
    let axioms: Set<Axiom> = axioms.into_iter().collect();
    check_family(&axioms, Kind::Preorder)?;
    let mut report = Report::new();
    for axiom in axioms {
        let verdict = match axiom {
            Axiom::Reflexivity => reflexivity(relation),
            Axiom::Transitivity => transitivity(relation),
            Axiom::Monotonicity => monotonicity(relation),
            Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty) => full_not_below_empty(relation),
            Axiom::NonTrivial(NonTrivial::SomeStrictPair) => some_strict_pair(relation),
            Axiom::Domain
            | Axiom::Identity
            | Axiom::Associativity
            | Axiom::Inverse
            | Axiom::Commutativity => continue,
        };
        report.insert(axiom, verdict)
    }
    Ok(report)
}

/// Identity and cells lie in the carrier.
///
/// Witness: the out-of-range identity, or the coordinates of an out-of-range cell.
pub fn domain(table: &GroupTable) -> Verdict {
    if table.identity >= table.size {
        return Verdict::fail([table.identity]);
    }
    for (a, row) in table.rows.iter().enumerate() {
        if let Some(b) = row.iter().position(|ab| *ab >= table.size) {
            return Verdict::fail([a, b]);
        }
    }
    Verdict::Pass
}

/// `e*a = a*e = a`. Witness: `a`.
pub fn identity(table: &GroupTable) -> Verdict {
    let e = table.identity;
    for a in 0..table.size {
        if table.get(e, a) != Some(a) || table.get(a, e) != Some(a) {
            return Verdict::fail([a]);
        }
    }
    Verdict::Pass
}

/// `(a*b)*c = a*(b*c)`. Witness: `a`, `b`, `c`.
pub fn associativity(table: &GroupTable) -> Verdict {
    let n = table.size;
    for a in 0..n {
        for b in 0..n {
            for c in 0..n {
                let lhs = table.get(a, b).and_then(|ab| table.get(ab, c));
                let rhs = table.get(b, c).and_then(|bc| table.get(a, bc));
                if lhs.is_none() || lhs != rhs {
                    return Verdict::fail([a, b, c]);
                }
            }
        }
    }
    Verdict::Pass
}

/// Every `a` has a two-sided inverse. Witness: `a`.
pub fn inverse(table: &GroupTable) -> Verdict {
    let e = Some(table.identity);
    for a in 0..table.size {
        let has_inverse = (0..table.size).any(|b| table.get(a, b) == e && table.get(b, a) == e);
        if !has_inverse {
            return Verdict::fail([a]);
        }
    }
    Verdict::Pass
}

/// `a*b = b*a`. Witness: `a`, `b`.
pub fn commutativity(table: &GroupTable) -> Verdict {
    for a in 0..table.size {
        for b in 0..a {
            if table.get(a, b) != table.get(b, a) {
                return Verdict::fail([b, a]);
            }
        }
    }
    Verdict::Pass
}

/// Every row and every column is a permutation of the carrier.
///
/// Holds for any group table; not an axiom. Witness: coordinates of a cell whose value is out of
/// range or repeats an earlier value of its row/column.
pub fn latin_square(table: &GroupTable) -> Verdict {
    let n = table.size;
    for fixed in 0..n {
        let (mut in_row, mut in_col) = (vec![false; n], vec![false; n]);
        for moving in 0..n {
            for (a, b, seen) in [(fixed, moving, &mut in_row), (moving, fixed, &mut in_col)] {
                match table.get(a, b) {
                    Some(val) if val < n && !seen[val] => seen[val] = true,
                    _ => return Verdict::fail([a, b]),
                }
            }
        }
    }
    Verdict::Pass
}

/// `R[i][i]`. Witness: `i`.
pub fn reflexivity(relation: &Relation) -> Verdict {
    match (0..relation.size()).find(|i| !relation.get(*i, *i)) {
        Some(i) => Verdict::fail([i]),
        None => Verdict::Pass,
    }
}

/// `R[i][j] and R[j][k] => R[i][k]`. Witness: `i`, `j`, `k`.
pub fn transitivity(relation: &Relation) -> Verdict {
    let size = relation.size();
    for i in 0..size {
        for j in (0..size).filter(|j| relation.get(i, *j)) {
            for k in (0..size).filter(|k| relation.get(j, *k)) {
                if !relation.get(i, k) {
                    return Verdict::fail([i, j, k]);
                }
            }
        }
    }
    Verdict::Pass
}

/// `i ⊆ j => R[i][j]`. Witness: `i`, `j`.
pub fn monotonicity(relation: &Relation) -> Verdict {
    let size = relation.size();
    for i in 0..size {
        for j in 0..size {
            // `i ⊆ j` iff `i ∪ j = j`
            if (i | j) == j && !relation.get(i, j) {
                return Verdict::fail([i, j]);
            }
        }
    }
    Verdict::Pass
}

/// The full set is not related to the empty set. Witness: the full and empty masks.
pub fn full_not_below_empty(relation: &Relation) -> Verdict {
    let (full, empty) = (relation.size() - 1, 0);
    if relation.get(full, empty) {
        Verdict::fail([full, empty])
    } else {
        Verdict::Pass
    }
}

/// Some `i != j` with `R[i][j]` and not `R[j][i]`. Fails with an empty witness.
pub fn some_strict_pair(relation: &Relation) -> Verdict {
    let size = relation.size();
    let found = (0..size)
        .any(|i| (0..size).any(|j| i != j && relation.get(i, j) && !relation.get(j, i)));
    if found {
        Verdict::Pass
    } else {
        Verdict::Fail { witness: vec![] }
    }
}
