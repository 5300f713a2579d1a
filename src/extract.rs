//! Concrete structures, read from a backend valuation.
//!
//! Extraction fails loudly on incomplete or ill-typed valuations: a variable without a value is a
//! [model error](crate::err::Error::Model), never a default value.

crate::prelude!();

use store::{RelationVars, TableVars};

#[cfg(test)]
mod test;

/// A concrete multiplication table.
///
/// Cells are *not* guaranteed to lie in the carrier, that is what [verification] is for.
///
/// [verification]: crate::verify
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTable {
    /// Size of the carrier.
    pub size: usize,
    /// Identity element.
    pub identity: usize,
    /// Rows of the table, `rows[a][b]` is `a*b`.
    pub rows: Vec<Vec<usize>>,
}
impl GroupTable {
    /// Constructor, fails if `rows` is empty or not square.
    ///
    /// ```rust
    /// # use finmodel::extract::GroupTable;
    /// let z2 = GroupTable::new(0, vec![vec![0, 1], vec![1, 0]]).unwrap();
    /// assert_eq!(z2.get(1, 1), Some(0));
    /// assert_eq!(z2.get(2, 0), None);
    /// assert!(GroupTable::new(0, vec![vec![0, 1], vec![1]]).is_err());
    /// ```
    pub fn new(identity: usize, rows: Vec<Vec<usize>>) -> Res<Self> {
        let size = rows.len();
        if size == 0 {
            bail!(Error::model("empty multiplication table"))
        }
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            bail!(Error::model(format!(
                "row {} of table of size {} has {} cell(s)",
                idx,
                size,
                row.len(),
            )))
        }
        Ok(Self {
            size,
            identity,
            rows,
        })
    }

    /// Value of `a*b`, `None` if `a` or `b` is out of range.
    pub fn get(&self, a: usize, b: usize) -> Option<usize> {
        self.rows.get(a).and_then(|row| row.get(b)).copied()
    }
}
impl fmt::Display for GroupTable {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let width = self.size.saturating_sub(1).to_string().len();
        write!(fmt, "{:>w$} |", "*", w = width)?;
        for col in 0..self.size {
            write!(fmt, " {:>w$}", col, w = width)?;
        }
        write!(fmt, "    (identity: {})", self.identity)?;
        writeln!(fmt)?;
        write!(fmt, "{}-+{}", "-".repeat(width), "-".repeat((width + 1) * self.size))?;
        for (idx, row) in self.rows.iter().enumerate() {
            writeln!(fmt)?;
            write!(fmt, "{:>w$} |", idx, w = width)?;
            for cell in row {
                write!(fmt, " {:>w$}", cell, w = width)?;
            }
        }
        Ok(())
    }
}

/// A concrete relation over the subsets of a universe.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Size of the universe.
    pub universe: usize,
    /// Rows of the matrix, `rows[i][j]` is true iff subset `i` is related to subset `j`.
    pub rows: Vec<Vec<bool>>,
}
impl Relation {
    /// Constructor, fails if `rows` is not a `2^universe x 2^universe` matrix.
    pub fn new(universe: usize, rows: Vec<Vec<bool>>) -> Res<Self> {
        if universe >= Mask::BITS as usize {
            bail!(Error::model(format!(
                "universe size {} does not fit bitmasks",
                universe
            )))
        }
        let size = bits::powerset_size(universe);
        if rows.len() != size || rows.iter().any(|row| row.len() != size) {
            bail!(Error::model(format!(
                "relation over a universe of size {} must be a {}x{} matrix",
                universe, size, size,
            )))
        }
        Ok(Self { universe, rows })
    }

    /// Number of subsets, *i.e.* dimension of the matrix.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// True if `lft` is related to `rgt`.
    ///
    /// Panics if either mask is out of range.
    pub fn get(&self, lft: Mask, rgt: Mask) -> bool {
        self.rows[lft][rgt]
    }
}
impl fmt::Display for Relation {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (lft, row) in self.rows.iter().enumerate() {
            if lft > 0 {
                writeln!(fmt)?;
            }
            write!(fmt, "{} |", bits::to_bit_string(lft, self.universe))?;
            for related in row {
                write!(fmt, " {}", if *related { 1 } else { 0 })?;
            }
            write!(fmt, "    {} ≤", bits::Subset::new(lft, self.universe))?;
            for (rgt, _) in row.iter().enumerate().filter(|(_, related)| **related) {
                write!(fmt, " {}", bits::Subset::new(rgt, self.universe))?;
            }
        }
        Ok(())
    }
}

fn value<'a>(model: &'a Valuation, var: Var) -> Res<&'a Cst> {
    model
        .get(var)
        .ok_or_else(|| Error::model(format!("no value for variable `{}`", var)).into())
}

fn index_value(model: &Valuation, var: Var) -> Res<usize> {
    match value(model, var)? {
        Cst::I(i) => match i.to_usize() {
            Some(idx) => Ok(idx),
            None => bail!(Error::model(format!(
                "value `{}` of variable `{}` is not a table index",
                Cst::I(i.clone()),
                var,
            ))),
        },
        cst => bail!(Error::model(format!(
            "variable `{}` has non-integer value `{}`",
            var, cst,
        ))),
    }
}

fn bool_value(model: &Valuation, var: Var) -> Res<bool> {
    match value(model, var)? {
        Cst::B(b) => Ok(*b),
        cst => bail!(Error::model(format!(
            "variable `{}` has non-boolean value `{}`",
            var, cst,
        ))),
    }
}

/// Reads a multiplication table from a valuation.
pub fn group(vars: &TableVars, model: &Valuation) -> Res<GroupTable> {
    let identity = index_value(model, vars.identity()).chain_err(|| "while reading identity")?;
    let mut rows = Vec::with_capacity(vars.size());
    for a in 0..vars.size() {
        let row = (0..vars.size())
            .map(|b| {
                index_value(model, vars.get(a, b))
                    .chain_err(|| format!("while reading cell ({}, {})", a, b))
            })
            .collect::<Res<Vec<_>>>()?;
        rows.push(row)
    }
    GroupTable::new(identity, rows)
}

/// Reads a relation from a valuation.
pub fn relation(vars: &RelationVars, model: &Valuation) -> Res<Relation> {
    let mut rows = Vec::with_capacity(vars.size());
    for lft in 0..vars.size() {
        let row = (0..vars.size())
            .map(|rgt| {
                bool_value(model, vars.get(lft, rgt))
                    .chain_err(|| format!("while reading cell ({}, {})", lft, rgt))
            })
            .collect::<Res<Vec<_>>>()?;
        rows.push(row)
    }
    Relation::new(vars.universe(), rows)
}
