//! Symbolic variables standing for the cells of the structures searched for.
//!
//! Stores are created once per search and hand out the [`Var`] handles of their cells by
//! coordinates. Coordinates are expected to be in range; out-of-range coordinates panic, like slice
//! indexing.

crate::prelude!();

/// Integer variables of a multiplication table over `{0, ..., n-1}`, plus the identity element.
///
/// The identity is declared first, then the cells row-major.
#[derive(Debug, Clone)]
pub struct TableVars {
    /// Size of the carrier.
    size: usize,
    /// Variable for the identity element.
    identity: Var,
    /// Cells, row-major.
    cells: Vec<Var>,
}
impl TableVars {
    /// Declares the variables of a table of size `size` in `solver`.
    pub fn new<S: Backend + ?Sized>(size: usize, solver: &mut S) -> Res<Self> {
        let identity = solver
            .declare(Typ::Int)
            .chain_err(|| "while declaring the identity variable")?;
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let var = solver
                    .declare(Typ::Int)
                    .chain_err(|| format!("while declaring table cell ({}, {})", row, col))?;
                cells.push(var)
            }
        }
        debug!(size, vars = cells.len() + 1, "declared multiplication table");
        Ok(Self {
            size,
            identity,
            cells,
        })
    }

    /// Size of the carrier.
    pub fn size(&self) -> usize {
        self.size
    }
    /// Variable for the identity element.
    pub fn identity(&self) -> Var {
        self.identity
    }
    /// Variable for `row * col`.
    pub fn get(&self, row: usize, col: usize) -> Var {
        assert!(
            row < self.size && col < self.size,
            "table coordinates ({}, {}) out of range for size {}",
            row,
            col,
            self.size,
        );
        self.cells[row * self.size + col]
    }

    /// All the variables, identity first.
    pub fn all(&self) -> impl Iterator<Item = Var> + '_ {
        Some(self.identity)
            .into_iter()
            .chain(self.cells.iter().copied())
    }
}

/// Boolean variables of a relation over the subsets of a universe `{0, ..., n-1}`.
///
/// Cell `(i, j)` stands for "subset `i` is related to subset `j`", where subsets are
/// [bitmasks](crate::bits). Declared row-major.
#[derive(Debug, Clone)]
pub struct RelationVars {
    /// Size of the universe.
    universe: usize,
    /// Number of subsets, `2^universe`.
    size: usize,
    /// Cells, row-major.
    cells: Vec<Var>,
}
impl RelationVars {
    /// Declares the variables of a relation over the powerset of a universe of size `universe`.
    pub fn new<S: Backend + ?Sized>(universe: usize, solver: &mut S) -> Res<Self> {
        if universe >= Mask::BITS as usize {
            bail!(Error::config(format!(
                "universe size {} does not fit bitmasks",
                universe
            )))
        }
        let size = bits::powerset_size(universe);
        let mut cells = Vec::with_capacity(size * size);
        for lft in 0..size {
            for rgt in 0..size {
                let var = solver
                    .declare(Typ::Bool)
                    .chain_err(|| format!("while declaring relation cell ({}, {})", lft, rgt))?;
                cells.push(var)
            }
        }
        debug!(universe, size, vars = cells.len(), "declared relation matrix");
        Ok(Self {
            universe,
            size,
            cells,
        })
    }

    /// Size of the universe.
    pub fn universe(&self) -> usize {
        self.universe
    }
    /// Number of subsets of the universe, *i.e.* dimension of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }
    /// Variable for "`lft` is related to `rgt`".
    pub fn get(&self, lft: Mask, rgt: Mask) -> Var {
        assert!(
            lft < self.size && rgt < self.size,
            "relation coordinates ({}, {}) out of range for size {}",
            lft,
            rgt,
            self.size,
        );
        self.cells[lft * self.size + rgt]
    }

    /// All the variables, row-major.
    pub fn all(&self) -> impl Iterator<Item = Var> + '_ {
        self.cells.iter().copied()
    }
}
