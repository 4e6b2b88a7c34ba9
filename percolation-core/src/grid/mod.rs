//! The percolation grid.
//!
//! An N-by-N grid of sites addressed by 1-indexed `(row, col)` coordinates.
//! Sites start blocked and can only be opened. Two union-find structures over
//! `N² + 2` elements track connectivity incrementally:
//!
//! - the *full* structure joins open sites and the virtual top node
//!   (`N²`) and answers [`Percolation::is_full`];
//! - the *percolation* structure additionally joins bottom-row sites to the
//!   virtual bottom node (`N² + 1`) and answers [`Percolation::percolates`].
//!
//! The bottom node never enters the full structure. Otherwise, once the grid
//! percolates, every open bottom-row site would reach the top through the
//! bottom node and report itself as full (backwash).

use crate::{
    error::{PercolationError, Result},
    union_find::WeightedUnionFind,
};

/// Maps the 1-indexed site `(row, col)` of an `size`-wide grid onto its
/// 0-indexed row-major position.
///
/// Callers are responsible for bounds checking; the mapping is a bijection
/// from `[1, size]²` onto `[0, size²)`.
///
/// # Examples
/// ```
/// use percolation_core::row_major_index;
///
/// assert_eq!(row_major_index(1, 1, 3), 0);
/// assert_eq!(row_major_index(2, 1, 3), 3);
/// assert_eq!(row_major_index(3, 3, 3), 8);
/// ```
#[must_use]
pub const fn row_major_index(row: usize, col: usize, size: usize) -> usize {
    (row - 1) * size + (col - 1)
}

/// Percolation system on an N-by-N grid.
///
/// # Examples
/// ```
/// use percolation_core::Percolation;
///
/// let mut grid = Percolation::new(2).expect("size is positive");
/// grid.open(1, 1).expect("site is on the grid");
/// assert!(grid.is_full(1, 1).expect("site is on the grid"));
/// assert!(!grid.percolates());
///
/// grid.open(2, 1).expect("site is on the grid");
/// assert!(grid.percolates());
/// assert!(!grid.is_full(2, 2).expect("site is on the grid"));
/// ```
#[derive(Clone, Debug)]
pub struct Percolation {
    size: usize,
    open: Vec<bool>,
    open_sites: usize,
    full: WeightedUnionFind,
    percolation: WeightedUnionFind,
}

impl Percolation {
    /// Creates a `size`-by-`size` grid with every site blocked.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`] when `size == 0` and
    /// [`PercolationError::GridTooLarge`] when `size² + 2` does not fit in
    /// `usize` or the site and connectivity buffers cannot be allocated.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(PercolationError::InvalidGridSize { got: size });
        }
        let site_count = size
            .checked_mul(size)
            .ok_or(PercolationError::GridTooLarge { size })?;
        let universe = site_count
            .checked_add(2)
            .ok_or(PercolationError::GridTooLarge { size })?;

        let mut open = Vec::new();
        open.try_reserve_exact(site_count)
            .map_err(|_| PercolationError::GridTooLarge { size })?;
        let full = connectivity(size, universe)?;
        let percolation = connectivity(size, universe)?;
        open.resize(site_count, false);

        Ok(Self {
            size,
            open,
            open_sites: 0,
            full,
            percolation,
        })
    }

    /// Returns the grid dimension N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns how many sites are currently open.
    #[must_use]
    pub fn open_sites(&self) -> usize {
        self.open_sites
    }

    /// Opens the site at `(row, col)` and joins it to its open neighbours.
    ///
    /// Opening an already open site is a no-op.
    ///
    /// # Errors
    /// Returns [`PercolationError::SiteOutOfBounds`] unless
    /// `1 <= row, col <= size`. The grid is not modified in that case.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.site_index(row, col)?;
        if self.open[site] {
            return Ok(());
        }

        // Operands are validated sites, their in-grid neighbours and the two
        // virtual nodes, all inside both universes. The site is marked open
        // only after every union has gone through.
        let neighbours = self.open_neighbours(row, col);
        let top = self.top();
        let bottom = self.bottom();

        for neighbour in neighbours.into_iter().flatten() {
            self.percolation.union(neighbour, site)?;
            self.full.union(neighbour, site)?;
        }

        if row == 1 && !self.full.connected(top, site)? {
            self.percolation.union(top, site)?;
            self.full.union(top, site)?;
        }

        if row == self.size {
            self.percolation.union(site, bottom)?;
        }

        self.open[site] = true;
        self.open_sites += 1;
        Ok(())
    }

    /// Reports whether the site at `(row, col)` is open.
    ///
    /// # Errors
    /// Returns [`PercolationError::SiteOutOfBounds`] unless
    /// `1 <= row, col <= size`.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.site_index(row, col)?;
        Ok(self.open[site])
    }

    /// Reports whether the site at `(row, col)` is open and connected to the
    /// top row through a chain of open neighbours.
    ///
    /// # Errors
    /// Returns [`PercolationError::SiteOutOfBounds`] unless
    /// `1 <= row, col <= size`.
    pub fn is_full(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.site_index(row, col)?;
        if !self.open[site] {
            return Ok(false);
        }
        self.full.connected(self.top(), site)
    }

    /// Reports whether the open sites connect the top row to the bottom row.
    #[must_use]
    pub fn percolates(&self) -> bool {
        let joined = self.percolation.connected(self.top(), self.bottom());
        debug_assert!(
            joined.is_ok(),
            "virtual nodes must lie inside the percolation universe"
        );
        joined.unwrap_or(false)
    }

    fn top(&self) -> usize {
        self.size * self.size
    }

    fn bottom(&self) -> usize {
        self.size * self.size + 1
    }

    fn site_index(&self, row: usize, col: usize) -> Result<usize> {
        let in_range = |value: usize| (1..=self.size).contains(&value);
        if in_range(row) && in_range(col) {
            Ok(row_major_index(row, col, self.size))
        } else {
            Err(PercolationError::SiteOutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    /// Flat indices of the open sites among the four grid neighbours.
    fn open_neighbours(&self, row: usize, col: usize) -> [Option<usize>; 4] {
        let size = self.size;
        [
            (row > 1).then(|| (row - 1, col)),
            (row < size).then(|| (row + 1, col)),
            (col > 1).then(|| (row, col - 1)),
            (col < size).then(|| (row, col + 1)),
        ]
        .map(|candidate| {
            candidate
                .map(|(r, c)| row_major_index(r, c, size))
                .filter(|&index| self.open[index])
        })
    }
}

/// Allocates one connectivity structure over `universe` elements, reporting
/// allocation failure against the grid dimension.
fn connectivity(size: usize, universe: usize) -> Result<WeightedUnionFind> {
    WeightedUnionFind::new(universe).map_err(|err| match err {
        PercolationError::UniverseTooLarge { .. } => PercolationError::GridTooLarge { size },
        other => other,
    })
}

#[cfg(test)]
mod property;
