use percolation_core::{Percolation, SiteSampler};

/// Replays `(row, col)` pairs in order, wrapping around at the end.
pub struct Replay {
    sites: Vec<(usize, usize)>,
    next: usize,
    pending_col: Option<usize>,
}

impl Replay {
    #[must_use]
    pub fn new(sites: &[(usize, usize)]) -> Self {
        Self {
            sites: sites.to_vec(),
            next: 0,
            pending_col: None,
        }
    }
}

impl SiteSampler for Replay {
    fn uniform(&mut self, _lo: usize, _hi: usize) -> usize {
        if let Some(col) = self.pending_col.take() {
            return col;
        }
        let (row, col) = self.sites[self.next % self.sites.len()];
        self.next += 1;
        self.pending_col = Some(col);
        row
    }
}

/// Builds a grid with the listed sites opened in order.
pub fn grid_with(size: usize, sites: &[(usize, usize)]) -> Percolation {
    let mut grid = Percolation::new(size).expect("size is positive");
    for &(row, col) in sites {
        grid.open(row, col).expect("site is on the grid");
    }
    grid
}
