use crate::core::chunk::Chunk;

/// Side length of the smallest square holding `count` cells: `ceil(sqrt(count))`.
pub fn grid_dim(count: usize) -> usize {
    let root = count.isqrt();
    if root * root == count { root } else { root + 1 }
}

/// Square arrangement of chunks in row-major order.
///
/// Built in two phases: the raw chunks are kept as produced, and the cell
/// list is a separate padded copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dim: usize,
    raw: Vec<Chunk>,
    cells: Vec<Chunk>,
}

impl Grid {
    pub fn new(raw: Vec<Chunk>) -> Self {
        let dim = grid_dim(raw.len());
        let cells = pad_to_square(&raw, dim);
        Self { dim, raw, cells }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Chunks taken from the transaction, before padding.
    pub fn raw_chunks(&self) -> &[Chunk] {
        &self.raw
    }

    /// All `dim * dim` cells, padding included.
    pub fn cells(&self) -> &[Chunk] {
        &self.cells
    }

    /// `(column, row)` of cell `index`.
    pub fn position(&self, index: usize) -> (usize, usize) {
        cell_position(index, self.dim)
    }

    /// Cells with their `(column, row)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Chunk)> + '_ {
        self.cells.iter().enumerate().map(|(i, chunk)| {
            let (col, row) = self.position(i);
            (col, row, chunk)
        })
    }
}

/// Row-major placement: index `i` lands at column `i % dim`, row `i / dim`.
pub fn cell_position(index: usize, dim: usize) -> (usize, usize) {
    (index % dim, index / dim)
}

/// Copy `raw` and append zero chunks up to `dim * dim` entries.
pub fn pad_to_square(raw: &[Chunk], dim: usize) -> Vec<Chunk> {
    let total = dim * dim;
    let mut cells = Vec::with_capacity(total.max(raw.len()));
    cells.extend_from_slice(raw);
    cells.resize(total.max(raw.len()), Chunk::ZERO);
    cells
}
