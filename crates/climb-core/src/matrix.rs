//! Square boolean matrices over expression indices.
//!
//! Each row is a [`Vob`]; `m.at(i, j)` reads row `i`, bit `j`. Relations such
//! as "i may call j at its start" are stored this way and closed under
//! transitivity with [`BitMatrix::closure`].

use std::fmt;

use vob::Vob;

#[derive(Clone, PartialEq, Eq)]
pub struct BitMatrix {
    rows: Vec<Vob>,
}

impl BitMatrix {
    /// All-false matrix of `size` × `size`.
    pub fn new(size: usize) -> Self {
        let rows = (0..size).map(|_| empty_row(size)).collect();
        Self { rows }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn set(&mut self, i: usize, j: usize) {
        self.rows[i].set(j, true);
    }

    pub fn at(&self, i: usize, j: usize) -> bool {
        self.rows[i].get(j).unwrap_or(false)
    }

    pub fn row(&self, i: usize) -> &Vob {
        &self.rows[i]
    }

    /// Copy of column `j` as a bit vector over row indices.
    pub fn column(&self, j: usize) -> Vob {
        let mut col = empty_row(self.size());
        for (i, row) in self.rows.iter().enumerate() {
            if row.get(j).unwrap_or(false) {
                col.set(i, true);
            }
        }
        col
    }

    /// Number of set bits in the whole matrix.
    pub fn count(&self) -> usize {
        self.rows.iter().map(|r| r.iter_set_bits(..).count()).sum()
    }

    /// Smallest transitive relation containing `self` (Warshall, row-wise).
    pub fn closure(&self) -> Self {
        let mut rows = self.rows.clone();
        for k in 0..rows.len() {
            let via = rows[k].clone();
            for row in rows.iter_mut() {
                if row.get(k).unwrap_or(false) {
                    row.or(&via);
                }
            }
        }
        Self { rows }
    }
}

/// All-false bit vector with `len` entries.
pub fn empty_row(len: usize) -> Vob {
    let mut v = Vob::new();
    v.resize(len, false);
    v
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for bit in row.iter() {
                f.write_str(if bit { "1" } else { "." })?;
            }
        }
        Ok(())
    }
}
