use crate::StrError;
use russell_sparse::{CooMatrix, CsrMatrix, Sym};

/// Holds the global matrix of a linear system with a fixed sparsity pattern
///
/// The entries are assembled as triplets into a [CooMatrix] and compressed into a [CsrMatrix]
/// for the iterative methods; duplicates are summed up by the compression. Each assembly
/// starts with zeros at all entries of the pattern; thus, the compressed matrix always has the
/// structure of the pattern, with sorted column indices in each row.
pub struct GlobalMatrix {
    /// Number of rows (equal to the number of columns)
    nrow: usize,

    /// Sorted and unique column indices of each row
    pattern: Vec<Vec<usize>>,

    /// Position of the first entry of each row in the compressed arrays (len = nrow + 1)
    row_start: Vec<usize>,

    /// Triplets of the current assembly
    coo: CooMatrix,

    /// Compressed matrix (None until [GlobalMatrix::compress] is called after an assembly)
    csr: Option<CsrMatrix>,
}

impl GlobalMatrix {
    /// Allocates a new instance from the column indices of each row
    ///
    /// The column indices of a row may be given in any order and may contain duplicates.
    ///
    /// # Input
    ///
    /// * `pattern` -- the column indices of each row
    /// * `nnz_sup` -- the supremum of the number of calls to [GlobalMatrix::add] in one assembly
    pub fn new(pattern: &[Vec<usize>], nnz_sup: usize) -> Result<Self, StrError> {
        let nrow = pattern.len();
        if nrow < 1 {
            return Err("the matrix must have at least one row");
        }
        let mut sorted = Vec::with_capacity(nrow);
        let mut row_start = Vec::with_capacity(nrow + 1);
        row_start.push(0);
        for row in pattern {
            let mut cols = row.clone();
            cols.sort();
            cols.dedup();
            if let Some(&last) = cols.last() {
                if last >= nrow {
                    return Err("column index is out of bounds");
                }
            }
            row_start.push(row_start[row_start.len() - 1] + cols.len());
            sorted.push(cols);
        }
        let nnz = row_start[nrow];
        if nnz < 1 {
            return Err("the pattern must have at least one entry");
        }
        let mut mat = GlobalMatrix {
            nrow,
            pattern: sorted,
            row_start,
            coo: CooMatrix::new(nrow, nrow, nnz + nnz_sup, Sym::No)?,
            csr: None,
        };
        mat.reset()?;
        Ok(mat)
    }

    /// Returns the number of rows
    pub fn nrow(&self) -> usize {
        self.nrow
    }

    /// Returns the number of entries of the pattern
    pub fn nnz(&self) -> usize {
        self.row_start[self.nrow]
    }

    /// Starts a new assembly by putting zeros at all entries of the pattern
    pub fn reset(&mut self) -> Result<(), StrError> {
        self.coo.reset();
        self.csr = None;
        for (i, cols) in self.pattern.iter().enumerate() {
            for &j in cols {
                self.coo.put(i, j, 0.0)?;
            }
        }
        Ok(())
    }

    /// Finds the position of (i, j) in the arrays of the compressed matrix
    pub fn find_index(&self, i: usize, j: usize) -> Option<usize> {
        if i >= self.nrow {
            return None;
        }
        self.pattern[i].binary_search(&j).ok().map(|k| self.row_start[i] + k)
    }

    /// Adds a value to the entry (i, j)
    pub fn add(&mut self, i: usize, j: usize, value: f64) -> Result<(), StrError> {
        self.find_index(i, j).ok_or("entry is not in the sparsity pattern")?;
        self.csr = None;
        self.coo.put(i, j, value)
    }

    /// Compresses the assembled triplets (sums up duplicates)
    pub fn compress(&mut self) -> Result<(), StrError> {
        self.csr = Some(CsrMatrix::from_coo(&self.coo)?);
        Ok(())
    }

    /// Returns the triplets of the current assembly
    pub fn coo(&self) -> &CooMatrix {
        &self.coo
    }

    /// Returns the compressed matrix
    pub fn csr(&self) -> Result<&CsrMatrix, StrError> {
        self.csr.as_ref().ok_or("the global matrix must be compressed first")
    }

    /// Returns the value at (i, j) (zero if the entry is not in the pattern)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.triplets().filter(|(r, c, _)| *r == i && *c == j).map(|(_, _, v)| v).sum()
    }

    /// Returns the sum of the values of row i
    pub fn row_sum(&self, i: usize) -> f64 {
        self.triplets().filter(|(r, _, _)| *r == i).map(|(_, _, v)| v).sum()
    }

    /// Returns an iterator over the assembled triplets
    fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let rows = self.coo.get_row_indices();
        let cols = self.coo.get_col_indices();
        let values = self.coo.get_values();
        (0..values.len()).map(move |k| (rows[k] as usize, cols[k] as usize, values[k]))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
