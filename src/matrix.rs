use std::collections::HashSet;

use faer::MatRef;

use crate::DesignMatrixError;

/// A design matrix: an owned column-major buffer of `f64` values with a
/// name for every column. Column names are ordered and unique, and are
/// used to label the fitted coefficients.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    nrows: usize,
    ncols: usize,
    colnames: Vec<String>,
    data: Vec<f64>,
}

impl PartialEq for DesignMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.nrows == other.nrows
            && self.ncols == other.ncols
            && self.colnames == other.colnames
            && self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl DesignMatrix {
    /// Build a design matrix from a column-major buffer. `data.len()` must
    /// be `nrows * ncols` and `colnames` must contain exactly `ncols`
    /// unique names.
    pub fn new(
        nrows: usize,
        ncols: usize,
        data: Vec<f64>,
        colnames: Vec<String>,
    ) -> Result<Self, DesignMatrixError> {
        if data.len() != nrows * ncols {
            return Err(DesignMatrixError::DataLengthMismatch {
                nrows,
                ncols,
                got: data.len(),
            });
        }
        if colnames.len() != ncols {
            return Err(DesignMatrixError::ColumnNamesLengthMismatch {
                expected: ncols,
                got: colnames.len(),
            });
        }
        let mut seen = HashSet::with_capacity(colnames.len());
        for name in &colnames {
            if !seen.insert(name.as_str()) {
                return Err(DesignMatrixError::DuplicateColumnName(name.clone()));
            }
        }
        Ok(Self {
            nrows,
            ncols,
            colnames,
            data,
        })
    }

    /// Build a design matrix from named columns. All columns must have the
    /// same length.
    pub fn from_columns<S, I>(columns: I) -> Result<Self, DesignMatrixError>
    where
        S: ToString,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let mut nrows = None;
        let mut colnames = Vec::new();
        let mut data = Vec::new();
        for (name, col) in columns {
            if *nrows.get_or_insert(col.len()) != col.len() {
                return Err(DesignMatrixError::UnequalColumnLengths);
            }
            colnames.push(name.to_string());
            data.extend_from_slice(&col);
        }
        let ncols = colnames.len();
        Self::new(nrows.unwrap_or(0), ncols, data, colnames)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn colnames(&self) -> &[String] {
        &self.colnames
    }

    /// The underlying column-major buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.nrows && col < self.ncols);
        self.data[col * self.nrows + row]
    }

    pub fn as_mat_ref(&self) -> MatRef<'_, f64> {
        MatRef::from_column_major_slice(self.data.as_slice(), self.nrows, self.ncols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let m = DesignMatrix::new(
            3,
            2,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m.colnames(), &["a".to_string(), "b".to_string()]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(2, 0), 3.0);
        assert_eq!(m.get(0, 1), 4.0);
        assert_eq!(m.get(2, 1), 6.0);
    }

    #[test]
    fn test_new_data_length_mismatch() {
        let err = DesignMatrix::new(
            3,
            2,
            vec![1.0, 2.0, 3.0],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DesignMatrixError::DataLengthMismatch {
                nrows: 3,
                ncols: 2,
                got: 3
            }
        );
    }

    #[test]
    fn test_new_colnames_length_mismatch() {
        let err = DesignMatrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0], vec!["a".to_string()])
            .unwrap_err();
        assert_eq!(
            err,
            DesignMatrixError::ColumnNamesLengthMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_new_duplicate_colname() {
        let err = DesignMatrix::new(
            2,
            2,
            vec![1.0, 2.0, 3.0, 4.0],
            vec!["a".to_string(), "a".to_string()],
        )
        .unwrap_err();
        assert_eq!(err, DesignMatrixError::DuplicateColumnName("a".to_string()));
    }

    #[test]
    fn test_from_columns() {
        let m = DesignMatrix::from_columns([
            ("intercept", vec![1.0, 1.0, 1.0]),
            ("x1", vec![1.0, 2.0, 3.0]),
        ])
        .unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m.get(1, 1), 2.0);
    }

    #[test]
    fn test_from_columns_unequal_lengths() {
        let err = DesignMatrix::from_columns([
            ("a", vec![1.0, 2.0]),
            ("b", vec![1.0, 2.0, 3.0]),
        ])
        .unwrap_err();
        assert_eq!(err, DesignMatrixError::UnequalColumnLengths);
    }

    #[test]
    fn test_as_mat_ref() {
        let m = DesignMatrix::new(
            2,
            2,
            vec![1.0, 2.0, 3.0, 4.0],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();
        let r = m.as_mat_ref();
        assert_eq!(r.nrows(), 2);
        assert_eq!(r.ncols(), 2);
        assert_eq!(r[(0, 0)], 1.0);
        assert_eq!(r[(1, 0)], 2.0);
        assert_eq!(r[(0, 1)], 3.0);
        assert_eq!(r[(1, 1)], 4.0);
    }
}
