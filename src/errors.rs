use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignMatrixError {
    #[error("data length {got} does not match {nrows} rows by {ncols} columns")]
    DataLengthMismatch {
        nrows: usize,
        ncols: usize,
        got: usize,
    },
    #[error("expected {expected} column names, got {got}")]
    ColumnNamesLengthMismatch { expected: usize, got: usize },
    #[error("duplicate column name {0}")]
    DuplicateColumnName(String),
    #[error("unequal column lengths")]
    UnequalColumnLengths,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("number of rows does not match between design matrix and response vector: {design_rows} != {response_rows}")]
pub struct ShapeMismatchError {
    pub design_rows: usize,
    pub response_rows: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("gram matrix is not invertible")]
pub struct SingularMatrixError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("model has not been fitted")]
pub struct NotFittedError;
