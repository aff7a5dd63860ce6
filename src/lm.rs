use faer::{linalg::solvers::Solve, MatRef, Side};
use tracing::{debug, info};

use crate::{
    Coef, DesignMatrix, NotFittedError, ShapeMismatchError, SingularMatrixError, Summary,
};

/// Gram matrices with a smaller reciprocal condition number than this are
/// reported as singular.
const RCOND_THRESHOLD: f64 = 1e-12;

/// An ordinary least squares regression model over a borrowed design
/// matrix and response vector. Coefficients are estimated by solving the
/// normal equations and are labeled by the design matrix's column names.
#[derive(Debug, Clone)]
pub struct RegressionModel<'a> {
    x: &'a DesignMatrix,
    y: &'a [f64],
    coefs: Option<Vec<f64>>,
}

impl<'a> RegressionModel<'a> {
    /// Create a model for a design matrix and a row-aligned response
    /// vector. The row counts must agree.
    pub fn new(x: &'a DesignMatrix, y: &'a [f64]) -> Result<Self, ShapeMismatchError> {
        if x.nrows() != y.len() {
            return Err(ShapeMismatchError {
                design_rows: x.nrows(),
                response_rows: y.len(),
            });
        }
        info!(
            "initialized model for data with {} rows and {} features",
            x.nrows(),
            x.ncols()
        );
        Ok(RegressionModel { x, y, coefs: None })
    }

    /// Estimate the coefficients by solving the normal equations
    /// `XᵀX β = Xᵀy` with a Cholesky factorization of the gram matrix.
    /// Fails if the gram matrix is singular or nearly so, which is the
    /// case for collinear features or fewer observations than features. A
    /// gram matrix whose reciprocal condition number is below `1e-12` is
    /// treated as singular. Refitting recomputes from the same borrowed
    /// data.
    #[tracing::instrument(skip(self))]
    pub fn fit(&mut self) -> Result<(), SingularMatrixError> {
        info!("fitting model");
        let x = self.x.as_mat_ref();
        let y: MatRef<'_, f64> = MatRef::from_column_major_slice(self.y, self.y.len(), 1);
        let xty = x.transpose() * y;
        let gram = x.transpose() * x;
        // exactly collinear columns can still factorize with a tiny
        // positive pivot left over from rounding, so the condition of the
        // gram matrix is checked first
        let eigen = gram
            .self_adjoint_eigen(Side::Lower)
            .map_err(|_| SingularMatrixError)?;
        let s = eigen.S();
        let mut min = f64::INFINITY;
        let mut max = 0.0f64;
        for i in 0..gram.nrows() {
            min = min.min(s[i]);
            max = max.max(s[i]);
        }
        if !(min > max * RCOND_THRESHOLD) {
            return Err(SingularMatrixError);
        }
        let chol = gram.llt(Side::Lower).map_err(|_| SingularMatrixError)?;
        let betas = chol.solve(&xty);
        debug!("solved normal equations");
        self.coefs = Some((0..self.x.ncols()).map(|i| betas[(i, 0)]).collect());
        Ok(())
    }

    /// The fitted coefficient vector, in column order, or `None` if the
    /// model has not been fitted.
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefs.as_deref()
    }

    /// A table of fitted coefficients keyed by feature name, in design
    /// matrix column order.
    pub fn summary(&self) -> Result<Summary, NotFittedError> {
        let coefs = self.coefs.as_ref().ok_or(NotFittedError)?;
        Ok(Summary::new(
            self.x
                .colnames()
                .iter()
                .zip(coefs.iter())
                .map(|(label, coef)| Coef::new(label, *coef))
                .collect(),
        ))
    }

    /// Predict the response for one feature row. The row must contain at
    /// least as many values as the design matrix has columns; extra values
    /// are ignored.
    pub fn predict(&self, x: &[f64]) -> Result<f64, NotFittedError> {
        let coefs = self.coefs.as_ref().ok_or(NotFittedError)?;
        let mut v = 0.0;
        for i in 0..coefs.len() {
            v += coefs[i] * x[i];
        }
        Ok(v)
    }

    /// In-sample fitted values `X β`.
    pub fn predicted(&self) -> Result<Vec<f64>, NotFittedError> {
        let coefs = self.coefs.as_ref().ok_or(NotFittedError)?;
        let x = self.x.as_mat_ref();
        Ok((0..x.nrows())
            .map(|i| (0..x.ncols()).map(|j| coefs[j] * x[(i, j)]).sum())
            .collect())
    }

    /// The coefficient of determination of the in-sample fit.
    pub fn r2(&self) -> Result<f64, NotFittedError> {
        let predicted = self.predicted()?;
        Ok(r_squared(self.y, &predicted))
    }
}

fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let mut rss = 0.0;
    let mut tss = 0.0;
    for (a, p) in actual.iter().zip(predicted.iter()) {
        rss += (a - p).powi(2);
        tss += (a - mean).powi(2);
    }
    1.0 - rss / tss
}
