use thiserror::Error;

/// Errors raised when building a [`LinearTable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// The abscissa and ordinate columns have different lengths.
    #[error("table columns differ in length: {x_len} x values, {y_len} y values")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// Linear interpolation needs at least two points.
    #[error("table needs at least 2 points, got {len}")]
    TooFewPoints { len: usize },

    /// A value is `NaN` or infinite.
    #[error("table value at index {index} is not finite")]
    NotFinite { index: usize },

    /// The abscissa is not strictly increasing.
    #[error("table x values must strictly increase (index {index})")]
    NotIncreasing { index: usize },
}

/// Piecewise-linear function of one variable.
///
/// Evaluation inside the table interpolates between neighbouring points.
/// Outside the table the first or last segment is extended, so the table
/// never clamps.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl LinearTable {
    /// Builds a table from matching columns.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the columns differ in length, hold fewer
    /// than two points, contain non-finite values, or `x` does not strictly
    /// increase.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, TableError> {
        if x.len() != y.len() {
            return Err(TableError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(TableError::TooFewPoints { len: x.len() });
        }
        if let Some(index) = x
            .iter()
            .zip(&y)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(TableError::NotFinite { index });
        }
        if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TableError::NotIncreasing { index: index + 1 });
        }

        Ok(Self { x, y })
    }

    /// Evaluates the table at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.x.len();
        // Index of the segment's upper point, kept inside [1, n - 1].
        let upper = self.x.partition_point(|&xi| xi < x).clamp(1, n - 1);
        let (x0, x1) = (self.x[upper - 1], self.x[upper]);
        let (y0, y1) = (self.y[upper - 1], self.y[upper]);

        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    /// Abscissa values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Ordinate values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; a table holds at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn table() -> LinearTable {
        LinearTable::new(vec![-2.0, 0.0, 1.0, 3.0], vec![1.0, 2.0, 4.0, 5.0])
            .expect("valid table")
    }

    #[test]
    fn hits_table_points_exactly() {
        let t = table();
        for (x, y) in t.x().iter().zip(t.y()) {
            assert_relative_eq!(t.eval(*x), *y);
        }
    }

    #[test]
    fn interpolates_between_points() {
        let t = table();
        assert_relative_eq!(t.eval(-1.0), 1.5);
        assert_relative_eq!(t.eval(0.5), 3.0);
        assert_relative_eq!(t.eval(2.0), 4.5);
    }

    #[test]
    fn extrapolates_end_segments() {
        let t = table();
        assert_relative_eq!(t.eval(-4.0), 0.0);
        assert_relative_eq!(t.eval(5.0), 6.0);
    }

    #[test]
    fn rejects_bad_columns() {
        assert_eq!(
            LinearTable::new(vec![0.0, 1.0], vec![0.0]),
            Err(TableError::LengthMismatch { x_len: 2, y_len: 1 })
        );
        assert_eq!(
            LinearTable::new(vec![0.0], vec![0.0]),
            Err(TableError::TooFewPoints { len: 1 })
        );
        assert_eq!(
            LinearTable::new(vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 2.0]),
            Err(TableError::NotIncreasing { index: 2 })
        );
        assert_eq!(
            LinearTable::new(vec![0.0, f64::NAN], vec![0.0, 1.0]),
            Err(TableError::NotFinite { index: 1 })
        );
    }
}
