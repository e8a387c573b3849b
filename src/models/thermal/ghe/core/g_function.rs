use crate::support::numeric::{LinearTable, TableError};

/// Raw g-function samples as produced by one of the solvers.
///
/// `log_times[i]` is `ln(t/ts)` for `values[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub log_times: Vec<f64>,
    pub values: Vec<f64>,
}

impl Curve {
    #[must_use]
    pub fn len(&self) -> usize {
        self.log_times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log_times.is_empty()
    }
}

/// A g-function ready for lookup by `ln(t/ts)`.
///
/// Lookups interpolate linearly between samples and extend the end segments
/// linearly outside the sampled range.
#[derive(Debug, Clone, PartialEq)]
pub struct GFunction {
    table: LinearTable,
}

impl GFunction {
    /// Builds a g-function from parallel sample columns.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the columns differ in length, hold fewer
    /// than two samples, contain non-finite values, or the log-times do not
    /// strictly increase.
    pub fn new(log_times: Vec<f64>, values: Vec<f64>) -> Result<Self, TableError> {
        Ok(Self {
            table: LinearTable::new(log_times, values)?,
        })
    }

    /// Stitches a short-timestep curve onto a long-timestep curve.
    ///
    /// Short-timestep samples are kept only below the first long-timestep
    /// log-time, so the overlap band is covered by the long-timestep curve
    /// alone and the result is strictly ordered.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the merged curve is not a valid table,
    /// for example when both inputs together hold fewer than two samples.
    pub fn merge(short: &Curve, long: &Curve) -> Result<Self, TableError> {
        let cutoff = long.log_times.first().copied().unwrap_or(f64::INFINITY);

        let (mut log_times, mut values): (Vec<f64>, Vec<f64>) = short
            .log_times
            .iter()
            .zip(&short.values)
            .take_while(|&(&x, _)| x < cutoff)
            .map(|(&x, &y)| (x, y))
            .unzip();

        log_times.extend_from_slice(&long.log_times);
        values.extend_from_slice(&long.values);

        Self::new(log_times, values)
    }

    /// Returns `g` at `log_time = ln(t/ts)`.
    #[must_use]
    pub fn value(&self, log_time: f64) -> f64 {
        self.table.eval(log_time)
    }

    #[must_use]
    pub fn log_times(&self) -> &[f64] {
        self.table.x()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.table.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn curve(points: &[f64]) -> Curve {
        Curve {
            log_times: points.to_vec(),
            values: points.to_vec(),
        }
    }

    #[test]
    fn merged_curve_interpolates_and_extrapolates() {
        let g = GFunction::merge(&curve(&[1.0, 2.0, 3.0, 4.0, 5.0]), &curve(&[6.0, 7.0, 8.0, 9.0, 10.0]))
            .expect("merge should succeed");

        assert_eq!(g.log_times().len(), 10);
        for x in [-1.0, 1.0, 2.5, 8.0, 9.5, 11.0] {
            assert_relative_eq!(g.value(x), x, epsilon = 1e-12);
        }
    }

    #[test]
    fn source_samples_are_returned_exactly() {
        let short = Curve {
            log_times: vec![-12.0, -11.0, -10.0],
            values: vec![0.4, 0.9, 1.7],
        };
        let long = Curve {
            log_times: vec![-8.5, -8.0, -7.5],
            values: vec![2.54, 2.79, 3.04],
        };
        let g = GFunction::merge(&short, &long).unwrap();

        for (x, y) in short.log_times.iter().zip(&short.values) {
            assert_relative_eq!(g.value(*x), *y, epsilon = 1e-12);
        }
        for (x, y) in long.log_times.iter().zip(&long.values) {
            assert_relative_eq!(g.value(*x), *y, epsilon = 1e-12);
        }

        let between = g.value(-9.25);
        assert!(between > 1.7 && between < 2.54);
    }

    #[test]
    fn overlapping_short_samples_are_dropped() {
        let short = Curve {
            log_times: vec![-10.0, -9.0, -8.5, -8.2],
            values: vec![1.0, 2.0, 2.5, 2.7],
        };
        let long = Curve {
            log_times: vec![-8.5, -8.0],
            values: vec![2.54, 2.79],
        };
        let g = GFunction::merge(&short, &long).unwrap();

        assert_eq!(g.log_times(), &[-10.0, -9.0, -8.5, -8.0]);
        assert_relative_eq!(g.value(-8.5), 2.54);
    }

    #[test]
    fn long_curve_alone_is_enough() {
        let g = GFunction::merge(&Curve::default(), &curve(&[1.0, 2.0])).unwrap();
        assert_relative_eq!(g.value(1.5), 1.5);
    }

    #[test]
    fn empty_curves_cannot_merge() {
        let result = GFunction::merge(&Curve::default(), &Curve::default());
        assert_eq!(result, Err(TableError::TooFewPoints { len: 0 }));
    }
}
