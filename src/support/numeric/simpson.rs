/// Composite Simpson's rule weights for `panels` equal panels of `width`.
///
/// Returns `panels + 1` weights following the `1 4 2 4 ... 2 4 1` pattern,
/// already scaled by `width / 3`, so an integral is `Σ wᵢ·f(xᵢ)`.
///
/// # Panics
///
/// Panics if `panels` is zero or odd.
#[must_use]
pub fn simpson_weights(panels: usize, width: f64) -> Vec<f64> {
    assert!(
        panels > 0 && panels % 2 == 0,
        "Simpson's rule needs a positive even panel count, got {panels}"
    );

    let scale = width / 3.0;
    (0..=panels)
        .map(|i| {
            let w = if i == 0 || i == panels {
                1.0
            } else if i % 2 == 0 {
                2.0
            } else {
                4.0
            };
            w * scale
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn integrate(f: impl Fn(f64) -> f64, a: f64, b: f64, panels: usize) -> f64 {
        let h = (b - a) / panels as f64;
        simpson_weights(panels, h)
            .iter()
            .enumerate()
            .map(|(i, w)| w * f(a + i as f64 * h))
            .sum()
    }

    #[test]
    fn weight_pattern() {
        let w = simpson_weights(4, 3.0);
        assert_eq!(w, vec![1.0, 4.0, 2.0, 4.0, 1.0]);
    }

    #[test]
    fn exact_for_cubics() {
        let value = integrate(|x| x.powi(3) - 2.0 * x + 1.0, 0.0, 2.0, 2);
        assert_relative_eq!(value, 4.0 - 4.0 + 2.0, epsilon = 1e-12);
    }

    #[test]
    fn converges_for_smooth_functions() {
        let value = integrate(f64::sin, 0.0, std::f64::consts::PI, 50);
        assert_relative_eq!(value, 2.0, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "even panel count")]
    fn odd_panel_count_is_a_bug() {
        let _ = simpson_weights(5, 1.0);
    }
}
