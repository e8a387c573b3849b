use std::f64::consts::SQRT_2;

use crate::support::numeric::simpson_weights;

use crate::models::thermal::ghe::core::LongTimestepConfig;

/// A point on or beside a borehole axis, in metres.
///
/// `z` is measured downward from the ground surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Quadrature nodes along one borehole with their Simpson weights.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AxialPoints {
    pub(crate) points: Vec<Point>,
    pub(crate) weights: Vec<f64>,
}

impl AxialPoints {
    fn along(x: f64, y: f64, depth: f64, length: f64, panels: usize) -> Self {
        let width = length / panels as f64;
        let points = (0..=panels)
            .map(|i| Point {
                x,
                y,
                z: depth + i as f64 * width,
            })
            .collect();
        Self {
            points,
            weights: simpson_weights(panels, width),
        }
    }
}

/// The three point sets a borehole contributes to the line source integral.
///
/// - `line`: outer integration when acting on another borehole
/// - `offset`: outer integration when acting on itself, moved one radius
///   off the axis so no source point coincides with a receiving point
/// - `inner`: inner integration along the receiving borehole
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Discretization {
    pub(crate) line: AxialPoints,
    pub(crate) offset: AxialPoints,
    pub(crate) inner: AxialPoints,
}

impl Discretization {
    /// # Panics
    ///
    /// Panics if a configured panel count is zero or odd.
    pub(crate) fn new(
        x: f64,
        y: f64,
        depth: f64,
        length: f64,
        radius: f64,
        config: &LongTimestepConfig,
    ) -> Self {
        let shift = radius / SQRT_2;
        Self {
            line: AxialPoints::along(x, y, depth, length, config.panels),
            offset: AxialPoints::along(x + shift, y - shift, depth, length, config.self_panels),
            inner: AxialPoints::along(x, y, depth, length, config.inner_panels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn point_sets_span_the_borehole() {
        let d = Discretization::new(2.0, 3.0, 1.0, 100.0, 0.05, &LongTimestepConfig::default());

        assert_eq!(d.line.points.len(), 51);
        assert_eq!(d.offset.points.len(), 51);
        assert_eq!(d.inner.points.len(), 561);

        for set in [&d.line, &d.offset, &d.inner] {
            assert_relative_eq!(set.points[0].z, 1.0);
            assert_relative_eq!(set.points.last().unwrap().z, 101.0, epsilon = 1e-9);
            assert_relative_eq!(set.weights.iter().sum::<f64>(), 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn offset_points_sit_one_radius_away() {
        let d = Discretization::new(2.0, 3.0, 1.0, 100.0, 0.05, &LongTimestepConfig::default());
        let p = d.offset.points[10];

        assert_relative_eq!(p.x, 2.0 + 0.05 / SQRT_2);
        assert_relative_eq!(p.y, 3.0 - 0.05 / SQRT_2);
        assert_relative_eq!(((p.x - 2.0).powi(2) + (p.y - 3.0).powi(2)).sqrt(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(d.line.points[10].x, 2.0);
    }

    #[test]
    #[should_panic(expected = "even panel count")]
    fn odd_panels_are_rejected() {
        let config = LongTimestepConfig {
            inner_panels: 561,
            ..LongTimestepConfig::default()
        };
        let _ = Discretization::new(0.0, 0.0, 1.0, 100.0, 0.05, &config);
    }
}
