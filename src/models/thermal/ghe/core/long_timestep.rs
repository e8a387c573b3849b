//! Long-timestep g-function from the finite line source.
//!
//! Every borehole is a line of point sources along its axis. The wall
//! response of the field at time `t` is the double integral, over every
//! ordered borehole pair, of the point-to-point response minus the response
//! to the source's image above grade. Self pairs integrate from a line
//! shifted one radius off the axis, so the integrand stays finite.

use rayon::prelude::*;
use statrs::function::erf::erfc;
use tracing::debug;
use uom::si::{f64::Length, length::meter};

use super::{
    Borehole, Curve, LongTimestepConfig, Point, Soil,
    borehole::{AxialPoints, Discretization},
};

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;

/// Samples the finite line source g-function of a borehole field.
///
/// Log-times start at the configured minimum and advance by the configured
/// step until the real time `exp(ln(t/ts))·ts` covers `max_simulation_years`,
/// with `ts = L²/(9·α)` for the `reference_length` `L`. Samples are evaluated
/// in parallel; within a sample the pair sum runs in a fixed order so the
/// result does not depend on the thread count.
///
/// An empty field produces an empty curve.
///
/// # Panics
///
/// Panics if a configured panel count is zero or odd.
#[must_use]
pub fn long_timestep_g_function(
    field: &[Borehole],
    soil: &Soil,
    reference_length: Length,
    max_simulation_years: f64,
    config: &LongTimestepConfig,
) -> Curve {
    if field.is_empty() {
        return Curve::default();
    }

    let alpha = soil.diffusivity();
    let ts = reference_length.get::<meter>().powi(2) / (9.0 * alpha);
    let log_times = sample_log_times(ts, max_simulation_years, config);

    let points: Vec<Discretization> = field.iter().map(|bh| bh.discretize(config)).collect();
    let total_length: f64 = field.iter().map(Borehole::length_si).sum();

    let values = log_times
        .par_iter()
        .map(|&log_time| {
            let time = log_time.exp() * ts;
            let g = field_response(&points, alpha, time) / (2.0 * total_length);
            debug!(log_time, g, "long-timestep sample");
            g
        })
        .collect();

    Curve { log_times, values }
}

/// Log-times from the minimum until the simulated span is reached.
///
/// The last sample is the first one at or beyond the span.
fn sample_log_times(ts: f64, max_simulation_years: f64, config: &LongTimestepConfig) -> Vec<f64> {
    let max_time = max_simulation_years * SECONDS_PER_YEAR;
    let mut log_times = vec![config.min_log_time];
    let mut last = config.min_log_time;
    while last.exp() * ts < max_time {
        last += config.log_time_step;
        log_times.push(last);
    }
    log_times
}

fn field_response(points: &[Discretization], alpha: f64, time: f64) -> f64 {
    let mut g = 0.0;
    for (i, source) in points.iter().enumerate() {
        for (j, target) in points.iter().enumerate() {
            let outer = if i == j { &source.offset } else { &source.line };
            g += outer
                .points
                .iter()
                .zip(&outer.weights)
                .map(|(p, wp)| wp * line_response(p, &target.inner, alpha, time))
                .sum::<f64>();
        }
    }
    g
}

/// Response at `p` integrated along a receiving borehole.
fn line_response(p: &Point, line: &AxialPoints, alpha: f64, time: f64) -> f64 {
    line.points
        .iter()
        .zip(&line.weights)
        .map(|(q, wq)| wq * point_response(p, q, alpha, time))
        .sum()
}

/// Point source response at `q` from `p`, minus that of `p`'s image above grade.
fn point_response(p: &Point, q: &Point, alpha: f64, time: f64) -> f64 {
    let horizontal = (p.x - q.x).powi(2) + (p.y - q.y).powi(2);
    let direct = (horizontal + (p.z - q.z).powi(2)).sqrt();
    let image = (horizontal + (p.z + q.z).powi(2)).sqrt();
    let scale = 2.0 * (alpha * time).sqrt();

    erfc(direct / scale) / direct - erfc(image / scale) / image
}
