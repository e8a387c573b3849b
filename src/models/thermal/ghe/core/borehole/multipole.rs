//! First-order multipole borehole resistances.
//!
//! Closed forms from Claesson and Hellström (2011), "Multipole method to
//! calculate borehole thermal resistances in a borehole heat exchanger",
//! HVAC&R Research 17(6), equations 13 and 26.

use std::f64::consts::PI;

/// Dimensionless shape and conductivity ratios of a single U-tube borehole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipoleParameters {
    /// Half shank spacing over borehole radius.
    pub theta1: f64,
    /// Borehole radius over pipe outer radius.
    pub theta2: f64,
    /// `1/(2·θ1·θ2)`.
    pub theta3: f64,
    /// `(k_grout − k_soil)/(k_grout + k_soil)`.
    pub sigma: f64,
}

impl MultipoleParameters {
    #[must_use]
    pub fn new(
        borehole_radius: f64,
        shank_spacing: f64,
        pipe_outer_radius: f64,
        grout_conductivity: f64,
        soil_conductivity: f64,
    ) -> Self {
        let theta1 = shank_spacing / (2.0 * borehole_radius);
        let theta2 = borehole_radius / pipe_outer_radius;
        Self {
            theta1,
            theta2,
            theta3: 1.0 / (2.0 * theta1 * theta2),
            sigma: (grout_conductivity - soil_conductivity)
                / (grout_conductivity + soil_conductivity),
        }
    }

    /// Leg-to-leg resistance for a given `β = 2π·k_grout·R_pipe`.
    #[must_use]
    pub fn total_internal(&self, grout_conductivity: f64, beta: f64) -> f64 {
        let Self {
            theta1: t1,
            theta3: t3,
            sigma: s,
            ..
        } = *self;
        let t1_2 = t1 * t1;
        let t1_4 = t1_2 * t1_2;
        let t3_2 = t3 * t3;

        let f1 = ((1.0 + t1_2).powf(s) / (t3 * (1.0 - t1_2).powf(s))).ln();
        let n2 = t3_2 * (1.0 - t1_4 + 4.0 * s * t1_2).powi(2);
        let d2 = (1.0 + beta) / (1.0 - beta) * (1.0 - t1_4).powi(2) - t3_2 * (1.0 - t1_4).powi(2)
            + 8.0 * s * t1_2 * t3_2 * (1.0 + t1_4);

        (beta + f1 - n2 / d2) / (PI * grout_conductivity)
    }

    /// Fluid-to-wall resistance for a given `β = 2π·k_grout·R_pipe`.
    #[must_use]
    pub fn average(&self, grout_conductivity: f64, beta: f64) -> f64 {
        let Self {
            theta1: t1,
            theta2: t2,
            theta3: t3,
            sigma: s,
        } = *self;
        let t1_4 = t1.powi(4);
        let t3_2 = t3 * t3;

        let f1 = (t2 / (2.0 * t1 * (1.0 - t1_4).powf(s))).ln();
        let n2 = t3_2 * (1.0 - 4.0 * s * t1_4 / (1.0 - t1_4)).powi(2);
        let d2 = (1.0 + beta) / (1.0 - beta)
            + t3_2 * (1.0 + 16.0 * s * t1_4 / (1.0 - t1_4).powi(2));

        (beta + f1 - n2 / d2) / (4.0 * PI * grout_conductivity)
    }
}

/// Direct coupling between the two legs from the internal and average resistances.
///
/// Returns `None` when the combination is degenerate and the formula goes negative.
pub(super) fn direct_coupling(total_internal: f64, average: f64) -> Option<f64> {
    let r12 = 4.0 * total_internal * average / (4.0 * average - total_internal);
    (r12 >= 0.0).then_some(r12)
}
