use std::f64::consts::PI;

use uom::si::{
    f64::{Length, TemperatureInterval, ThermalConductivity, ThermodynamicTemperature, Time},
    length::meter,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    time::day,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    units::VolumetricHeatCapacity,
};

use super::GroundTemperatureModel;

const DAYS_PER_YEAR: f64 = 365.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Kusuda-Achenbach annual ground temperature model.
///
/// The ground surface follows a yearly cosine around its mean. Below grade the
/// swing decays exponentially and lags in phase:
///
/// ```text
/// T(z, t) = T_mean − A·exp(−z·√(π/(365α)))·cos(2π/365·(t − t_shift − z/2·√(365/(πα))))
/// ```
///
/// with `t` in days, `α` in m²/day and `t_shift` the day of minimum surface
/// temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KusudaAchenbach {
    mean_temperature: ThermodynamicTemperature,
    amplitude: TemperatureInterval,
    phase_shift: Time,
    /// Soil diffusivity in m²/day.
    diffusivity: f64,
}

impl KusudaAchenbach {
    /// Builds the model from surface statistics and soil properties.
    #[must_use]
    pub fn new(
        mean_temperature: ThermodynamicTemperature,
        amplitude: TemperatureInterval,
        phase_shift: Time,
        conductivity: Constrained<ThermalConductivity, StrictlyPositive>,
        heat_capacity: Constrained<VolumetricHeatCapacity, StrictlyPositive>,
    ) -> Self {
        let alpha = conductivity.into_inner().value / heat_capacity.into_inner().value;
        Self {
            mean_temperature,
            amplitude,
            phase_shift,
            diffusivity: alpha * SECONDS_PER_DAY,
        }
    }
}

impl GroundTemperatureModel for KusudaAchenbach {
    fn ground_temperature(&self, depth: Length, time: Time) -> ThermodynamicTemperature {
        let z = depth.get::<meter>();
        let t = time.get::<day>();
        let shift = self.phase_shift.get::<day>();

        let damping = (-z * (PI / (DAYS_PER_YEAR * self.diffusivity)).sqrt()).exp();
        let lag = z / 2.0 * (DAYS_PER_YEAR / (PI * self.diffusivity)).sqrt();
        let wave = (2.0 * PI / DAYS_PER_YEAR * (t - shift - lag)).cos();

        let swing = self.amplitude.get::<delta_kelvin>() * damping * wave;
        ThermodynamicTemperature::new::<kelvin>(self.mean_temperature.get::<kelvin>() - swing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::degree_celsius as delta_celsius,
        thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::degree_celsius,
    };

    use crate::support::units::from_si;

    fn model() -> KusudaAchenbach {
        KusudaAchenbach::new(
            ThermodynamicTemperature::new::<degree_celsius>(12.0),
            TemperatureInterval::new::<delta_celsius>(10.0),
            Time::new::<day>(20.0),
            StrictlyPositive::new(ThermalConductivity::new::<watt_per_meter_kelvin>(1.2))
                .unwrap(),
            StrictlyPositive::new(from_si(2.0e6)).unwrap(),
        )
    }

    #[test]
    fn surface_minimum_on_phase_shift_day() {
        let t = model().ground_temperature(Length::new::<meter>(0.0), Time::new::<day>(20.0));
        assert_relative_eq!(t.get::<degree_celsius>(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn deep_ground_approaches_mean() {
        let m = model();
        for d in [0.0, 90.0, 180.0, 270.0] {
            let t = m.ground_temperature(Length::new::<meter>(100.0), Time::new::<day>(d));
            assert_relative_eq!(t.get::<degree_celsius>(), 12.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn swing_shrinks_with_depth() {
        let m = model();
        let swing = |z: f64| {
            (0..365)
                .map(|d| {
                    m.ground_temperature(Length::new::<meter>(z), Time::new::<day>(f64::from(d)))
                        .get::<degree_celsius>()
                })
                .fold((f64::MAX, f64::MIN), |(lo, hi), t| (lo.min(t), hi.max(t)))
        };
        let (lo0, hi0) = swing(0.0);
        let (lo2, hi2) = swing(2.0);
        assert!(hi2 - lo2 < hi0 - lo0);
    }
}
