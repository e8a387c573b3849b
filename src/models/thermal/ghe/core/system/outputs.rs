use uom::si::{
    f64::{MassRate, Power, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    thermodynamic_temperature::degree_celsius,
};

/// Reported state of a system after a simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOutputs {
    pub average_borehole_temperature: ThermodynamicTemperature,

    /// Heat rejected to the soil.
    pub heat_transfer_rate: Power,

    pub inlet_temperature: ThermodynamicTemperature,
    pub outlet_temperature: ThermodynamicTemperature,
    pub mass_flow: MassRate,
    pub average_fluid_temperature: ThermodynamicTemperature,

    /// Undisturbed ground temperature at the middle of the borehole.
    pub far_field_temperature: ThermodynamicTemperature,
}

/// One named report value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputChannel {
    pub name: &'static str,
    pub unit: &'static str,
    pub value: f64,
}

impl SimulationOutputs {
    /// The outputs as report channels, in a fixed order.
    #[must_use]
    pub fn channels(&self) -> [OutputChannel; 7] {
        let celsius = |t: ThermodynamicTemperature| t.get::<degree_celsius>();
        let channel = |name, unit, value| OutputChannel { name, unit, value };
        [
            channel(
                "Ground Heat Exchanger Average Borehole Temperature",
                "C",
                celsius(self.average_borehole_temperature),
            ),
            channel(
                "Ground Heat Exchanger Heat Transfer Rate",
                "W",
                self.heat_transfer_rate.get::<watt>(),
            ),
            channel(
                "Ground Heat Exchanger Inlet Temperature",
                "C",
                celsius(self.inlet_temperature),
            ),
            channel(
                "Ground Heat Exchanger Outlet Temperature",
                "C",
                celsius(self.outlet_temperature),
            ),
            channel(
                "Ground Heat Exchanger Mass Flow Rate",
                "kg/s",
                self.mass_flow.get::<kilogram_per_second>(),
            ),
            channel(
                "Ground Heat Exchanger Average Fluid Temperature",
                "C",
                celsius(self.average_fluid_temperature),
            ),
            channel(
                "Ground Heat Exchanger Farfield Ground Temperature",
                "C",
                celsius(self.far_field_temperature),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn channels_report_in_display_units() {
        let c = |v| ThermodynamicTemperature::new::<degree_celsius>(v);
        let outputs = SimulationOutputs {
            average_borehole_temperature: c(12.0),
            heat_transfer_rate: Power::new::<watt>(1500.0),
            inlet_temperature: c(25.0),
            outlet_temperature: c(22.0),
            mass_flow: MassRate::new::<kilogram_per_second>(0.5),
            average_fluid_temperature: c(23.5),
            far_field_temperature: c(11.0),
        };

        let channels = outputs.channels();
        let values: Vec<f64> = channels.iter().map(|ch| ch.value).collect();
        for (v, e) in values.iter().zip([12.0, 1500.0, 25.0, 22.0, 0.5, 23.5, 11.0]) {
            assert_relative_eq!(*v, e, epsilon = 1e-9);
        }
        assert_eq!(channels[4].unit, "kg/s");
        assert_eq!(channels[6].name, "Ground Heat Exchanger Farfield Ground Temperature");
    }
}
