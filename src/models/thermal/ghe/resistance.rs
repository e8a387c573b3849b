use twine_core::Model;
use uom::si::f64::{MassRate, ThermodynamicTemperature};

use crate::support::{
    plant::Fluid,
    thermo::PropertyError,
    units::LinearThermalResistance,
};

use super::Borehole;

/// Flow through one borehole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConditions {
    pub mass_flow: MassRate,
    pub temperature: ThermodynamicTemperature,
}

/// Per-length resistances of a borehole at one flow condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistances {
    /// Fluid to outer pipe wall, one leg.
    pub pipe: LinearThermalResistance,

    /// Fluid to borehole wall.
    pub borehole: LinearThermalResistance,

    /// Grout share of the borehole resistance.
    pub grout: LinearThermalResistance,

    /// Leg to leg.
    pub total_internal: LinearThermalResistance,

    /// Thermal short circuit between the legs.
    pub direct_coupling: LinearThermalResistance,
}

/// Multipole borehole resistances as a [`Model`].
#[derive(Debug, Clone)]
pub struct BoreholeResistance {
    borehole: Borehole,
    fluid: Fluid,
}

impl BoreholeResistance {
    #[must_use]
    pub fn new(borehole: Borehole, fluid: Fluid) -> Self {
        Self { borehole, fluid }
    }

    #[must_use]
    pub fn borehole(&self) -> &Borehole {
        &self.borehole
    }
}

impl Model for BoreholeResistance {
    type Input = FlowConditions;
    type Output = Resistances;
    type Error = PropertyError;

    fn call(&self, input: &FlowConditions) -> Result<Resistances, PropertyError> {
        let fluid = self.fluid.properties();
        let bh = &self.borehole;
        let pipe = bh.pipe_resistance(fluid, input.mass_flow, input.temperature)?;

        Ok(Resistances {
            pipe,
            borehole: bh.average_resistance_with(pipe),
            grout: bh.grout_resistance_with(pipe),
            total_internal: bh.total_internal_resistance_with(pipe),
            direct_coupling: bh.direct_coupling_resistance(
                fluid,
                input.mass_flow,
                input.temperature,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, ThermalConductivity},
        length::meter,
        mass_rate::kilogram_per_second,
        thermal_conductivity::watt_per_meter_kelvin,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::{
        models::thermal::ghe::{BoreholeDesign, BoreholeProperties, Pipe, Soil},
        support::{
            thermo::{fluid::Water, model::ConstantProperties},
            units::from_si,
        },
    };

    fn k(value: f64) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(value)
    }

    fn m(value: f64) -> Length {
        Length::new::<meter>(value)
    }

    fn model() -> BoreholeResistance {
        let pipe = Pipe::new(k(0.389), from_si(1.542e6), m(0.032), m(0.00243)).unwrap();
        let design = BoreholeDesign {
            depth: m(1.0),
            length: m(100.0),
            diameter: m(0.096),
            grout_conductivity: k(3.0),
            grout_heat_capacity: from_si(3.9e6),
            shank_spacing: m(0.032),
            pipe,
        };
        let props = BoreholeProperties::new("bh", &design).unwrap();
        let soil = Soil::new(k(4.0), from_si(2.343e6)).unwrap();
        let borehole = Borehole::new("bh", props, m(0.0), m(0.0), soil);
        let water = Fluid::new("water", 0, Arc::new(ConstantProperties::<Water>::default()));
        BoreholeResistance::new(borehole, water)
    }

    #[test]
    fn resistances_at_design_flow() {
        let out = model()
            .call(&FlowConditions {
                mass_flow: MassRate::new::<kilogram_per_second>(0.1),
                temperature: ThermodynamicTemperature::new::<degree_celsius>(20.0),
            })
            .expect("resistances should evaluate");

        assert_relative_eq!(out.total_internal.value, 0.238_114_4, epsilon = 1e-6);
        assert_relative_eq!(out.borehole.value, 0.082_180_5, epsilon = 1e-6);
        assert_relative_eq!(out.grout.value, 0.041_355_5, epsilon = 1e-6);
        assert_relative_eq!(out.direct_coupling.value, 0.863_871, epsilon = 1e-5);
        assert_relative_eq!(out.grout.value, out.borehole.value - out.pipe.value / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn bad_temperature_is_an_error() {
        let result = model().call(&FlowConditions {
            mass_flow: MassRate::new::<kilogram_per_second>(0.1),
            temperature: ThermodynamicTemperature::new::<degree_celsius>(f64::NAN),
        });
        assert!(result.is_err());
    }
}
