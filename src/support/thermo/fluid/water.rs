use uom::si::{
    f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity},
    dynamic_viscosity::pascal_second,
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::thermo::model::{ConstantFluid, ConstantParameters};

/// Canonical identifier for liquid water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Water;

/// Saturated liquid at 20 °C.
impl ConstantFluid for Water {
    fn parameters() -> ConstantParameters {
        ConstantParameters {
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4181.0),
            density: MassDensity::new::<kilogram_per_cubic_meter>(998.2),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.5984),
            viscosity: DynamicViscosity::new::<pascal_second>(1.0016e-3),
        }
    }
}
