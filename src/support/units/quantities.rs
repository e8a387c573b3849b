use std::marker::PhantomData;

use uom::{
    si::{Dimension, ISQ, Quantity, SI},
    typenum::{N1, N2, N3, P1, P3, Z0},
};

/// Thermal resistance of a unit length, K·m/W in SI.
pub type LinearThermalResistance = Quantity<ISQ<N1, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Heat transfer rate per unit length, W/m in SI.
pub type LinearHeatRate = Quantity<ISQ<P1, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Volumetric heat capacity, J/m³·K in SI.
pub type VolumetricHeatCapacity = Quantity<ISQ<N1, P1, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Creates a quantity from a value expressed in SI base units.
///
/// The custom quantities in this module have no named units in [`uom`],
/// so this is how they are constructed.
#[must_use]
pub fn from_si<D>(value: f64) -> Quantity<D, SI<f64>, f64>
where
    D: Dimension + ?Sized,
{
    Quantity {
        dimension: PhantomData,
        units: PhantomData,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Power, SpecificHeatCapacity, MassDensity},
        length::meter,
        mass_density::kilogram_per_cubic_meter,
        power::watt,
        specific_heat_capacity::joule_per_kilogram_kelvin,
    };

    #[test]
    fn derived_quantities_match_aliases() {
        let per_length: LinearHeatRate = Power::new::<watt>(400.0) / Length::new::<meter>(10.0);
        assert_relative_eq!(per_length.value, 40.0);

        let rho_cp: VolumetricHeatCapacity = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            4181.0,
        ) * MassDensity::new::<kilogram_per_cubic_meter>(998.2);
        assert_relative_eq!(rho_cp.value, 4181.0 * 998.2);
    }

    #[test]
    fn from_si_stores_base_value() {
        let r: LinearThermalResistance = from_si(0.13);
        assert_relative_eq!(r.value, 0.13);
    }
}
