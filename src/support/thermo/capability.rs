//! Property capabilities a fluid model can offer.
//!
//! Each trait exposes one property as a function of temperature. Models
//! implement the ones they support; [`FluidProperties`] is implemented
//! automatically for models that support all of them.

use uom::si::f64::{
    DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity,
    ThermodynamicTemperature,
};

use super::PropertyError;

pub trait HasCp {
    /// Returns the specific heat capacity at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if `cp` cannot be evaluated.
    fn cp(&self, temperature: ThermodynamicTemperature)
    -> Result<SpecificHeatCapacity, PropertyError>;
}

pub trait HasDensity {
    /// Returns the density at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the density cannot be evaluated.
    fn density(&self, temperature: ThermodynamicTemperature) -> Result<MassDensity, PropertyError>;
}

pub trait HasConductivity {
    /// Returns the thermal conductivity at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the conductivity cannot be evaluated.
    fn conductivity(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<ThermalConductivity, PropertyError>;
}

pub trait HasViscosity {
    /// Returns the dynamic viscosity at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the viscosity cannot be evaluated.
    fn viscosity(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<DynamicViscosity, PropertyError>;
}

/// A complete transport property source.
pub trait FluidProperties: HasCp + HasDensity + HasConductivity + HasViscosity {
    /// Returns the Prandtl number `cp·μ/k` at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if any of the underlying properties fail.
    fn prandtl(&self, temperature: ThermodynamicTemperature) -> Result<f64, PropertyError> {
        let cp = self.cp(temperature)?;
        let mu = self.viscosity(temperature)?;
        let k = self.conductivity(temperature)?;
        Ok((cp * mu / k).value)
    }
}

impl<T> FluidProperties for T where T: HasCp + HasDensity + HasConductivity + HasViscosity + ?Sized {}
