//! Constant-property fluid model.
//!
//! `ConstantProperties` reports the same transport properties at every
//! temperature. It is a reasonable stand-in for a circulating liquid when the
//! loop stays within a few tens of kelvin of the reference state, which is the
//! case for the design-condition calculations made during ground heat
//! exchanger initialization.
//!
//! Temperatures are still checked: `NaN`, infinite, or sub-absolute-zero
//! inputs are rejected as [`PropertyError::InvalidState`], and temperatures
//! outside the optional validity range are [`PropertyError::OutOfDomain`].

use std::marker::PhantomData;

use thiserror::Error;
use uom::si::{
    f64::{
        DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature,
    },
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::{
        PropertyError,
        capability::{HasConductivity, HasCp, HasDensity, HasViscosity},
    },
};

/// Property values held by a [`ConstantProperties`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantParameters {
    pub cp: SpecificHeatCapacity,
    pub density: MassDensity,
    pub conductivity: ThermalConductivity,
    pub viscosity: DynamicViscosity,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstantParametersError {
    #[error("invalid cp: {cp:?}")]
    Cp { cp: SpecificHeatCapacity },
    #[error("invalid density: {density:?}")]
    Density { density: MassDensity },
    #[error("invalid conductivity: {conductivity:?}")]
    Conductivity { conductivity: ThermalConductivity },
    #[error("invalid viscosity: {viscosity:?}")]
    Viscosity { viscosity: DynamicViscosity },
    #[error("invalid validity range: {low:?} to {high:?}")]
    Range {
        low: ThermodynamicTemperature,
        high: ThermodynamicTemperature,
    },
}

impl ConstantParameters {
    fn validate(&self) -> Result<(), ConstantParametersError> {
        if StrictlyPositive::check(&self.cp).is_err() {
            return Err(ConstantParametersError::Cp { cp: self.cp });
        }
        if StrictlyPositive::check(&self.density).is_err() {
            return Err(ConstantParametersError::Density {
                density: self.density,
            });
        }
        if StrictlyPositive::check(&self.conductivity).is_err() {
            return Err(ConstantParametersError::Conductivity {
                conductivity: self.conductivity,
            });
        }
        if StrictlyPositive::check(&self.viscosity).is_err() {
            return Err(ConstantParametersError::Viscosity {
                viscosity: self.viscosity,
            });
        }
        Ok(())
    }
}

/// Fluids with a canonical set of constant properties.
pub trait ConstantFluid {
    fn parameters() -> ConstantParameters;
}

/// Transport properties that do not depend on temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantProperties<Fluid> {
    parameters: ConstantParameters,
    range: Option<(ThermodynamicTemperature, ThermodynamicTemperature)>,
    _fluid: PhantomData<Fluid>,
}

impl<Fluid> ConstantProperties<Fluid> {
    /// Builds a model from explicit property values.
    ///
    /// # Errors
    ///
    /// Returns [`ConstantParametersError`] if any property is not strictly positive.
    pub fn new(parameters: ConstantParameters) -> Result<Self, ConstantParametersError> {
        parameters.validate()?;
        Ok(Self {
            parameters,
            range: None,
            _fluid: PhantomData,
        })
    }

    /// Restricts the temperatures the model will answer for.
    ///
    /// # Errors
    ///
    /// Returns [`ConstantParametersError::Range`] unless `low < high`.
    pub fn with_range(
        mut self,
        low: ThermodynamicTemperature,
        high: ThermodynamicTemperature,
    ) -> Result<Self, ConstantParametersError> {
        if !(low < high) {
            return Err(ConstantParametersError::Range { low, high });
        }
        self.range = Some((low, high));
        Ok(self)
    }

    #[must_use]
    pub fn parameters(&self) -> &ConstantParameters {
        &self.parameters
    }

    fn check(&self, temperature: ThermodynamicTemperature) -> Result<(), PropertyError> {
        let t = temperature.get::<kelvin>();
        if !t.is_finite() || t <= 0.0 {
            return Err(PropertyError::InvalidState {
                context: format!("temperature {t} K"),
            });
        }
        if let Some((low, high)) = self.range {
            if temperature < low || temperature > high {
                return Err(PropertyError::OutOfDomain {
                    context: format!(
                        "temperature {t} K outside {} K to {} K",
                        low.get::<kelvin>(),
                        high.get::<kelvin>()
                    ),
                });
            }
        }
        Ok(())
    }
}

impl<Fluid: ConstantFluid> Default for ConstantProperties<Fluid> {
    fn default() -> Self {
        Self {
            parameters: Fluid::parameters(),
            range: None,
            _fluid: PhantomData,
        }
    }
}

impl<Fluid> HasCp for ConstantProperties<Fluid> {
    fn cp(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        self.check(temperature)?;
        Ok(self.parameters.cp)
    }
}

impl<Fluid> HasDensity for ConstantProperties<Fluid> {
    fn density(&self, temperature: ThermodynamicTemperature) -> Result<MassDensity, PropertyError> {
        self.check(temperature)?;
        Ok(self.parameters.density)
    }
}

impl<Fluid> HasConductivity for ConstantProperties<Fluid> {
    fn conductivity(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<ThermalConductivity, PropertyError> {
        self.check(temperature)?;
        Ok(self.parameters.conductivity)
    }
}

impl<Fluid> HasViscosity for ConstantProperties<Fluid> {
    fn viscosity(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<DynamicViscosity, PropertyError> {
        self.check(temperature)?;
        Ok(self.parameters.viscosity)
    }
}
