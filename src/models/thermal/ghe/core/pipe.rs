//! U-tube pipe geometry and fluid-side resistance.
//!
//! Resistances are per unit length of pipe. The convective side switches
//! between laminar and turbulent correlations with a logistic blend across the
//! transition band so the result is continuous in flow rate.

use std::f64::consts::PI;

use uom::si::{
    f64::{Length, MassRate, ThermalConductivity, ThermodynamicTemperature},
    length::meter,
    mass_rate::kilogram_per_second,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    numeric::sigmoid,
    thermo::{FluidProperties, PropertyError},
    units::{LinearThermalResistance, VolumetricHeatCapacity, from_si},
};

use super::GeometryError;

/// Friction factor correlation bands.
const FRICTION_LAMINAR_RE: f64 = 1500.0;
const FRICTION_TURBULENT_RE: f64 = 5000.0;
const FRICTION_BLEND_CENTER: f64 = 3000.0;
const FRICTION_BLEND_WIDTH: f64 = 450.0;

/// Nusselt number correlation bands.
const NUSSELT_LAMINAR_RE: f64 = 2000.0;
const NUSSELT_TURBULENT_RE: f64 = 4000.0;
const NUSSELT_BLEND_CENTER: f64 = 3000.0;
const NUSSELT_BLEND_WIDTH: f64 = 150.0;

/// Fully developed laminar Nusselt number.
///
/// Average of the uniform heat flux (4.36) and uniform wall temperature (3.66)
/// limits. Kept at exactly 4.01.
const LAMINAR_NUSSELT: f64 = 4.01;

/// A plastic U-tube leg.
///
/// Values are stored in SI base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    conductivity: f64,
    heat_capacity: f64,
    outer_diameter: f64,
    wall_thickness: f64,
}

impl Pipe {
    /// Builds a pipe from its material and wall dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if a value is not strictly positive or the
    /// wall is at least as thick as the pipe radius.
    pub fn new(
        conductivity: ThermalConductivity,
        heat_capacity: VolumetricHeatCapacity,
        outer_diameter: Length,
        wall_thickness: Length,
    ) -> Result<Self, GeometryError> {
        positive("pipe conductivity", &conductivity)?;
        positive("pipe heat capacity", &heat_capacity)?;
        positive("pipe outer diameter", &outer_diameter)?;
        positive("pipe wall thickness", &wall_thickness)?;

        if wall_thickness * 2.0 >= outer_diameter {
            return Err(GeometryError::WallTooThick {
                wall_thickness,
                outer_diameter,
            });
        }

        Ok(Self {
            conductivity: conductivity.get::<watt_per_meter_kelvin>(),
            heat_capacity: heat_capacity.value,
            outer_diameter: outer_diameter.get::<meter>(),
            wall_thickness: wall_thickness.get::<meter>(),
        })
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(self.conductivity)
    }

    #[must_use]
    pub fn heat_capacity(&self) -> VolumetricHeatCapacity {
        from_si(self.heat_capacity)
    }

    #[must_use]
    pub fn outer_diameter(&self) -> Length {
        Length::new::<meter>(self.outer_diameter)
    }

    #[must_use]
    pub fn inner_diameter(&self) -> Length {
        Length::new::<meter>(self.inner_diameter_si())
    }

    #[must_use]
    pub fn outer_radius(&self) -> Length {
        Length::new::<meter>(self.outer_radius_si())
    }

    #[must_use]
    pub fn inner_radius(&self) -> Length {
        Length::new::<meter>(self.inner_diameter_si() / 2.0)
    }

    #[must_use]
    pub fn wall_thickness(&self) -> Length {
        Length::new::<meter>(self.wall_thickness)
    }

    /// Reynolds number `4·ṁ/(μ·π·dᵢ)` of the flow in one leg.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the viscosity lookup fails.
    pub fn reynolds_number(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<f64, PropertyError> {
        let mu = fluid.viscosity(temperature)?.value;
        Ok(4.0 * mass_flow.get::<kilogram_per_second>() / (mu * PI * self.inner_diameter_si()))
    }

    /// Darcy friction factor at Reynolds number `re`.
    ///
    /// Laminar flow uses `64/Re`, turbulent flow the Petukhov correlation, and
    /// the band between is a logistic blend of the two. At `Re = 0` the
    /// laminar value is infinite.
    #[must_use]
    pub fn friction_factor(re: f64) -> f64 {
        let laminar = || 64.0 / re;
        let turbulent = || (0.79 * re.ln() - 1.64).powi(-2);

        if re < FRICTION_LAMINAR_RE {
            laminar()
        } else if re >= FRICTION_TURBULENT_RE {
            turbulent()
        } else {
            let sf = sigmoid(re, FRICTION_BLEND_CENTER, FRICTION_BLEND_WIDTH);
            (1.0 - sf) * laminar() + sf * turbulent()
        }
    }

    /// Nusselt number for the flow in one leg.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn nusselt_number(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<f64, PropertyError> {
        let re = self.reynolds_number(fluid, mass_flow, temperature)?;
        if re < NUSSELT_LAMINAR_RE {
            return Ok(LAMINAR_NUSSELT);
        }
        Ok(nusselt(re, fluid.prandtl(temperature)?))
    }

    /// Convective resistance `1/(Nu·π·k_fluid)` between the fluid and the wall.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn convection_resistance(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<LinearThermalResistance, PropertyError> {
        let nu = self.nusselt_number(fluid, mass_flow, temperature)?;
        let k = fluid.conductivity(temperature)?.get::<watt_per_meter_kelvin>();
        Ok(from_si(1.0 / (nu * PI * k)))
    }

    /// Conductive resistance `ln(dₒ/dᵢ)/(2π·k_pipe)` through the wall.
    #[must_use]
    pub fn conduction_resistance(&self) -> LinearThermalResistance {
        from_si((self.outer_diameter / self.inner_diameter_si()).ln() / (2.0 * PI * self.conductivity))
    }

    /// Total resistance from the fluid to the outer pipe wall.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn resistance(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<LinearThermalResistance, PropertyError> {
        Ok(self.convection_resistance(fluid, mass_flow, temperature)? + self.conduction_resistance())
    }

    pub(super) fn outer_radius_si(&self) -> f64 {
        self.outer_diameter / 2.0
    }

    pub(super) fn inner_diameter_si(&self) -> f64 {
        self.outer_diameter - 2.0 * self.wall_thickness
    }

    pub(super) fn wall_thickness_si(&self) -> f64 {
        self.wall_thickness
    }

    pub(super) fn conductivity_si(&self) -> f64 {
        self.conductivity
    }

    pub(super) fn heat_capacity_si(&self) -> f64 {
        self.heat_capacity
    }

    /// Builds a pipe directly from SI values that are already known to be valid.
    pub(super) fn from_si_parts(
        conductivity: f64,
        heat_capacity: f64,
        outer_diameter: f64,
        wall_thickness: f64,
    ) -> Self {
        Self {
            conductivity,
            heat_capacity,
            outer_diameter,
            wall_thickness,
        }
    }
}

/// Nusselt number at or above the laminar limit.
fn nusselt(re: f64, pr: f64) -> f64 {
    let turbulent = gnielinski(re, pr);
    if re >= NUSSELT_TURBULENT_RE {
        return turbulent;
    }
    let sf = sigmoid(re, NUSSELT_BLEND_CENTER, NUSSELT_BLEND_WIDTH);
    (1.0 - sf) * LAMINAR_NUSSELT + sf * turbulent
}

/// Gnielinski's correlation for turbulent flow in a smooth tube.
fn gnielinski(re: f64, pr: f64) -> f64 {
    let f = Pipe::friction_factor(re);
    (f / 8.0) * (re - 1000.0) * pr / (1.0 + 12.7 * (f / 8.0).sqrt() * (pr.powf(2.0 / 3.0) - 1.0))
}

pub(super) fn positive<T>(field: &'static str, value: &T) -> Result<(), GeometryError>
where
    StrictlyPositive: Constraint<T>,
{
    StrictlyPositive::check(value).map_err(|source| GeometryError::NotPositive { field, source })
}
