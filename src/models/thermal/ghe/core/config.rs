use uom::si::{
    f64::{Length, ThermalConductivity, ThermodynamicTemperature, Time},
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use crate::support::units::{LinearHeatRate, from_si};

/// Settings for generating borehole-wall g-functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GFunctionConfig {
    /// Longest simulation the long-timestep curve must cover, in years.
    pub max_simulation_years: f64,

    /// Temperature at which fluid properties are evaluated for design flow,
    /// resistances, and the short-timestep initial condition.
    pub design_temperature: ThermodynamicTemperature,

    pub long_timestep: LongTimestepConfig,
    pub short_timestep: ShortTimestepConfig,
}

impl Default for GFunctionConfig {
    fn default() -> Self {
        Self {
            max_simulation_years: 1.0,
            design_temperature: ThermodynamicTemperature::new::<degree_celsius>(20.0),
            long_timestep: LongTimestepConfig::default(),
            short_timestep: ShortTimestepConfig::default(),
        }
    }
}

/// Finite line source sampling and quadrature.
///
/// Panel counts must be even for Simpson's rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongTimestepConfig {
    /// First `ln(t/ts)` sample. The line source is not valid much earlier.
    pub min_log_time: f64,

    /// Spacing between `ln(t/ts)` samples.
    pub log_time_step: f64,

    /// Panels along a borehole when it acts on another borehole.
    pub panels: usize,

    /// Panels along a borehole when it acts on itself.
    pub self_panels: usize,

    /// Panels for the inner integral along the receiving borehole.
    pub inner_panels: usize,
}

impl Default for LongTimestepConfig {
    fn default() -> Self {
        Self {
            min_log_time: -8.5,
            log_time_step: 0.5,
            panels: 50,
            self_panels: 50,
            inner_panels: 560,
        }
    }
}

/// Radial finite-volume mesh and time march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortTimestepConfig {
    /// Implicit time step.
    pub timestep: Time,

    /// Heat injected per metre of borehole at the inner boundary.
    pub heat_flux: LinearHeatRate,

    /// The march stops once `ln(t/ts)` reaches this value.
    pub max_log_time: f64,

    /// Radius of the fixed-temperature far boundary.
    pub outer_radius: Length,

    pub fluid_cells: usize,
    pub convection_cells: usize,
    pub pipe_cells: usize,
    pub grout_cells: usize,
    pub soil_cells: usize,

    /// Conductivity assigned to fluid cells so they stay well mixed.
    pub fluid_conductivity: ThermalConductivity,
}

impl Default for ShortTimestepConfig {
    fn default() -> Self {
        Self {
            timestep: Time::new::<second>(120.0),
            heat_flux: from_si(40.0),
            max_log_time: -9.0,
            outer_radius: Length::new::<meter>(10.0),
            fluid_cells: 3,
            convection_cells: 1,
            pipe_cells: 4,
            grout_cells: 27,
            soil_cells: 500,
            fluid_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(200.0),
        }
    }
}
