//! Enhanced ground heat exchanger: borehole resistance and g-functions.
//!
//! The pieces, leaf first:
//!
//! - [`pipe`]: U-tube geometry and fluid-side resistance
//! - [`borehole`]: multipole borehole resistance and axial discretization
//! - [`short_timestep`]: radial finite-volume g-function for early times
//! - [`long_timestep`]: finite line source g-function for later times
//! - [`g_function`]: merged curve and lookup
//! - [`field`]: rectangular arrays and the averaged borehole
//! - [`input`]: named input objects and their validation
//! - [`system`]: the heat exchanger system and its one-time initialization
//! - [`state`]: the container owning every system in a simulation

mod borehole;
mod config;
mod error;
mod field;
mod g_function;
mod input;
mod long_timestep;
mod pipe;
mod short_timestep;
mod state;
mod system;

#[cfg(test)]
mod test_support;

pub use borehole::{Borehole, BoreholeDesign, BoreholeProperties, MultipoleParameters, Point, Soil};
pub use config::{GFunctionConfig, LongTimestepConfig, ShortTimestepConfig};
pub use error::GeometryError;
pub use field::{BoreholeField, average_borehole};
pub use g_function::{Curve, GFunction};
pub use input::{
    ArrayInput, InputError, InputErrors, InputSet, ObjectKind, PropertiesInput,
    ResponseFactorsInput, SingleBoreholeInput, SystemInput,
};
pub use long_timestep::long_timestep_g_function;
pub use pipe::Pipe;
pub use short_timestep::short_timestep_g_function;
pub use state::SimulationState;
pub use system::{
    GeneratedCurves, HeatExchangerSystem, InitError, LoadedSystem, OutputChannel, ReadySystem,
    ResponseFactors, SimulationOutputs,
};
