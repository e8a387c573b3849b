//! Enhanced vertical ground heat exchanger.
//!
//! This module provides [`twine_core::Model`] implementations over borehole
//! thermal resistance and borehole wall g-functions. The computational core
//! is in the internal `core` module; its public types are re-exported here.
//!
//! A typical run loads an [`InputSet`] into a [`SimulationState`],
//! initializes the systems against the loop [`Fluid`], and then queries
//! [`BoreholeWallResponse`] built from a [`ReadySystem`].
//!
//! [`Fluid`]: crate::support::plant::Fluid

mod core;
mod resistance;
mod wall_response;

pub use self::core::{
    ArrayInput, Borehole, BoreholeDesign, BoreholeField, BoreholeProperties, Curve, GFunction,
    GFunctionConfig, GeneratedCurves, GeometryError, HeatExchangerSystem, InitError, InputError,
    InputErrors, InputSet, LoadedSystem, LongTimestepConfig, MultipoleParameters, ObjectKind,
    OutputChannel, Pipe, Point, PropertiesInput, ReadySystem, ResponseFactors,
    ResponseFactorsInput, ShortTimestepConfig, SimulationOutputs, SimulationState,
    SingleBoreholeInput, Soil, SystemInput, average_borehole, long_timestep_g_function,
    short_timestep_g_function,
};
pub use resistance::{BoreholeResistance, FlowConditions, Resistances};
pub use wall_response::BoreholeWallResponse;
