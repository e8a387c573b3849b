use std::sync::Arc;

use uom::si::f64::{Length, ThermalConductivity, VolumeRate};

use crate::{
    models::thermal::ghe::core::BoreholeDesign,
    support::{ground::GroundTemperatureModel, units::VolumetricHeatCapacity},
};

/// A borehole template.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesInput {
    pub name: String,
    pub design: BoreholeDesign,
}

/// Precomputed g-function supplied by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFactorsInput {
    pub name: String,

    /// Name of the [`PropertiesInput`] these factors were computed for.
    pub properties: String,

    /// Alternating `ln(t/ts)` and `g` values.
    pub pairs: Vec<f64>,
}

/// A rectangular grid of identical boreholes.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayInput {
    pub name: String,
    pub properties: String,

    /// Boreholes along x.
    pub columns: usize,

    /// Boreholes along y.
    pub rows: usize,

    pub spacing: Length,
}

/// One borehole at an explicit location.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBoreholeInput {
    pub name: String,
    pub properties: String,
    pub x: Length,
    pub y: Length,
}

/// A ground heat exchanger system.
///
/// Optional references are treated as absent when blank.
#[derive(Debug, Clone)]
pub struct SystemInput {
    pub name: String,
    pub inlet_node: String,
    pub outlet_node: String,
    pub design_flow: VolumeRate,

    /// Number of boreholes the system declares. Must match the boreholes
    /// resolved from the array or single-borehole list.
    pub borehole_count: usize,

    pub soil_conductivity: ThermalConductivity,
    pub soil_heat_capacity: VolumetricHeatCapacity,
    pub ground_temperature: Arc<dyn GroundTemperatureModel>,

    /// Exiting fluid temperature response factors.
    pub eft_response_factors: Option<String>,

    /// Borehole wall temperature response factors.
    pub bwt_response_factors: Option<String>,

    /// Array supplying the boreholes. Takes precedence over `boreholes`.
    pub array: Option<String>,

    /// Single boreholes supplying the field when no array is named.
    pub boreholes: Vec<String>,
}
