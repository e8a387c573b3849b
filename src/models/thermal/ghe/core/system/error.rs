use thiserror::Error;
use uom::si::f64::VolumeRate;

use crate::support::{numeric::TableError, thermo::PropertyError};

/// Failures of the one-time initialization of a system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    #[error("system {system:?}: fluid property evaluation failed: {source}")]
    Property {
        system: String,
        source: PropertyError,
    },

    #[error("system {system:?} needs a positive design flow to generate g-functions, got {flow:?}")]
    DesignFlow { system: String, flow: VolumeRate },

    #[error("system {system:?} has no boreholes to generate g-functions from")]
    NoBoreholes { system: String },

    #[error("system {system:?} produced an invalid g-function: {source}")]
    Curve { system: String, source: TableError },

    #[error("no heat exchanger system named {name:?}")]
    UnknownSystem { name: String },
}
