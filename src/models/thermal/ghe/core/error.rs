use thiserror::Error;
use uom::si::f64::Length;

use crate::support::constraint::ConstraintError;

/// Physically impossible pipe, borehole, or soil parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A value that must be positive is not.
    #[error("{field} is invalid: {source}")]
    NotPositive {
        field: &'static str,
        source: ConstraintError,
    },

    /// The pipe wall fills the whole pipe.
    #[error("wall thickness {wall_thickness:?} leaves no bore in a {outer_diameter:?} pipe")]
    WallTooThick {
        wall_thickness: Length,
        outer_diameter: Length,
    },
}
