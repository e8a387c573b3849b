//! Undisturbed ground temperature models.
//!
//! A ground heat exchanger needs the far-field soil temperature around its
//! boreholes. Which model supplies it is a choice of the caller, so models
//! implement [`GroundTemperatureModel`] and are shared behind an `Arc`.
//!
//! - [`ConstantGroundTemperature`]: the same temperature at every depth and time
//! - [`KusudaAchenbach`]: annual surface wave damped with depth

mod kusuda_achenbach;

pub use kusuda_achenbach::KusudaAchenbach;

use uom::si::f64::{Length, ThermodynamicTemperature, Time};

/// Far-field ground temperature as a function of depth and time.
///
/// Implementations must be shareable across threads because heat exchanger
/// systems may be initialized in parallel.
pub trait GroundTemperatureModel: Send + Sync + std::fmt::Debug {
    /// Returns the undisturbed temperature at `depth` below grade.
    ///
    /// `time` is measured from the start of the calendar year.
    fn ground_temperature(&self, depth: Length, time: Time) -> ThermodynamicTemperature;
}

/// Ground temperature that does not vary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantGroundTemperature {
    pub temperature: ThermodynamicTemperature,
}

impl ConstantGroundTemperature {
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature) -> Self {
        Self { temperature }
    }
}

impl GroundTemperatureModel for ConstantGroundTemperature {
    fn ground_temperature(&self, _depth: Length, _time: Time) -> ThermodynamicTemperature {
        self.temperature
    }
}
