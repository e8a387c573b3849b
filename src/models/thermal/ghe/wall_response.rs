use std::convert::Infallible;

use twine_core::Model;

use super::{GFunction, ReadySystem};

/// Borehole wall g-function as a [`Model`].
///
/// The input is `ln(t/ts)` and the output is `g`, interpolated linearly
/// between samples and extrapolated linearly beyond them.
#[derive(Debug, Clone, PartialEq)]
pub struct BoreholeWallResponse {
    g_function: GFunction,
}

impl BoreholeWallResponse {
    #[must_use]
    pub fn new(g_function: GFunction) -> Self {
        Self { g_function }
    }

    /// Wraps the wall g-function of an initialized system.
    #[must_use]
    pub fn from_system(system: &ReadySystem) -> Self {
        Self::new(system.bwt_g_function().clone())
    }

    #[must_use]
    pub fn g_function(&self) -> &GFunction {
        &self.g_function
    }
}

impl Model for BoreholeWallResponse {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, log_time: &f64) -> Result<f64, Infallible> {
        Ok(self.g_function.value(*log_time))
    }
}
