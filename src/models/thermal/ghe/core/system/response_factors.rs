use crate::{
    models::thermal::ghe::core::{BoreholeProperties, GFunction},
    support::numeric::TableError,
};

/// A g-function supplied with the input rather than generated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFactors {
    name: String,
    properties: BoreholeProperties,
    max_simulation_years: f64,
    g_function: GFunction,
}

impl ResponseFactors {
    /// # Errors
    ///
    /// Returns a [`TableError`] if the samples do not form a valid table.
    pub fn new(
        name: &str,
        properties: BoreholeProperties,
        max_simulation_years: f64,
        log_times: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        Ok(Self {
            name: name.trim().to_uppercase(),
            properties,
            max_simulation_years,
            g_function: GFunction::new(log_times, values)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The borehole template the factors were computed for.
    #[must_use]
    pub fn properties(&self) -> &BoreholeProperties {
        &self.properties
    }

    #[must_use]
    pub fn max_simulation_years(&self) -> f64 {
        self.max_simulation_years
    }

    #[must_use]
    pub fn g_function(&self) -> &GFunction {
        &self.g_function
    }
}
