use rayon::prelude::*;
use tracing::info;
use uom::si::f64::{MassRate, ThermodynamicTemperature, Time};

use crate::support::plant::{DesignFlowRegistry, Fluid, PlantLocation};

use super::{
    GFunctionConfig, HeatExchangerSystem, InitError, InputErrors, InputSet, LoadedSystem,
    ReadySystem, SimulationOutputs,
};

/// Owns every ground heat exchanger system of a simulation.
///
/// Systems are looked up by their upper-cased name.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    systems: Vec<HeatExchangerSystem>,
}

impl SimulationState {
    #[must_use]
    pub fn new(systems: Vec<LoadedSystem>) -> Self {
        Self {
            systems: systems.into_iter().map(HeatExchangerSystem::Loaded).collect(),
        }
    }

    /// Loads `input` and takes ownership of the resulting systems.
    ///
    /// # Errors
    ///
    /// Returns every input error found, see [`InputSet::load`].
    pub fn load(
        input: InputSet,
        registry: &mut impl DesignFlowRegistry,
        max_simulation_years: f64,
    ) -> Result<Self, InputErrors> {
        Ok(Self::new(input.load(registry, max_simulation_years)?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn systems(&self) -> impl Iterator<Item = &HeatExchangerSystem> {
        self.systems.iter()
    }

    #[must_use]
    pub fn system(&self, name: &str) -> Option<&HeatExchangerSystem> {
        let name = name.trim().to_uppercase();
        self.systems.iter().find(|s| s.name() == name)
    }

    pub fn system_mut(&mut self, name: &str) -> Option<&mut HeatExchangerSystem> {
        let name = name.trim().to_uppercase();
        self.systems.iter_mut().find(|s| s.name() == name)
    }

    /// Records where a system sits on its plant loop.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::UnknownSystem`] if no system has that name.
    pub fn locate(&mut self, name: &str, location: PlantLocation) -> Result<(), InitError> {
        self.lookup_mut(name)?.set_location(location);
        Ok(())
    }

    /// Initializes one system on first use and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] if the name is unknown or initialization fails.
    pub fn initialize(
        &mut self,
        name: &str,
        fluid: &Fluid,
        config: &GFunctionConfig,
    ) -> Result<&mut ReadySystem, InitError> {
        self.lookup_mut(name)?.initialize(fluid, config)
    }

    /// Initializes every pending system in parallel.
    ///
    /// All pending systems are assumed to sit on the loop of `fluid`.
    /// Systems that fail stay pending; the first failure in system order is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the [`InitError`] of the first system that failed.
    pub fn initialize_all(&mut self, fluid: &Fluid, config: &GFunctionConfig) -> Result<(), InitError> {
        let pending = self.systems.iter().filter(|s| !s.is_ready()).count();
        info!(pending, "initializing ground heat exchangers");

        let results: Vec<Result<(), InitError>> = self
            .systems
            .par_iter_mut()
            .map(|system| system.initialize(fluid, config).map(|_| ()))
            .collect();

        results.into_iter().collect()
    }

    /// Steps a system, initializing it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] if the name is unknown or initialization fails.
    pub fn simulate(
        &mut self,
        name: &str,
        fluid: &Fluid,
        config: &GFunctionConfig,
        mass_flow: MassRate,
        inlet_temperature: ThermodynamicTemperature,
        time: Time,
    ) -> Result<SimulationOutputs, InitError> {
        let system = self.initialize(name, fluid, config)?;
        Ok(system.simulate(mass_flow, inlet_temperature, time))
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut HeatExchangerSystem, InitError> {
        let upper = name.trim().to_uppercase();
        self.systems
            .iter_mut()
            .find(|s| s.name() == upper)
            .ok_or(InitError::UnknownSystem { name: upper })
    }
}
