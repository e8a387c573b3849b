//! Heat exchanger systems and their one-time initialization.
//!
//! A system starts as a [`LoadedSystem`] holding validated input. Calling
//! [`LoadedSystem::initialize`] builds the average borehole and, unless the
//! input supplied one, generates the borehole wall g-function. The result is
//! a [`ReadySystem`]. There is no way back.

mod error;
mod outputs;
mod response_factors;

pub use error::InitError;
pub use outputs::{OutputChannel, SimulationOutputs};
pub use response_factors::ResponseFactors;

use std::sync::Arc;

use tracing::{debug, info};
use uom::si::{
    f64::{Length, MassRate, Power, ThermodynamicTemperature, Time, VolumeRate},
    length::meter,
    power::watt,
    volume_rate::cubic_meter_per_second,
};

use crate::support::{
    ground::GroundTemperatureModel,
    plant::{Fluid, PlantLocation},
};

use super::{
    Borehole, BoreholeProperties, Curve, GFunction, GFunctionConfig, Soil, average_borehole,
    long_timestep_g_function, short_timestep_g_function,
};

/// A system as loaded, before any g-function exists.
#[derive(Debug, Clone)]
pub struct LoadedSystem {
    pub(crate) name: String,
    pub(crate) inlet_node: String,
    pub(crate) outlet_node: String,
    pub(crate) design_flow: VolumeRate,
    pub(crate) borehole_count: usize,
    pub(crate) soil: Soil,
    pub(crate) ground: Arc<dyn GroundTemperatureModel>,
    pub(crate) eft: Option<ResponseFactors>,
    pub(crate) bwt: Option<ResponseFactors>,
    pub(crate) boreholes: Vec<Borehole>,
    pub(crate) location: Option<PlantLocation>,
}

/// Short- and long-timestep samples behind a generated g-function.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCurves {
    pub short_timestep: Curve,
    pub long_timestep: Curve,
}

impl LoadedSystem {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn inlet_node(&self) -> &str {
        &self.inlet_node
    }

    #[must_use]
    pub fn outlet_node(&self) -> &str {
        &self.outlet_node
    }

    #[must_use]
    pub fn design_flow(&self) -> VolumeRate {
        self.design_flow
    }

    #[must_use]
    pub fn borehole_count(&self) -> usize {
        self.borehole_count
    }

    #[must_use]
    pub fn soil(&self) -> &Soil {
        &self.soil
    }

    #[must_use]
    pub fn boreholes(&self) -> &[Borehole] {
        &self.boreholes
    }

    #[must_use]
    pub fn eft_response_factors(&self) -> Option<&ResponseFactors> {
        self.eft.as_ref()
    }

    #[must_use]
    pub fn bwt_response_factors(&self) -> Option<&ResponseFactors> {
        self.bwt.as_ref()
    }

    #[must_use]
    pub fn location(&self) -> Option<PlantLocation> {
        self.location
    }

    pub fn set_location(&mut self, location: PlantLocation) {
        self.location = Some(location);
    }

    /// Runs the one-time setup against the loop's fluid.
    ///
    /// Supplied borehole wall response factors are used as given. Otherwise
    /// the short-timestep model runs on the average borehole at the design
    /// flow per borehole, the line source runs over the whole field, and the
    /// two curves are merged. Exiting fluid temperature g-functions are only
    /// ever taken from supplied response factors.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] if generation is needed but the field is empty
    /// or the design flow is not positive, if a fluid property fails, or if
    /// the merged curve is not a valid table.
    pub fn initialize(
        &self,
        fluid: &Fluid,
        config: &GFunctionConfig,
    ) -> Result<ReadySystem, InitError> {
        info!(system = %self.name, boreholes = self.boreholes.len(), "initializing ground heat exchanger");

        let average = average_borehole(&self.name, &self.boreholes, self.borehole_count, self.soil);

        let eft = self.eft.as_ref().map(|rf| rf.g_function().clone());
        if eft.is_none() {
            debug!(system = %self.name, "no exiting fluid temperature response factors supplied");
        }

        let (bwt, generated) = match &self.bwt {
            Some(rf) => (rf.g_function().clone(), None),
            None => {
                let curves = self.generate(average.as_ref(), fluid, config)?;
                let g = GFunction::merge(&curves.short_timestep, &curves.long_timestep)
                    .map_err(|source| InitError::Curve {
                        system: self.name.clone(),
                        source,
                    })?;
                (g, Some(curves))
            }
        };

        let reference = average
            .as_ref()
            .map(Borehole::properties)
            .or_else(|| self.bwt.as_ref().map(ResponseFactors::properties))
            .or_else(|| self.eft.as_ref().map(ResponseFactors::properties));
        let mid_depth = reference.map_or(Length::new::<meter>(0.0), middle_of);

        info!(system = %self.name, samples = bwt.log_times().len(), "ground heat exchanger ready");

        Ok(ReadySystem {
            name: self.name.clone(),
            inlet_node: self.inlet_node.clone(),
            outlet_node: self.outlet_node.clone(),
            design_flow: self.design_flow,
            borehole_count: self.borehole_count,
            soil: self.soil,
            ground: Arc::clone(&self.ground),
            fluid: fluid.clone(),
            location: self.location,
            boreholes: self.boreholes.clone(),
            average,
            eft,
            bwt,
            generated,
            mid_depth,
            outputs: None,
        })
    }

    fn generate(
        &self,
        average: Option<&Borehole>,
        fluid: &Fluid,
        config: &GFunctionConfig,
    ) -> Result<GeneratedCurves, InitError> {
        let average = average.ok_or_else(|| InitError::NoBoreholes {
            system: self.name.clone(),
        })?;
        if self.design_flow.get::<cubic_meter_per_second>() <= 0.0
            || self.design_flow.is_nan()
        {
            return Err(InitError::DesignFlow {
                system: self.name.clone(),
                flow: self.design_flow,
            });
        }

        let property = |source| InitError::Property {
            system: self.name.clone(),
            source,
        };
        let temperature = config.design_temperature;
        let density = fluid.properties().density(temperature).map_err(property)?;
        let mass_flow: MassRate = self.design_flow / self.borehole_count as f64 * density;

        let short_timestep = short_timestep_g_function(
            average,
            fluid.properties(),
            mass_flow,
            temperature,
            &config.short_timestep,
        )
        .map_err(property)?;

        let long_timestep = long_timestep_g_function(
            &self.boreholes,
            &self.soil,
            average.properties().length(),
            config.max_simulation_years,
            &config.long_timestep,
        );

        Ok(GeneratedCurves {
            short_timestep,
            long_timestep,
        })
    }
}

fn middle_of(properties: &BoreholeProperties) -> Length {
    properties.depth() + properties.length() / 2.0
}

/// An initialized system, ready to be stepped.
#[derive(Debug, Clone)]
pub struct ReadySystem {
    name: String,
    inlet_node: String,
    outlet_node: String,
    design_flow: VolumeRate,
    borehole_count: usize,
    soil: Soil,
    ground: Arc<dyn GroundTemperatureModel>,
    fluid: Fluid,
    location: Option<PlantLocation>,
    boreholes: Vec<Borehole>,
    average: Option<Borehole>,
    eft: Option<GFunction>,
    bwt: GFunction,
    generated: Option<GeneratedCurves>,
    mid_depth: Length,
    outputs: Option<SimulationOutputs>,
}

impl ReadySystem {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn inlet_node(&self) -> &str {
        &self.inlet_node
    }

    #[must_use]
    pub fn outlet_node(&self) -> &str {
        &self.outlet_node
    }

    #[must_use]
    pub fn design_flow(&self) -> VolumeRate {
        self.design_flow
    }

    #[must_use]
    pub fn borehole_count(&self) -> usize {
        self.borehole_count
    }

    #[must_use]
    pub fn soil(&self) -> &Soil {
        &self.soil
    }

    #[must_use]
    pub fn fluid(&self) -> &Fluid {
        &self.fluid
    }

    #[must_use]
    pub fn location(&self) -> Option<PlantLocation> {
        self.location
    }

    pub fn set_location(&mut self, location: PlantLocation) {
        self.location = Some(location);
    }

    #[must_use]
    pub fn boreholes(&self) -> &[Borehole] {
        &self.boreholes
    }

    /// The representative borehole, absent when the system has no field.
    #[must_use]
    pub fn average_borehole(&self) -> Option<&Borehole> {
        self.average.as_ref()
    }

    /// Borehole wall temperature g-function.
    #[must_use]
    pub fn bwt_g_function(&self) -> &GFunction {
        &self.bwt
    }

    /// Exiting fluid temperature g-function, when supplied with the input.
    #[must_use]
    pub fn eft_g_function(&self) -> Option<&GFunction> {
        self.eft.as_ref()
    }

    /// Raw solver output, when the wall g-function was generated.
    #[must_use]
    pub fn generated_curves(&self) -> Option<&GeneratedCurves> {
        self.generated.as_ref()
    }

    /// Depth at which the far-field temperature is sampled.
    #[must_use]
    pub fn mid_depth(&self) -> Length {
        self.mid_depth
    }

    /// Undisturbed ground temperature at mid-depth.
    ///
    /// `time` is measured from the start of the calendar year.
    #[must_use]
    pub fn far_field_temperature(&self, time: Time) -> ThermodynamicTemperature {
        self.ground.ground_temperature(self.mid_depth, time)
    }

    /// The outputs of the latest step, if any.
    #[must_use]
    pub fn outputs(&self) -> Option<&SimulationOutputs> {
        self.outputs.as_ref()
    }

    /// Advances the system by one plant step.
    ///
    /// No heat is exchanged: the fluid leaves at the inlet temperature and
    /// the borehole wall sits at the far-field temperature. The report
    /// channels are refreshed.
    pub fn simulate(
        &mut self,
        mass_flow: MassRate,
        inlet_temperature: ThermodynamicTemperature,
        time: Time,
    ) -> SimulationOutputs {
        let far_field = self.far_field_temperature(time);
        let outputs = SimulationOutputs {
            average_borehole_temperature: far_field,
            heat_transfer_rate: Power::new::<watt>(0.0),
            inlet_temperature,
            outlet_temperature: inlet_temperature,
            mass_flow,
            average_fluid_temperature: inlet_temperature,
            far_field_temperature: far_field,
        };
        self.outputs = Some(outputs);
        outputs
    }
}

/// A system in either lifecycle stage.
#[derive(Debug, Clone)]
pub enum HeatExchangerSystem {
    Loaded(LoadedSystem),
    Ready(Box<ReadySystem>),
}

impl HeatExchangerSystem {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Loaded(system) => system.name(),
            Self::Ready(system) => system.name(),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The initialized system, or `None` while it is still pending.
    #[must_use]
    pub fn ready(&self) -> Option<&ReadySystem> {
        match self {
            Self::Loaded(_) => None,
            Self::Ready(system) => Some(&**system),
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut ReadySystem> {
        match self {
            Self::Loaded(_) => None,
            Self::Ready(system) => Some(&mut **system),
        }
    }

    pub fn set_location(&mut self, location: PlantLocation) {
        match self {
            Self::Loaded(system) => system.set_location(location),
            Self::Ready(system) => system.set_location(location),
        }
    }

    /// Initializes the system if it is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] if initialization fails. The system then stays
    /// pending.
    pub fn initialize(
        &mut self,
        fluid: &Fluid,
        config: &GFunctionConfig,
    ) -> Result<&mut ReadySystem, InitError> {
        match self {
            Self::Ready(system) => Ok(&mut **system),
            Self::Loaded(system) => {
                let ready = system.initialize(fluid, config)?;
                *self = Self::Ready(Box::new(ready));
                self.initialize(fluid, config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, thermodynamic_temperature::degree_celsius, time::day,
    };

    use crate::{
        models::thermal::ghe::core::{
            BoreholeField, BoreholeProperties, LongTimestepConfig, ShortTimestepConfig,
            test_support::{conductivity, init_tracing, meters, scenario_design, water},
        },
        support::{ground::ConstantGroundTemperature, units::from_si},
    };

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn fluid() -> Fluid {
        Fluid::new("water", 0, Arc::new(water()))
    }

    fn props() -> BoreholeProperties {
        BoreholeProperties::new("props", &scenario_design()).unwrap()
    }

    fn soil() -> Soil {
        Soil::new(conductivity(2.423), from_si(2.343e6)).unwrap()
    }

    fn loaded(boreholes: Vec<Borehole>, bwt: Option<ResponseFactors>) -> LoadedSystem {
        LoadedSystem {
            name: "GHE".to_owned(),
            inlet_node: "IN".to_owned(),
            outlet_node: "OUT".to_owned(),
            design_flow: VolumeRate::new::<cubic_meter_per_second>(0.0004),
            borehole_count: boreholes.len(),
            soil: soil(),
            ground: Arc::new(ConstantGroundTemperature::new(celsius(13.0))),
            eft: None,
            bwt,
            boreholes,
            location: None,
        }
    }

    fn supplied_factors() -> ResponseFactors {
        ResponseFactors::new("bwt", props(), 1.0, vec![-10.0, -5.0, 0.0], vec![1.0, 4.0, 8.0])
            .unwrap()
    }

    /// A coarse configuration keeping the solvers quick.
    fn quick_config() -> GFunctionConfig {
        GFunctionConfig {
            short_timestep: ShortTimestepConfig {
                max_log_time: -12.0,
                soil_cells: 100,
                ..ShortTimestepConfig::default()
            },
            long_timestep: LongTimestepConfig {
                panels: 10,
                self_panels: 10,
                inner_panels: 60,
                ..LongTimestepConfig::default()
            },
            ..GFunctionConfig::default()
        }
    }

    #[test]
    fn supplied_factors_skip_generation() {
        let system = loaded(Vec::new(), Some(supplied_factors()));
        let ready = system.initialize(&fluid(), &GFunctionConfig::default()).unwrap();

        assert!(ready.generated_curves().is_none());
        assert!(ready.average_borehole().is_none());
        assert!(ready.eft_g_function().is_none());
        assert_relative_eq!(ready.bwt_g_function().value(-7.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(ready.mid_depth().get::<meter>(), 51.0, epsilon = 1e-12);
    }

    #[test]
    fn generated_curve_joins_both_solvers() {
        init_tracing();
        let field = BoreholeField::rectangular("f", &props(), 2, 1, meters(6.0), soil())
            .unwrap()
            .into_boreholes();
        let ready = loaded(field, None).initialize(&fluid(), &quick_config()).unwrap();

        let curves = ready.generated_curves().expect("curves should be generated");
        assert!(!curves.short_timestep.is_empty());
        assert_eq!(curves.long_timestep.len(), 11);

        let g = ready.bwt_g_function();
        assert_eq!(g.log_times().len(), curves.short_timestep.len() + curves.long_timestep.len());
        assert!(g.log_times().windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(g.value(-8.5), curves.long_timestep.values[0], epsilon = 1e-12);

        let average = ready.average_borehole().expect("field has boreholes");
        assert_relative_eq!(average.properties().length().get::<meter>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn generation_needs_boreholes() {
        let result = loaded(Vec::new(), None).initialize(&fluid(), &GFunctionConfig::default());
        assert_eq!(
            result.unwrap_err(),
            InitError::NoBoreholes {
                system: "GHE".to_owned()
            }
        );
    }

    #[test]
    fn generation_needs_design_flow() {
        let field = BoreholeField::rectangular("f", &props(), 1, 1, meters(6.0), soil())
            .unwrap()
            .into_boreholes();
        let mut system = loaded(field, None);
        system.design_flow = VolumeRate::new::<cubic_meter_per_second>(0.0);

        let result = system.initialize(&fluid(), &GFunctionConfig::default());
        assert!(matches!(result, Err(InitError::DesignFlow { .. })));
    }

    #[test]
    fn simulate_passes_fluid_through() {
        let mut system = HeatExchangerSystem::Loaded(loaded(Vec::new(), Some(supplied_factors())));
        assert!(system.ready().is_none());

        let ready = system
            .initialize(&fluid(), &GFunctionConfig::default())
            .expect("initialization should succeed");
        let outputs = ready.simulate(
            MassRate::new::<kilogram_per_second>(0.3),
            celsius(24.0),
            Time::new::<day>(100.0),
        );

        assert_relative_eq!(outputs.outlet_temperature.get::<degree_celsius>(), 24.0, epsilon = 1e-9);
        assert_relative_eq!(outputs.far_field_temperature.get::<degree_celsius>(), 13.0, epsilon = 1e-9);
        assert_relative_eq!(outputs.heat_transfer_rate.value, 0.0);
        assert_eq!(ready.outputs(), Some(&outputs));
        assert!(system.is_ready());
    }

    #[test]
    fn failed_initialization_stays_pending() {
        let mut system = HeatExchangerSystem::Loaded(loaded(Vec::new(), None));
        let result = system.initialize(&fluid(), &GFunctionConfig::default());
        assert!(matches!(result, Err(InitError::NoBoreholes { .. })));
        assert!(!system.is_ready());

        let HeatExchangerSystem::Loaded(pending) = &mut system else {
            panic!("system should still be pending");
        };
        pending.bwt = Some(supplied_factors());
        let ready = system.initialize(&fluid(), &GFunctionConfig::default()).unwrap();
        assert_eq!(ready.name(), "GHE");
        assert!(system.is_ready());
    }

    #[test]
    fn initialize_is_one_way() {
        let mut system = HeatExchangerSystem::Loaded(loaded(Vec::new(), Some(supplied_factors())));
        system.initialize(&fluid(), &GFunctionConfig::default()).unwrap();
        system.set_location(PlantLocation {
            loop_index: 1,
            branch: 2,
            component: 3,
        });

        let again = system.initialize(&fluid(), &GFunctionConfig::default()).unwrap();
        assert_eq!(again.location().map(|l| l.component), Some(3));
    }
}
