//! Boreholes: geometry, grout, soil, and multipole resistances.

mod discretization;
mod multipole;

pub use discretization::Point;
pub use multipole::MultipoleParameters;

pub(crate) use discretization::{AxialPoints, Discretization};

use std::f64::consts::PI;

use tracing::warn;
use uom::si::{
    f64::{Length, MassRate, ThermalConductivity, ThermodynamicTemperature},
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    constraint::{Constraint, NonNegative},
    thermo::{FluidProperties, PropertyError},
    units::{LinearThermalResistance, VolumetricHeatCapacity, from_si},
};

use super::{GeometryError, LongTimestepConfig, Pipe, pipe::positive};

/// Direct coupling resistance used when the multipole estimate goes negative, K·m/W.
///
/// Large enough to make the leg-to-leg short circuit negligible.
const DIRECT_COUPLING_FALLBACK: f64 = 70.0;

/// User-facing description of a borehole template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoreholeDesign {
    /// Depth of the borehole top below grade.
    pub depth: Length,
    /// Active length of the borehole.
    pub length: Length,
    pub diameter: Length,
    pub grout_conductivity: ThermalConductivity,
    pub grout_heat_capacity: VolumetricHeatCapacity,
    /// Centre-to-centre distance between the two U-tube legs.
    pub shank_spacing: Length,
    pub pipe: Pipe,
}

/// Validated borehole template shared by value across boreholes.
#[derive(Debug, Clone, PartialEq)]
pub struct BoreholeProperties {
    name: String,
    depth: f64,
    length: f64,
    diameter: f64,
    grout_conductivity: f64,
    grout_heat_capacity: f64,
    shank_spacing: f64,
    pipe: Pipe,
}

impl BoreholeProperties {
    /// Validates a design and stores it under an upper-cased name.
    ///
    /// Shank spacing outside `[d_pipe, d_borehole − 2·d_pipe]` is clamped to
    /// the nearest bound with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if a dimension or property is not positive.
    pub fn new(name: &str, design: &BoreholeDesign) -> Result<Self, GeometryError> {
        NonNegative::check(&design.depth)
            .map_err(|source| GeometryError::NotPositive { field: "depth", source })?;
        positive("borehole length", &design.length)?;
        positive("borehole diameter", &design.diameter)?;
        positive("grout conductivity", &design.grout_conductivity)?;
        positive("grout heat capacity", &design.grout_heat_capacity)?;
        NonNegative::check(&design.shank_spacing).map_err(|source| {
            GeometryError::NotPositive {
                field: "shank spacing",
                source,
            }
        })?;

        let name = name.trim().to_uppercase();
        let diameter = design.diameter.get::<meter>();
        let pipe_od = design.pipe.outer_diameter().get::<meter>();
        let min_shank = pipe_od;
        let max_shank = diameter - 2.0 * pipe_od;

        let mut shank_spacing = design.shank_spacing.get::<meter>();
        if shank_spacing < min_shank {
            warn!(
                borehole = %name,
                shank_spacing,
                clamped = min_shank,
                "shank spacing below pipe outer diameter; using pipe outer diameter"
            );
            shank_spacing = min_shank;
        } else if shank_spacing > max_shank {
            warn!(
                borehole = %name,
                shank_spacing,
                clamped = max_shank,
                "shank spacing leaves no room between pipes and borehole wall; clamping"
            );
            shank_spacing = max_shank;
        }

        Ok(Self {
            name,
            depth: design.depth.get::<meter>(),
            length: design.length.get::<meter>(),
            diameter,
            grout_conductivity: design.grout_conductivity.get::<watt_per_meter_kelvin>(),
            grout_heat_capacity: design.grout_heat_capacity.value,
            shank_spacing,
            pipe: design.pipe,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn depth(&self) -> Length {
        Length::new::<meter>(self.depth)
    }

    #[must_use]
    pub fn length(&self) -> Length {
        Length::new::<meter>(self.length)
    }

    #[must_use]
    pub fn diameter(&self) -> Length {
        Length::new::<meter>(self.diameter)
    }

    #[must_use]
    pub fn grout_conductivity(&self) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(self.grout_conductivity)
    }

    #[must_use]
    pub fn grout_heat_capacity(&self) -> VolumetricHeatCapacity {
        from_si(self.grout_heat_capacity)
    }

    #[must_use]
    pub fn shank_spacing(&self) -> Length {
        Length::new::<meter>(self.shank_spacing)
    }

    #[must_use]
    pub fn pipe(&self) -> &Pipe {
        &self.pipe
    }

    /// Averages already-validated templates field by field.
    ///
    /// Each sum is divided by `count`, the declared borehole count, which is
    /// the number of templates for a consistent system.
    pub(super) fn mean<'a>(
        name: &str,
        templates: impl IntoIterator<Item = &'a BoreholeProperties>,
        count: usize,
    ) -> Self {
        let mut sum = [0.0_f64; 10];
        for p in templates {
            let fields = [
                p.depth,
                p.length,
                p.diameter,
                p.grout_conductivity,
                p.grout_heat_capacity,
                p.shank_spacing,
                p.pipe.conductivity_si(),
                p.pipe.heat_capacity_si(),
                p.pipe.outer_diameter().get::<meter>(),
                p.pipe.wall_thickness_si(),
            ];
            for (s, f) in sum.iter_mut().zip(fields) {
                *s += f;
            }
        }
        let n = count as f64;
        let [depth, length, diameter, kg, cg, shank, kp, cp, od, wt] = sum.map(|s| s / n);

        Self {
            name: name.to_uppercase(),
            depth,
            length,
            diameter,
            grout_conductivity: kg,
            grout_heat_capacity: cg,
            shank_spacing: shank,
            pipe: Pipe::from_si_parts(kp, cp, od, wt),
        }
    }
}

/// Far-field soil surrounding the boreholes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Soil {
    conductivity: f64,
    heat_capacity: f64,
}

impl Soil {
    /// # Errors
    ///
    /// Returns [`GeometryError`] unless both properties are strictly positive.
    pub fn new(
        conductivity: ThermalConductivity,
        heat_capacity: VolumetricHeatCapacity,
    ) -> Result<Self, GeometryError> {
        positive("soil conductivity", &conductivity)?;
        positive("soil heat capacity", &heat_capacity)?;
        Ok(Self {
            conductivity: conductivity.get::<watt_per_meter_kelvin>(),
            heat_capacity: heat_capacity.value,
        })
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(self.conductivity)
    }

    #[must_use]
    pub fn heat_capacity(&self) -> VolumetricHeatCapacity {
        from_si(self.heat_capacity)
    }

    /// Thermal diffusivity `k/(ρc)` in m²/s.
    #[must_use]
    pub fn diffusivity(&self) -> f64 {
        self.conductivity / self.heat_capacity
    }

    pub(super) fn conductivity_si(&self) -> f64 {
        self.conductivity
    }

    pub(super) fn heat_capacity_si(&self) -> f64 {
        self.heat_capacity
    }
}

/// One borehole placed in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Borehole {
    name: String,
    properties: BoreholeProperties,
    x: f64,
    y: f64,
    soil: Soil,
    multipole: MultipoleParameters,
}

impl Borehole {
    #[must_use]
    pub fn new(name: &str, properties: BoreholeProperties, x: Length, y: Length, soil: Soil) -> Self {
        let radius = properties.diameter / 2.0;
        let multipole = MultipoleParameters::new(
            radius,
            properties.shank_spacing,
            properties.pipe.outer_radius_si(),
            properties.grout_conductivity,
            soil.conductivity,
        );
        Self {
            name: name.trim().to_uppercase(),
            properties,
            x: x.get::<meter>(),
            y: y.get::<meter>(),
            soil,
            multipole,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn properties(&self) -> &BoreholeProperties {
        &self.properties
    }

    #[must_use]
    pub fn location(&self) -> (Length, Length) {
        (Length::new::<meter>(self.x), Length::new::<meter>(self.y))
    }

    #[must_use]
    pub fn soil(&self) -> &Soil {
        &self.soil
    }

    #[must_use]
    pub fn radius(&self) -> Length {
        Length::new::<meter>(self.radius_si())
    }

    #[must_use]
    pub fn multipole(&self) -> &MultipoleParameters {
        &self.multipole
    }

    /// `2π·k_soil`, the factor that makes wall temperature rise dimensionless.
    #[must_use]
    pub fn c0(&self) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(2.0 * PI * self.soil.conductivity)
    }

    /// Fluid-to-pipe-wall resistance of one leg.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn pipe_resistance(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<LinearThermalResistance, PropertyError> {
        self.properties.pipe.resistance(fluid, mass_flow, temperature)
    }

    /// Leg-to-leg resistance given the pipe resistance.
    #[must_use]
    pub fn total_internal_resistance_with(
        &self,
        pipe_resistance: LinearThermalResistance,
    ) -> LinearThermalResistance {
        let kg = self.properties.grout_conductivity;
        from_si(self.multipole.total_internal(kg, self.beta(pipe_resistance.value)))
    }

    /// Leg-to-leg resistance at the given flow.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn total_internal_resistance(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<LinearThermalResistance, PropertyError> {
        let rp = self.pipe_resistance(fluid, mass_flow, temperature)?;
        Ok(self.total_internal_resistance_with(rp))
    }

    /// Fluid-to-borehole-wall resistance given the pipe resistance.
    #[must_use]
    pub fn average_resistance_with(
        &self,
        pipe_resistance: LinearThermalResistance,
    ) -> LinearThermalResistance {
        let kg = self.properties.grout_conductivity;
        from_si(self.multipole.average(kg, self.beta(pipe_resistance.value)))
    }

    /// Fluid-to-borehole-wall resistance at the given flow.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn average_resistance(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<LinearThermalResistance, PropertyError> {
        let rp = self.pipe_resistance(fluid, mass_flow, temperature)?;
        Ok(self.average_resistance_with(rp))
    }

    /// Grout share of the borehole resistance, `R_b − R_p/2`.
    #[must_use]
    pub fn grout_resistance_with(
        &self,
        pipe_resistance: LinearThermalResistance,
    ) -> LinearThermalResistance {
        self.average_resistance_with(pipe_resistance) - pipe_resistance / 2.0
    }

    /// Grout share of the borehole resistance at the given flow.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn grout_resistance(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<LinearThermalResistance, PropertyError> {
        let rp = self.pipe_resistance(fluid, mass_flow, temperature)?;
        Ok(self.grout_resistance_with(rp))
    }

    /// Thermal short circuit between the two legs, `4·Ra·Rb/(4·Rb − Ra)`.
    ///
    /// A negative estimate is replaced by a large fixed resistance.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if a fluid property lookup fails.
    pub fn direct_coupling_resistance(
        &self,
        fluid: &(impl FluidProperties + ?Sized),
        mass_flow: MassRate,
        temperature: ThermodynamicTemperature,
    ) -> Result<LinearThermalResistance, PropertyError> {
        let rp = self.pipe_resistance(fluid, mass_flow, temperature)?;
        let ra = self.total_internal_resistance_with(rp).value;
        let rb = self.average_resistance_with(rp).value;

        // TODO: find which grout/pipe combinations trip the fallback and whether 70 K·m/W holds for all of them.
        let r12 = multipole::direct_coupling(ra, rb).unwrap_or_else(|| {
            warn!(
                borehole = %self.name,
                ra,
                rb,
                fallback = DIRECT_COUPLING_FALLBACK,
                "negative direct coupling resistance; using fallback"
            );
            DIRECT_COUPLING_FALLBACK
        });
        Ok(from_si(r12))
    }

    /// Point sets for the finite line source integral.
    ///
    /// The panel counts come from the solver configuration, which is only
    /// known at system initialization, so the sets are built there once per
    /// borehole and shared read-only by every time sample.
    pub(crate) fn discretize(&self, config: &LongTimestepConfig) -> Discretization {
        Discretization::new(
            self.x,
            self.y,
            self.properties.depth,
            self.properties.length,
            self.radius_si(),
            config,
        )
    }

    pub(crate) fn radius_si(&self) -> f64 {
        self.properties.diameter / 2.0
    }

    pub(crate) fn length_si(&self) -> f64 {
        self.properties.length
    }

    pub(crate) fn grout_conductivity_si(&self) -> f64 {
        self.properties.grout_conductivity
    }

    pub(crate) fn grout_heat_capacity_si(&self) -> f64 {
        self.properties.grout_heat_capacity
    }

    fn beta(&self, pipe_resistance: f64) -> f64 {
        2.0 * PI * self.properties.grout_conductivity * pipe_resistance
    }
}
