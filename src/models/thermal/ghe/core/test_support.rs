use uom::si::{
    f64::{Length, ThermalConductivity},
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    thermo::{fluid::Water, model::ConstantProperties},
    units::from_si,
};

use super::{Borehole, BoreholeDesign, BoreholeProperties, Pipe, Soil};

/// Routes solver logs to the test harness, filtered by `RUST_LOG`.
pub(super) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(super) fn water() -> ConstantProperties<Water> {
    ConstantProperties::default()
}

pub(super) fn meters(value: f64) -> Length {
    Length::new::<meter>(value)
}

pub(super) fn conductivity(value: f64) -> ThermalConductivity {
    ThermalConductivity::new::<watt_per_meter_kelvin>(value)
}

/// Pipe with an arbitrary heat capacity, for resistance-only tests.
pub(super) fn pipe(k: f64, outer_diameter: f64, wall_thickness: f64) -> Pipe {
    pipe_with_capacity(k, 1.542e6, outer_diameter, wall_thickness)
}

pub(super) fn pipe_with_capacity(
    k: f64,
    heat_capacity: f64,
    outer_diameter: f64,
    wall_thickness: f64,
) -> Pipe {
    Pipe::new(
        conductivity(k),
        from_si(heat_capacity),
        meters(outer_diameter),
        meters(wall_thickness),
    )
    .expect("test pipe should be valid")
}

pub(super) fn soil(k: f64) -> Soil {
    Soil::new(conductivity(k), from_si(2.343e6)).expect("test soil should be valid")
}

/// The 96 mm multipole reference borehole with a 32 mm pipe.
pub(super) fn design(shank_spacing: f64, grout_conductivity: f64) -> BoreholeDesign {
    BoreholeDesign {
        depth: meters(1.0),
        length: meters(100.0),
        diameter: meters(0.096),
        grout_conductivity: conductivity(grout_conductivity),
        grout_heat_capacity: from_si(3.9e6),
        shank_spacing: meters(shank_spacing),
        pipe: pipe(0.389, 0.032, 0.00243),
    }
}

/// Multipole reference borehole in 4.0 W/m·K soil.
pub(super) fn reference_borehole(grout_conductivity: f64) -> Borehole {
    let props = BoreholeProperties::new("reference", &design(0.032, grout_conductivity))
        .expect("reference design should be valid");
    Borehole::new("bh", props, meters(0.0), meters(0.0), soil(4.0))
}

/// Borehole used by the g-function scenarios: 100 m long, 1 m deep, 110 mm bore.
pub(super) fn scenario_design() -> BoreholeDesign {
    BoreholeDesign {
        depth: meters(1.0),
        length: meters(100.0),
        diameter: meters(0.109_982),
        grout_conductivity: conductivity(2.4),
        grout_heat_capacity: from_si(3.9e6),
        shank_spacing: meters(0.045_56),
        pipe: pipe_with_capacity(0.4, 1.585_3e6, 0.026_7, 0.002_43),
    }
}
