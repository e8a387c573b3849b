//! Short-timestep g-function from a radial finite-volume model.
//!
//! The borehole is reduced to concentric annuli (fluid, convection film, pipe,
//! grout, soil) and marched with backward Euler under a constant heat flux at
//! the fluid core. The borehole wall temperature rise, made dimensionless,
//! gives the g-function at times too early for the line source.

mod mesh;

use std::f64::consts::PI;

use tracing::debug;
use uom::si::f64::{MassRate, ThermodynamicTemperature};

use crate::support::{
    numeric::solve_tridiagonal,
    thermo::{FluidProperties, PropertyError},
};

use super::{Borehole, Curve, ShortTimestepConfig};

use mesh::{Cell, Layer, MeshInputs};

/// Runs the radial model for one borehole at the given design flow.
///
/// `temperature` sets both the fluid property evaluation point and the
/// uniform initial temperature. Samples are `(ln(t/ts), g)` after every
/// step until `ln(t/ts)` reaches the configured cutoff, with
/// `ts = L²/(9·α_soil)`.
///
/// # Errors
///
/// Returns [`PropertyError`] if a fluid property lookup fails.
///
/// # Panics
///
/// Panics if the configuration has no grout or no soil cells, or fewer
/// than two cells in total.
pub fn short_timestep_g_function(
    borehole: &Borehole,
    fluid: &(impl FluidProperties + ?Sized),
    mass_flow: MassRate,
    temperature: ThermodynamicTemperature,
    config: &ShortTimestepConfig,
) -> Result<Curve, PropertyError> {
    assert!(
        config.grout_cells > 0 && config.soil_cells > 0,
        "radial mesh needs grout and soil cells"
    );

    let pipe = borehole.properties().pipe();
    let pipe_resistance = pipe.resistance(fluid, mass_flow, temperature)?;
    let convection = pipe.convection_resistance(fluid, mass_flow, temperature)?.value;
    let borehole_resistance = borehole.average_resistance_with(pipe_resistance).value;
    let tube_grout = borehole_resistance - convection / 2.0;

    let inputs = MeshInputs {
        borehole_radius: borehole.radius_si(),
        pipe_outer_radius: pipe.outer_radius_si(),
        pipe_inner_radius: pipe.inner_diameter_si() / 2.0,
        pipe_wall_thickness: pipe.wall_thickness_si(),
        pipe_heat_capacity: pipe.heat_capacity_si(),
        grout_heat_capacity: borehole.grout_heat_capacity_si(),
        soil_conductivity: borehole.soil().conductivity_si(),
        soil_heat_capacity: borehole.soil().heat_capacity_si(),
        fluid_heat_capacity: fluid.cp(temperature)?.value * fluid.density(temperature)?.value,
        convection_resistance: borehole_resistance - tube_grout,
        tube_grout_resistance: tube_grout,
    };
    let cells = mesh::build(&inputs, config);

    let dt = config.timestep.value;
    let q = config.heat_flux.value;
    let t0 = temperature.value;
    let c0 = 2.0 * PI * inputs.soil_conductivity;
    let ts = borehole.length_si().powi(2) / (9.0 * borehole.soil().diffusivity());
    let max_time = config.max_log_time.exp() * ts;

    let mut system = System::assemble(&cells, dt);
    let wall = WallProbe::new(&cells, config);

    let mut temperatures = vec![t0; cells.len()];
    let mut log_times = Vec::new();
    let mut values = Vec::new();
    let mut time = 0.0;

    while time < max_time {
        system.step(&mut temperatures, q);
        time += dt;

        log_times.push((time / ts).ln());
        values.push(c0 * (wall.temperature(&temperatures) - t0) / q);
    }

    debug!(
        borehole = borehole.name(),
        steps = values.len(),
        final_log_time = log_times.last().copied(),
        "short-timestep march finished"
    );

    Ok(Curve { log_times, values })
}

/// Time-invariant coefficients of the implicit update.
struct System {
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    /// `Δt/(ρc·V)` of the flux boundary cell.
    flux_gain: f64,
    /// Working copy of `c`, which the solver overwrites.
    c_work: Vec<f64>,
}

impl System {
    fn assemble(cells: &[Cell], dt: f64) -> Self {
        let n = cells.len();
        assert!(n >= 2, "radial mesh needs at least two cells");

        let mut a = vec![0.0; n];
        let mut b = vec![0.0; n];
        let mut c = vec![0.0; n];

        let storage = |cell: &Cell| cell.heat_capacity * cell.volume() / dt;
        let east = |i: usize| {
            1.0 / (cells[i].outer_half_resistance() + cells[i + 1].inner_half_resistance())
        };

        // Constant flux into the fluid core.
        let ad0 = storage(&cells[0]);
        let ae0 = east(0);
        b[0] = -ae0 / ad0 - 1.0;
        c[0] = ae0 / ad0;

        for i in 1..n - 1 {
            let ad = storage(&cells[i]);
            let aw = -east(i - 1);
            let ae = east(i);
            a[i] = -aw / ad;
            b[i] = aw / ad - ae / ad - 1.0;
            c[i] = ae / ad;
        }

        // Fixed far-field temperature.
        b[n - 1] = 1.0;

        Self {
            a,
            b,
            c,
            flux_gain: 1.0 / ad0,
            c_work: vec![0.0; n],
        }
    }

    /// Advances `temperatures` one step in place.
    fn step(&mut self, temperatures: &mut [f64], q: f64) {
        let n = temperatures.len();
        for t in temperatures[..n - 1].iter_mut() {
            *t = -*t;
        }
        temperatures[0] -= q * self.flux_gain;

        self.c_work.copy_from_slice(&self.c);
        solve_tridiagonal(&self.a, &self.b, &mut self.c_work, temperatures);
    }
}

/// Borehole wall temperature from the grout/soil interface.
struct WallProbe {
    grout: usize,
    grout_conductance: f64,
    soil_conductance: f64,
}

impl WallProbe {
    fn new(cells: &[Cell], config: &ShortTimestepConfig) -> Self {
        let grout = config.fluid_cells + config.convection_cells + config.pipe_cells
            + config.grout_cells
            - 1;
        let (g, s) = (cells[grout], cells[grout + 1]);
        debug_assert!(g.layer == Layer::Grout && s.layer == Layer::Soil);
        Self {
            grout,
            grout_conductance: 2.0 * PI * g.conductivity / (g.outer / g.inner).ln(),
            soil_conductance: 2.0 * PI * s.conductivity / (s.center / g.inner).ln(),
        }
    }

    fn temperature(&self, temperatures: &[f64]) -> f64 {
        let (tg, ts) = (temperatures[self.grout], temperatures[self.grout + 1]);
        (self.grout_conductance * tg + self.soil_conductance * ts)
            / (self.grout_conductance + self.soil_conductance)
    }
}
