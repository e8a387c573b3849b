use std::f64::consts::{PI, SQRT_2};

use crate::models::thermal::ghe::core::ShortTimestepConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Layer {
    Fluid,
    Convection,
    Pipe,
    Grout,
    Soil,
}

/// An annular control volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Cell {
    pub(super) layer: Layer,
    pub(super) inner: f64,
    pub(super) center: f64,
    pub(super) outer: f64,
    pub(super) conductivity: f64,
    pub(super) heat_capacity: f64,
}

impl Cell {
    fn annulus(layer: Layer, inner: f64, thickness: f64, conductivity: f64, heat_capacity: f64) -> Self {
        Self {
            layer,
            inner,
            center: inner + thickness / 2.0,
            outer: inner + thickness,
            conductivity,
            heat_capacity,
        }
    }

    /// Volume per unit length.
    pub(super) fn volume(&self) -> f64 {
        PI * (self.outer * self.outer - self.inner * self.inner)
    }

    /// Resistance from the cell centre out to its outer face.
    pub(super) fn outer_half_resistance(&self) -> f64 {
        (self.outer / self.center).ln() / (2.0 * PI * self.conductivity)
    }

    /// Resistance from the inner face in to the cell centre.
    pub(super) fn inner_half_resistance(&self) -> f64 {
        (self.center / self.inner).ln() / (2.0 * PI * self.conductivity)
    }
}

/// Inputs that fix the mesh for one borehole at one flow condition. SI units.
#[derive(Debug, Clone, Copy)]
pub(super) struct MeshInputs {
    pub(super) borehole_radius: f64,
    pub(super) pipe_outer_radius: f64,
    pub(super) pipe_inner_radius: f64,
    pub(super) pipe_wall_thickness: f64,
    pub(super) pipe_heat_capacity: f64,
    pub(super) grout_heat_capacity: f64,
    pub(super) soil_conductivity: f64,
    pub(super) soil_heat_capacity: f64,
    pub(super) fluid_heat_capacity: f64,
    /// Equivalent convective resistance between fluid and pipe.
    pub(super) convection_resistance: f64,
    /// Equivalent resistance of the pipe wall and grout together.
    pub(super) tube_grout_resistance: f64,
}

/// Builds cells from the fluid core outward.
///
/// The two pipe legs are lumped into one pipe of radius `√2·r_pipe` so its
/// cross section matches both legs. Convection, pipe, and grout cells get
/// conductivities chosen so the mesh reproduces the borehole resistance.
pub(super) fn build(inputs: &MeshInputs, config: &ShortTimestepConfig) -> Vec<Cell> {
    let pcf_thickness = inputs.pipe_wall_thickness / config.pipe_cells as f64;
    let r_pipe_out = SQRT_2 * inputs.pipe_outer_radius;
    let r_pipe_in = r_pipe_out - inputs.pipe_wall_thickness;
    let r_conv = r_pipe_in - config.convection_cells as f64 * pcf_thickness;
    // The innermost fluid cell is only half thick.
    let r_fluid = r_conv - (config.fluid_cells as f64 - 0.5) * pcf_thickness;

    let r_borehole = inputs.borehole_radius;
    let grout_thickness = (r_borehole - r_pipe_out) / config.grout_cells as f64;
    let r_outer = config.outer_radius.value;
    let soil_thickness = (r_outer - r_borehole) / config.soil_cells as f64;

    let k_conv = (r_pipe_in / r_conv).ln() / (2.0 * PI * inputs.convection_resistance);
    let k_tube_grout = (r_borehole / r_pipe_in).ln() / (2.0 * PI * inputs.tube_grout_resistance);

    // Fluid heat capacity is scaled to hold the contents of both legs.
    let fluid_capacity = 2.0 * inputs.fluid_heat_capacity * inputs.pipe_inner_radius.powi(2)
        / (r_conv * r_conv - r_fluid * r_fluid);
    let k_fluid = config.fluid_conductivity.value;

    let mut cells = Vec::with_capacity(
        config.fluid_cells
            + config.convection_cells
            + config.pipe_cells
            + config.grout_cells
            + config.soil_cells,
    );

    for i in 0..config.fluid_cells {
        let center = r_fluid + i as f64 * pcf_thickness;
        let inner = if i == 0 {
            center
        } else {
            center - pcf_thickness / 2.0
        };
        cells.push(Cell {
            layer: Layer::Fluid,
            inner,
            center,
            outer: center + pcf_thickness / 2.0,
            conductivity: k_fluid,
            heat_capacity: fluid_capacity,
        });
    }

    for i in 0..config.convection_cells {
        let inner = r_conv + i as f64 * pcf_thickness;
        cells.push(Cell::annulus(Layer::Convection, inner, pcf_thickness, k_conv, 1.0));
    }

    for i in 0..config.pipe_cells {
        let inner = r_pipe_in + i as f64 * pcf_thickness;
        cells.push(Cell::annulus(
            Layer::Pipe,
            inner,
            pcf_thickness,
            k_tube_grout,
            inputs.pipe_heat_capacity,
        ));
    }

    for i in 0..config.grout_cells {
        let inner = r_pipe_out + i as f64 * grout_thickness;
        cells.push(Cell::annulus(
            Layer::Grout,
            inner,
            grout_thickness,
            k_tube_grout,
            inputs.grout_heat_capacity,
        ));
    }

    for i in 0..config.soil_cells {
        let inner = r_borehole + i as f64 * soil_thickness;
        cells.push(Cell::annulus(
            Layer::Soil,
            inner,
            soil_thickness,
            inputs.soil_conductivity,
            inputs.soil_heat_capacity,
        ));
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn inputs() -> MeshInputs {
        MeshInputs {
            borehole_radius: 0.054_991,
            pipe_outer_radius: 0.013_35,
            pipe_inner_radius: 0.010_92,
            pipe_wall_thickness: 0.002_43,
            pipe_heat_capacity: 1.585_3e6,
            grout_heat_capacity: 3.9e6,
            soil_conductivity: 2.432,
            soil_heat_capacity: 2.432e6,
            fluid_heat_capacity: 4181.0 * 998.2,
            convection_resistance: 0.01,
            tube_grout_resistance: 0.1,
        }
    }

    #[test]
    fn layers_in_order_and_contiguous() {
        let config = ShortTimestepConfig::default();
        let cells = build(&inputs(), &config);

        assert_eq!(cells.len(), 3 + 1 + 4 + 27 + 500);
        assert_eq!(cells[0].layer, Layer::Fluid);
        assert_eq!(cells[3].layer, Layer::Convection);
        assert_eq!(cells[4].layer, Layer::Pipe);
        assert_eq!(cells[8].layer, Layer::Grout);
        assert_eq!(cells[35].layer, Layer::Soil);

        for pair in cells.windows(2) {
            assert_relative_eq!(pair[0].outer, pair[1].inner, epsilon = 1e-12);
        }
        assert_relative_eq!(cells[34].outer, 0.054_991, epsilon = 1e-12);
        assert_relative_eq!(cells.last().unwrap().outer, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn boundary_fluid_cell_is_half_thick() {
        let cells = build(&inputs(), &ShortTimestepConfig::default());
        let first = cells[0];
        let second = cells[1];
        assert_relative_eq!(first.inner, first.center);
        assert_relative_eq!(
            first.outer - first.inner,
            (second.outer - second.inner) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn convection_cell_reproduces_its_resistance() {
        let i = inputs();
        let cells = build(&i, &ShortTimestepConfig::default());
        let conv = cells[3];
        let r = (conv.outer / conv.inner).ln() / (2.0 * PI * conv.conductivity);
        assert_relative_eq!(r, i.convection_resistance, epsilon = 1e-12);
    }
}
