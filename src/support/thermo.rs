//! Fluid property access for circulating heat transfer fluids.
//!
//! Heat exchanger models ask for transport properties at a temperature
//! through the capability traits in [`capability`]. Anything that implements
//! all four of them is a [`FluidProperties`] source and gets the Prandtl
//! number for free.

mod error;

pub mod capability;
pub mod fluid;
pub mod model;

pub use capability::FluidProperties;
pub use error::PropertyError;
