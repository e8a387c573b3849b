//! Fluid property models.

mod constant;

pub use constant::{ConstantFluid, ConstantParameters, ConstantParametersError, ConstantProperties};
