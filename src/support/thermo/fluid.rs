//! Canonical fluid identifiers.
//!
//! A fluid type names a substance. Property models decide what the name
//! means, usually through a trait such as
//! [`ConstantFluid`](super::model::ConstantFluid).

mod water;

pub use water::Water;
