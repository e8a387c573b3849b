//! # Twine GHE
//!
//! Enhanced vertical ground heat exchanger models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! The crate computes the thermal response of a borehole field: multipole
//! borehole resistances, a short-timestep g-function from a radial
//! finite-volume model, a long-timestep g-function from the finite line
//! source, and the merged curve a building simulation looks up each step.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once more than one model needs it. Only [`support`] and the
//! types a model re-exports are public.

pub mod models;
pub mod support;
