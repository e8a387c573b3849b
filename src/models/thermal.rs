//! Thermal systems models.
//!
//! This module contains models for ground-coupled heat exchange.

pub mod ghe;
