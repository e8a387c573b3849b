//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for physical quantities at its public boundaries.
//! This module adds the quantities that ground heat exchanger modeling needs
//! but [`uom`] does not name.
//!
//! ## Per-length quantities
//!
//! Borehole resistances and heat injection rates are quoted per metre of
//! borehole, so [`LinearThermalResistance`] (K·m/W) and [`LinearHeatRate`]
//! (W/m) are defined here. Use [`from_si`] to build them from SI values:
//!
//! ```
//! use twine_ghe::support::units::{LinearThermalResistance, from_si};
//!
//! let r: LinearThermalResistance = from_si(0.12);
//! assert_eq!(r.value, 0.12);
//! ```

mod quantities;

pub use quantities::{LinearHeatRate, LinearThermalResistance, VolumetricHeatCapacity, from_si};
