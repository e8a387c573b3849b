//! Supporting utilities used by models.
//!
//! Everything here is public because it is useful outside the models that
//! introduced it, but the APIs are not stable.

pub mod constraint;
pub mod ground;
pub mod numeric;
pub mod plant;
pub mod thermo;
pub mod units;
