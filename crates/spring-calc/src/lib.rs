//! Dependent-property calculators for helical springs.
//!
//! Pure functions from a [`spring_types::SpringSpecification`] to derived
//! mechanical properties. None of them return errors: degenerate numeric
//! input degrades the affected property to a documented neutral value
//! (rate 0.0, factor of safety 1.0) instead.

pub mod coil;
pub mod compression;

pub use coil::{extension_rate, torsion_rate};
pub use compression::derive_properties;
