//! Helix segment planning and solid synthesis for helical springs.
//!
//! `plan` turns a specification into an ordered, contiguous list of helix
//! segments; `solid` drives a geometry kernel through sweep, grinding, and
//! a solidification fallback chain over those segments. Failures are
//! encoded in the returned [`SolidResult`], never raised.

pub mod plan;
pub mod solid;

pub use plan::{plan_budgeted, plan_segments};
pub use solid::{synthesize_coil, synthesize_solid, SolidResult, SolidifyStrategy, SynthesisState};
