//! Smoke probes for the extension families.
//!
//! `modules` calls each family once on random inputs; `scatter` checks the
//! five scatter reductions against hand-computed results. Both fold their
//! checks into a [`Report`] through [`run_check`], so a failing or panicking
//! check never stops the run.

mod extension;
mod guard;
mod modules;
mod outcome;
mod residency;
mod scatter;

pub use extension::Extension;
pub use guard::run_check;
pub use modules::run_module_check;
pub use outcome::{CheckOutcome, Report};
pub use residency::{Residency, outputs_resident};
pub use scatter::{SCATTER_CASES, ScatterCase, check_case, run_scatter_suite};
