//! Service layer
//!
//! Services contain the business logic of the backend: build submission
//! and supervision, invocation planning, target discovery, image launch,
//! and the static package catalog. The HTTP layer above only translates
//! between these services and the wire.

mod build;
mod catalog;
mod image;
mod invocation;
mod probe;
mod process;
mod registry;

pub use build::{BuildService, SubmitError};
pub use catalog::installable_packages;
pub use image::{ImageError, start_container};
pub use invocation::{
    BuildPlan, DEFAULT_FRONTEND_IMAGE, DalecPlanner, InvocationPlanner, ScratchPlan,
};
pub use probe::TargetProbe;
pub use registry::BuildRegistry;
