//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod identity;
mod patients;
mod session;
mod workspace;

pub use identity::IdentityService;
pub use patients::PatientService;
pub use session::ActiveSession;
pub use workspace::{GenderFilter, PatientWorkspace, WorkspaceStats};
