//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod inspect;
pub mod models;
pub mod plot;
pub mod utils;

// Re-export main command functions
pub use inspect::{execute_audit, execute_log, execute_size, execute_view, execute_whose};
pub use models::PlotArgs;
pub use plot::{execute_plot, validate_args};
pub use utils::{display_schema, display_version, validate_profile_file};
