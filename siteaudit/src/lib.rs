pub mod commands;
pub mod handlers;

pub use handlers::{handle_audit, render_report, resolve_output_path};
