//! CLI command handlers. Each command is in its own file.

mod browse;
mod completions;
mod normalize;
mod report;
mod resolve;
mod services;

pub use browse::run_browse;
pub use completions::run_completions;
pub use normalize::run_normalize;
pub use resolve::run_resolve;
pub use services::run_services;
