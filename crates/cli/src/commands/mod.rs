//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod audit;
mod generate;
mod inspect;
mod schema;

pub use audit::Audit;
pub use generate::Generate;
pub use inspect::Inspect;
pub use schema::Schema;
