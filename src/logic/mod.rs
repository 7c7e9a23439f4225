pub mod endpoint;
pub mod integrity;
pub mod operations;
pub mod processor;
pub mod reducer;
pub mod subgraph;

pub use integrity::{ensure_integrity, integrity_violations, IntegrityError, IntegrityViolation};
pub use operations::ReplayError;
pub use reducer::reduce;
