pub mod sync;
pub mod types;

pub use sync::{ScopeSyncClient, ScopeSyncError};
pub use types::ScopeDefinition;
