//! Backend Error Handling
//!
//! - **`types`** - the `BackendError` enum and status code mapping
//! - **`conversion`** - `IntoResponse` for JSON error bodies

pub mod types;

pub mod conversion;

pub use conversion::ErrorBody;
pub use types::{map_write_error, BackendError};

/// Result alias used by stores and handlers
pub type BackendResult<T> = Result<T, BackendError>;
