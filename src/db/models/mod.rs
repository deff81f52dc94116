// Sub-modules organized by functional domain
pub mod api;
pub mod space;

// API response structures
pub use api::*;

// Space models
pub use space::*;
