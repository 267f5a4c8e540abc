//! Format handlers for backend response envelopes
//!
//! Each handler recognises one envelope convention and turns it into a
//! [`NormalizedResult`](crate::normalize::NormalizedResult).
//!
//! ## Key Components
//!
//! - [`FormatHandler`] - Trait every envelope handler implements
//! - [`TieredEnvelopeHandler`] - `ReturnInfo` / `BusinessInfo` two-tier status
//! - [`StatusEnvelopeHandler`] - `status` + `custom` payload
//! - [`HandlerRegistry`] - Ordered, append-only handler chain
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pagefeed::handlers::{HandlerRegistry, StatusEnvelopeHandler};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register(Arc::new(StatusEnvelopeHandler::new()));
//! assert_eq!(registry.len(), 1);
//! ```

mod registry;
mod status;
mod tiered;
mod traits;

pub use registry::{HandlerRegistry, RegistryError, global, install};
pub use status::StatusEnvelopeHandler;
pub use tiered::TieredEnvelopeHandler;
pub use traits::{FormatHandler, HandlerOutcome};
