//! dmml-core: stable foundation for the DMML scene and layout crates.
//!
//! Contains:
//! - ids (stable compact IDs for scene nodes)
//! - error (shared error types)
//! - color (normalized RGB colors and `#RRGGBB` parsing)
//! - modify (nestable batched-modify bookkeeping)
//! - observer (ordered callback lists)

pub mod color;
pub mod error;
pub mod ids;
pub mod modify;
pub mod observer;

// Re-exports: nice ergonomics for downstream crates
pub use color::Rgb;
pub use error::{DmmlError, DmmlResult};
pub use ids::*;
pub use modify::ModifiedState;
pub use observer::{ObserverId, Observers};
