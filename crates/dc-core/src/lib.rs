//! derm-centre/crates/dc-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the clinic site.

pub mod contact;
pub mod error;
pub mod i18n;
pub mod likes;
pub mod models;
pub mod query;
pub mod seo;
pub mod traits;
pub mod wizard;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
