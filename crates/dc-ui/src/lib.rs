//! # dc-ui
//! derm-centre/crates/dc-ui/src/lib.rs
//!
//! Server-rendered pages. Handlers build a page with `XxxPage::build` and
//! call [`askama::Template::render`] on it.

pub mod pages;
pub mod tr;
pub mod views;

pub use askama::Template;
pub use pages::*;
pub use tr::Tr;
pub use views::{Layout, PageContext, Section};
