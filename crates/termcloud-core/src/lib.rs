//! termcloud Core Types and Definitions
//!
//! This crate provides the foundational types shared by the termcloud
//! pipeline and its frontends:
//!
//! - **Annotations**: Enrichment records and their domains ([`annotation`] module)
//! - **Colors**: CSS colors and cyclic palettes ([`color`] module)
//! - **Geometry**: Points, sizes, bounds and rotated footprints ([`geometry`] module)
//! - **Draw**: Text measurement and layered SVG output ([`draw`] module)

pub mod annotation;
pub mod color;
pub mod draw;
pub mod geometry;
