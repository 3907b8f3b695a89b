//! Limner Core Types and Definitions
//!
//! This crate provides the foundational types the Limner export pipeline works
//! on. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Scene**: The scene graph of tagged nodes, z-ordered layers, the live
//!   [`scene::Surface`] and the [`scene::Host`] that tracks off-screen
//!   containers ([`scene`] module)
//! - **Render**: SVG serialization and rasterization of a scene ([`render`] module)

pub mod color;
pub mod geometry;
pub mod render;
pub mod scene;
