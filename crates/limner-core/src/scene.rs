//! Scene graph of a diagram.
//!
//! A [`Surface`] is a stack of [`Layer`]s holding trees of [`Node`]s. Every
//! node carries a [`NodeRole`] tag so that editor-only decorations can be
//! filtered out structurally. The [`Host`] tracks the off-screen
//! [`TemporaryContainer`]s that export stages live in.

pub mod host;

mod item;
mod layer;
mod node;
mod stroke;
mod surface;

pub use host::{ContainerId, Host, TemporaryContainer};
pub use item::CanvasItem;
pub use layer::{Layer, LayerKind, ordered_layers};
pub use node::{Node, NodeRole, Shape};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use surface::{Surface, Transform};
