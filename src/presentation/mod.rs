//! Terminal rendering. Everything here is draw-only: widgets are rebuilt
//! from screen state every frame and nothing mutates beyond list offsets.

mod components;
mod view;

pub use view::{UiContext, draw};
