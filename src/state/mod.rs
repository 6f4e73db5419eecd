//! Viewer state: pan drag sessions and the viewport controller.

mod pan;
mod viewer;


pub use pan::{DragEnd, PanDragState};
pub use viewer::{ClickOutcome, PointerUp, ViewportController, ZoomOutcome};
