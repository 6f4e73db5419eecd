//! valbum - album page viewer
//!
//! Keyboard navigation between album pages and click, wheel and drag
//! pan-zoom of the page image. The browser build wires these to the DOM;
//! natively the same controllers replay recorded input traces.

pub mod config;
pub mod constants;
pub mod error;
pub mod keybindings;
pub mod layout;
pub mod navigation;
pub mod replay;
pub mod state;
pub mod surface;
pub mod zoom_math;

pub use config::ViewerConfig;
pub use error::ViewerError;
pub use state::ViewportController;
pub use zoom_math::Transform;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
