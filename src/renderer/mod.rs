//! Rendering module
//!
//! `scene` describes a frame as draw commands; `canvas` plays them onto a
//! Canvas2D context in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCommand, build_scene};
