pub mod icon;
pub mod render;
pub mod scene;

pub use render::{FrameTimings, Renderer, SkiaRenderer};
pub use scene::{DrawItem, Scene, compose};
