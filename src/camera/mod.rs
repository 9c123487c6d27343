//! Camera and viewport for view and projection.

mod perspective;
mod viewport;

pub use perspective::{Camera, INFINITE_DEPTH};
pub use viewport::Viewport;
