pub mod compose;
pub mod draw;
pub mod fbdev;
pub mod fd;
pub mod framebuffer;
pub mod image;
pub mod mapping;
pub mod math;

// Re-export the engine surface so callers don't need the module paths
pub use compose::Geometry;
pub use framebuffer::FrameBuffer;
pub use image::Image;
pub use math::{ImagePoint, Point, Rgb888, SurfacePoint};
