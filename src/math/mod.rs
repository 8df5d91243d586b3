mod color;
mod point;

pub use color::Rgb888;
pub use point::{ImagePoint, Point, SurfacePoint};
