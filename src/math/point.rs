/// 2D integer coordinate: x grows right, y grows down, origin at the
/// logical top-left of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl From<ImagePoint> for SurfacePoint {
    fn from(p: ImagePoint) -> Self {
        Self::new(i32::from(p.x), i32::from(p.y))
    }
}

/// Local coordinate within an off-screen image.
pub type ImagePoint = Point<i16>;

/// Coordinate on the display surface, wide enough for screen offsets.
pub type SurfacePoint = Point<i32>;
