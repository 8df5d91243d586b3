//! Shape drawing over [`Image`]. Plain pixel loops that inherit the
//! buffer's silent clipping, so shapes may hang off the edges.

use crate::image::Image;
use crate::math::ImagePoint;

/// Draws a straight line between two points using Bresenham's algorithm.
pub fn line(image: &mut Image, from: ImagePoint, to: ImagePoint, rgb: impl Into<u32>) {
    let rgb = rgb.into();
    let (mut x, mut y) = (i32::from(from.x), i32::from(from.y));
    let (x2, y2) = (i32::from(to.x), i32::from(to.y));

    let dx = (x2 - x).abs();
    let dy = -(y2 - y).abs();
    let sx = if x < x2 { 1 } else { -1 };
    let sy = if y < y2 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(image, x, y, rgb);

        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draws a horizontal run of `length` pixels starting at `p`.
pub fn horizontal_line(image: &mut Image, p: ImagePoint, length: i16, rgb: impl Into<u32>) {
    let rgb = rgb.into();
    for i in 0..i32::from(length) {
        plot(image, i32::from(p.x) + i, i32::from(p.y), rgb);
    }
}

/// Draws a vertical run of `length` pixels starting at `p`.
pub fn vertical_line(image: &mut Image, p: ImagePoint, length: i16, rgb: impl Into<u32>) {
    let rgb = rgb.into();
    for i in 0..i32::from(length) {
        plot(image, i32::from(p.x), i32::from(p.y) + i, rgb);
    }
}

/// Draws a rectangle outline with `p` as top-left corner.
pub fn rect(image: &mut Image, p: ImagePoint, width: i16, height: i16, rgb: impl Into<u32>) {
    let rgb = rgb.into();
    if width <= 0 || height <= 0 {
        return;
    }

    horizontal_line(image, p, width, rgb);
    horizontal_line(image, ImagePoint::new(p.x, p.y + height - 1), width, rgb);
    vertical_line(image, p, height, rgb);
    vertical_line(image, ImagePoint::new(p.x + width - 1, p.y), height, rgb);
}

/// Draws a filled rectangle with `p` as top-left corner.
pub fn filled_rect(image: &mut Image, p: ImagePoint, width: i16, height: i16, rgb: impl Into<u32>) {
    let rgb = rgb.into();
    for dy in 0..i32::from(height) {
        for dx in 0..i32::from(width) {
            plot(image, i32::from(p.x) + dx, i32::from(p.y) + dy, rgb);
        }
    }
}

/// Draws a circle outline using the midpoint algorithm.
pub fn circle(image: &mut Image, center: ImagePoint, radius: i16, rgb: impl Into<u32>) {
    let rgb = rgb.into();
    let (cx, cy) = (i32::from(center.x), i32::from(center.y));
    let (mut x, mut y) = (i32::from(radius), 0i32);
    let mut p = 1 - i32::from(radius);

    while x >= y {
        for (px, py) in [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ] {
            plot(image, px, py, rgb);
        }

        y += 1;
        if p <= 0 {
            p += 2 * y + 1;
        } else {
            x -= 1;
            p += 2 * (y - x) + 1;
        }
    }
}

/// Draws a filled circle.
pub fn filled_circle(image: &mut Image, center: ImagePoint, radius: i16, rgb: impl Into<u32>) {
    let rgb = rgb.into();
    let (cx, cy) = (i32::from(center.x), i32::from(center.y));
    let r = i32::from(radius);
    let r_sq = r * r;

    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r_sq {
                plot(image, cx + dx, cy + dy, rgb);
            }
        }
    }
}

fn plot(image: &mut Image, x: i32, y: i32, rgb: u32) {
    if let (Ok(x), Ok(y)) = (i16::try_from(x), i16::try_from(y)) {
        image.set_pixel(ImagePoint::new(x, y), rgb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Image {
        Image::new(50, 50, 1).unwrap()
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut image = image();
        line(&mut image, ImagePoint::new(10, 10), ImagePoint::new(20, 20), 0x808080u32);

        assert_eq!(image.get_pixel(ImagePoint::new(10, 10)), Some(0x808080));
        assert_eq!(image.get_pixel(ImagePoint::new(20, 20)), Some(0x808080));
    }

    #[test]
    fn rect_outline_leaves_interior() {
        let mut image = image();
        rect(&mut image, ImagePoint::new(5, 5), 10, 8, 0xFF0000u32);

        assert_eq!(image.get_pixel(ImagePoint::new(5, 5)), Some(0xFF0000));
        assert_eq!(image.get_pixel(ImagePoint::new(14, 12)), Some(0xFF0000));
        assert_eq!(image.get_pixel(ImagePoint::new(7, 7)), Some(0));
    }

    #[test]
    fn circle_plots_cardinal_points() {
        let mut image = image();
        circle(&mut image, ImagePoint::new(25, 25), 10, 0xFFFFFFu32);

        assert_eq!(image.get_pixel(ImagePoint::new(25, 15)), Some(0xFFFFFF));
        assert_eq!(image.get_pixel(ImagePoint::new(25, 35)), Some(0xFFFFFF));
        assert_eq!(image.get_pixel(ImagePoint::new(15, 25)), Some(0xFFFFFF));
        assert_eq!(image.get_pixel(ImagePoint::new(35, 25)), Some(0xFFFFFF));
    }

    #[test]
    fn shapes_clip_silently_off_the_buffer() {
        let mut image = image();
        line(&mut image, ImagePoint::new(-20, -20), ImagePoint::new(70, 70), 0x00FF00u32);
        filled_circle(&mut image, ImagePoint::new(0, 0), 8, 0x0000FFu32);

        assert_eq!(image.get_pixel(ImagePoint::new(30, 30)), Some(0x00FF00));
    }
}
