use rotofb::{Image, ImagePoint, Rgb888};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_image_is_black() {
    let image = Image::new(7, 5, 1).unwrap();
    assert_eq!(image.width(), 7);
    assert_eq!(image.height(), 5);
    assert_eq!(image.frame_count(), 1);

    for x in 0..7 {
        for y in 0..5 {
            assert_eq!(image.get_pixel(ImagePoint::new(x, y)), Some(0));
        }
    }
}

#[test]
fn test_construction_rejects_negative_dimensions() {
    assert!(Image::new(-1, 5, 1).is_err());
    assert!(Image::new(5, -1, 1).is_err());
    assert!(Image::new(-3, -3, 1).is_err());
}

#[test]
fn test_construction_rejects_zero_frames() {
    assert!(Image::new(5, 5, 0).is_err());
}

#[test]
fn test_from_pixels_seeds_in_storage_order() {
    // Column-major: the flat array runs down each column in turn.
    let image = Image::from_pixels(2, 3, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();

    assert_eq!(image.get_pixel(ImagePoint::new(0, 0)), Some(1));
    assert_eq!(image.get_pixel(ImagePoint::new(0, 1)), Some(2));
    assert_eq!(image.get_pixel(ImagePoint::new(0, 2)), Some(3));
    assert_eq!(image.get_pixel(ImagePoint::new(1, 0)), Some(4));
    assert_eq!(image.get_pixel(ImagePoint::new(1, 2)), Some(6));
}

#[test]
fn test_from_pixels_rejects_length_mismatch() {
    assert!(Image::from_pixels(2, 3, 1, vec![0; 5]).is_err());
    assert!(Image::from_pixels(2, 3, 1, vec![0; 7]).is_err());
    assert!(Image::from_pixels(2, 3, 2, vec![0; 6]).is_err());
}

// ============================================================================
// Pixel access
// ============================================================================

#[test]
fn test_set_then_get_round_trips_in_bounds() {
    let mut image = Image::new(5, 4, 1).unwrap();

    for x in 0..5i16 {
        for y in 0..4i16 {
            let rgb = Rgb888::new(x as u8 * 40, y as u8 * 60, 9);
            assert!(image.set_pixel(ImagePoint::new(x, y), rgb));
            assert_eq!(image.get_pixel_rgb(ImagePoint::new(x, y)), Some(rgb));
        }
    }
}

#[test]
fn test_out_of_range_access_is_rejected_and_harmless() {
    let mut image = Image::new(5, 4, 1).unwrap();

    for p in [
        ImagePoint::new(-1, 0),
        ImagePoint::new(0, -1),
        ImagePoint::new(5, 0),
        ImagePoint::new(0, 4),
        ImagePoint::new(i16::MAX, i16::MAX),
    ] {
        assert!(!image.set_pixel(p, 0xFFFFFFu32));
        assert_eq!(image.get_pixel(p), None);
    }

    // Nothing was written anywhere.
    for x in 0..5 {
        for y in 0..4 {
            assert_eq!(image.get_pixel(ImagePoint::new(x, y)), Some(0));
        }
    }
}

#[test]
fn test_clear_sets_every_pixel_of_current_frame() {
    let mut image = Image::new(6, 6, 1).unwrap();
    let teal = Rgb888::new(0, 128, 128);
    image.clear(teal);

    for x in 0..6 {
        for y in 0..6 {
            assert_eq!(image.get_pixel_rgb(ImagePoint::new(x, y)), Some(teal));
        }
    }
}

// ============================================================================
// Frames
// ============================================================================

#[test]
fn test_frames_are_addressed_independently() {
    let mut image = Image::new(3, 3, 2).unwrap();

    image.set_pixel(ImagePoint::new(1, 1), 0x111111u32);
    assert!(image.set_frame(1));
    image.set_pixel(ImagePoint::new(1, 1), 0x222222u32);

    assert_eq!(image.get_pixel(ImagePoint::new(1, 1)), Some(0x222222));
    assert!(image.set_frame(0));
    assert_eq!(image.get_pixel(ImagePoint::new(1, 1)), Some(0x111111));
}

#[test]
fn test_set_frame_rejects_out_of_range() {
    let mut image = Image::new(3, 3, 2).unwrap();
    assert!(image.set_frame(1));
    assert!(!image.set_frame(2));
    assert_eq!(image.frame(), 1);
}

// ============================================================================
// Column view
// ============================================================================

#[test]
fn test_column_matches_pixel_reads() {
    let mut image = Image::new(4, 6, 2).unwrap();
    assert!(image.set_frame(1));
    for y in 0..6i16 {
        image.set_pixel(ImagePoint::new(2, y), 0x40u32 + y as u32);
    }

    let column = image.column(2);
    assert_eq!(column.len(), 6);
    for y in 0..6 {
        assert_eq!(column[y], 0x40 + y as u32);
    }
}
