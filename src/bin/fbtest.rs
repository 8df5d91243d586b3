// fbtest - on-device smoke test for the compositing engine.
//
// Draws a test card through the full pipeline (image, blit, readback) and
// verifies what landed on the surface. Needs a real framebuffer device.

use std::thread;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use log::info;

use rotofb::draw;
use rotofb::{FrameBuffer, Image, ImagePoint, Rgb888, SurfacePoint};

#[derive(Parser, Debug)]
#[command(name = "fbtest")]
#[command(about = "Framebuffer compositing smoke test", long_about = None)]
struct Cli {
    /// Framebuffer device to draw on
    #[arg(long, default_value = "/dev/fb0")]
    device: String,

    /// Seconds to hold the test card on screen
    #[arg(long, default_value_t = 10)]
    hold: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut fb = FrameBuffer::open(&cli.device)?;
    info!(
        "{}: logical {}x{}",
        cli.device,
        fb.width(),
        fb.height()
    );
    fb.clear(Rgb888::BLACK);

    let red = Rgb888::new(255, 0, 0);
    let green = Rgb888::new(0, 255, 0);
    info!("  red: {:#010x}", red.packed());
    info!("green: {:#010x}", green.packed());

    let mut card = Image::new(48, 48, 1)?;
    card.clear(red);

    ensure!(
        card.get_pixel_rgb(ImagePoint::new(0, 0)) == Some(red),
        "image clear readback"
    );

    draw::line(&mut card, ImagePoint::new(0, 0), ImagePoint::new(47, 47), green);

    let location = SurfacePoint::new(
        (fb.width() - i32::from(card.width())) / 2,
        (fb.height() - i32::from(card.height())) / 2,
    );

    ensure!(fb.put_image(location, &card), "centered blit rejected");

    // The placed footprint is mirrored along the logical width axis, so
    // the card's (0,0) corner reads back at the far x edge of the
    // footprint, and its (47,0) corner at the near one.
    let near = fb.get_pixel_rgb(location);
    let far = fb.get_pixel_rgb(SurfacePoint::new(location.x + 47, location.y));
    ensure!(near == Some(red), "near corner readback: {near:?}");
    ensure!(far == Some(green), "far corner readback: {far:?}");

    let dark_blue = Rgb888::new(0, 0, 63);
    let mut banner = Image::new(168, 16, 1)?;
    banner.clear(dark_blue);
    draw::rect(&mut banner, ImagePoint::new(0, 0), 168, 16, Rgb888::WHITE);

    let banner_location = SurfacePoint::new(
        (fb.width() - i32::from(banner.width())) / 2,
        (fb.height() - i32::from(banner.height())) / 3,
    );
    ensure!(fb.put_image(banner_location, &banner), "banner blit rejected");

    info!("test card up, holding {}s", cli.hold);
    thread::sleep(Duration::from_secs(cli.hold));

    fb.clear(Rgb888::BLACK);
    info!("all checks passed");

    Ok(())
}
