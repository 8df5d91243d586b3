// life - Conway's Life rendered through the compositing engine.
//
// Each cell byte packs its live-neighbour count in the low bits and an
// alive flag above them, so a generation only touches cells whose state
// changes and their eight neighbours.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use rand::Rng;

use rotofb::{FrameBuffer, Image, ImagePoint, Rgb888, SurfacePoint};

const WIDTH: usize = 480;
const HEIGHT: usize = 480;

const ALIVE_MASK: u8 = 0x10;
const ALIVE_SHIFT: u8 = 4;

const CELL_COLOURS: [u32; 2] = [0x0000_0000, 0x00FF_FFFF];

// Neighbour-count heat ramp, blue through red.
const POPULATION_COLOURS: [u32; 9] = [
    0x0000_00FF,
    0x0000_80FF,
    0x0000_FFFF,
    0x0000_FF80,
    0x0000_FF00,
    0x0080_FF00,
    0x00FF_FF00,
    0x00FF_8000,
    0x00FF_0000,
];

const GOSPER_ORIGIN: (usize, usize) = (222, 236);
const GOSPER_GUN: &[(usize, usize)] = &[
    (24, 0),
    (22, 1),
    (24, 1),
    (12, 2),
    (13, 2),
    (20, 2),
    (21, 2),
    (34, 2),
    (35, 2),
    (11, 3),
    (15, 3),
    (20, 3),
    (21, 3),
    (34, 3),
    (35, 3),
    (0, 4),
    (1, 4),
    (10, 4),
    (16, 4),
    (20, 4),
    (21, 4),
    (0, 5),
    (1, 5),
    (10, 5),
    (14, 5),
    (16, 5),
    (17, 5),
    (22, 5),
    (24, 5),
    (10, 6),
    (16, 6),
    (24, 6),
    (11, 7),
    (15, 7),
    (12, 8),
    (13, 8),
];

const SIMKIN_ORIGIN: (usize, usize) = (225, 230);
const SIMKIN_GUN: &[(usize, usize)] = &[
    (0, 0),
    (1, 0),
    (7, 0),
    (8, 0),
    (0, 1),
    (1, 1),
    (7, 1),
    (8, 1),
    (4, 3),
    (5, 3),
    (4, 4),
    (5, 4),
    (22, 9),
    (23, 9),
    (25, 9),
    (26, 9),
    (21, 10),
    (27, 10),
    (21, 11),
    (28, 11),
    (31, 11),
    (32, 11),
    (21, 12),
    (22, 12),
    (23, 12),
    (27, 12),
    (31, 12),
    (32, 12),
    (26, 13),
    (20, 17),
    (21, 17),
    (20, 18),
    (21, 19),
    (22, 19),
    (23, 19),
    (23, 20),
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pattern {
    Random,
    Gosper,
    Simkin,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Display {
    /// White live cells on black
    Cells,
    /// Neighbour-count heat map
    Population,
}

#[derive(Parser, Debug)]
#[command(name = "life")]
#[command(about = "Conway's Life on the framebuffer", long_about = None)]
struct Cli {
    /// Framebuffer device to draw on
    #[arg(long, default_value = "/dev/fb0")]
    device: String,

    /// Starting pattern
    #[arg(long, value_enum, default_value = "random")]
    pattern: Pattern,

    /// What to display per cell
    #[arg(long, value_enum, default_value = "cells")]
    display: Display,

    /// Generations to run, 0 for unlimited
    #[arg(long, default_value_t = 0)]
    generations: u64,

    /// Delay between generations in milliseconds
    #[arg(long, default_value_t = 50)]
    delay_ms: u64,
}

struct Life {
    cells: Vec<u8>,
    cells_next: Vec<u8>,
    image: Image,
}

impl Life {
    fn new() -> Result<Self> {
        Ok(Self {
            cells: vec![0; WIDTH * HEIGHT],
            cells_next: vec![0; WIDTH * HEIGHT],
            image: Image::new(WIDTH as i16, HEIGHT as i16, 1)?,
        })
    }

    /// Adjusts the neighbour counts of the eight cells around (col, row).
    /// The grid wraps toroidally at every edge.
    fn update_neighbours(&mut self, col: usize, row: usize, value: i8) {
        let left = if col == 0 { WIDTH - 1 } else { col - 1 };
        let right = if col == WIDTH - 1 { 0 } else { col + 1 };
        let above = if row == 0 { HEIGHT - 1 } else { row - 1 };
        let below = if row == HEIGHT - 1 { 0 } else { row + 1 };

        for (c, r) in [
            (left, above),
            (col, above),
            (right, above),
            (left, row),
            (right, row),
            (left, below),
            (col, below),
            (right, below),
        ] {
            let cell = &mut self.cells_next[c + r * WIDTH];
            *cell = cell.wrapping_add_signed(value);
        }
    }

    fn set_cell(&mut self, col: usize, row: usize) {
        self.update_neighbours(col, row, 1);
        self.cells_next[col + row * WIDTH] |= ALIVE_MASK;
    }

    fn clear_cell(&mut self, col: usize, row: usize) {
        self.update_neighbours(col, row, -1);
        self.cells_next[col + row * WIDTH] &= !ALIVE_MASK;
    }

    fn iterate(&mut self) {
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let cell = self.cells[col + row * WIDTH];
                let neighbours = cell & !ALIVE_MASK;
                let alive = cell & ALIVE_MASK != 0;

                if alive {
                    if neighbours != 2 && neighbours != 3 {
                        self.clear_cell(col, row);
                    }
                } else if neighbours == 3 {
                    self.set_cell(col, row);
                }
            }
        }

        self.cells.copy_from_slice(&self.cells_next);
    }

    fn seed_random(&mut self) {
        self.reset();
        let mut rng = rand::rng();
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                if rng.random_bool(0.5) {
                    self.set_cell(col, row);
                }
            }
        }
        self.cells.copy_from_slice(&self.cells_next);
    }

    fn seed_pattern(&mut self, origin: (usize, usize), points: &[(usize, usize)]) {
        self.reset();
        for &(dx, dy) in points {
            self.set_cell(origin.0 + dx, origin.1 + dy);
        }
        self.cells.copy_from_slice(&self.cells_next);
    }

    fn reset(&mut self) {
        self.cells.fill(0);
        self.cells_next.fill(0);
    }

    fn draw(&mut self, fb: &mut FrameBuffer, display: Display) {
        for i in 0..WIDTH * HEIGHT {
            let cell = self.cells[i];
            let neighbours = (cell & !ALIVE_MASK) as usize;
            let state = ((cell & ALIVE_MASK) >> ALIVE_SHIFT) as usize;

            let p = ImagePoint::new((i % WIDTH) as i16, (i / WIDTH) as i16);
            let colour = match display {
                Display::Cells => CELL_COLOURS[state],
                Display::Population => POPULATION_COLOURS[neighbours],
            };
            self.image.set_pixel(p, colour);
        }

        let location = SurfacePoint::new(
            (fb.width() - i32::from(self.image.width())) / 2,
            (fb.height() - i32::from(self.image.height())) / 2,
        );
        fb.put_image(location, &self.image);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut fb = FrameBuffer::open(&cli.device)?;
    fb.cursor(false);
    fb.clear(Rgb888::BLACK);

    let mut life = Life::new()?;
    match cli.pattern {
        Pattern::Random => life.seed_random(),
        Pattern::Gosper => life.seed_pattern(GOSPER_ORIGIN, GOSPER_GUN),
        Pattern::Simkin => life.seed_pattern(SIMKIN_ORIGIN, SIMKIN_GUN),
    }

    info!(
        "{:?} pattern on {}, {} generations",
        cli.pattern, cli.device, cli.generations
    );

    let mut generation: u64 = 0;
    loop {
        life.draw(&mut fb, cli.display);
        life.iterate();
        generation += 1;

        if cli.generations != 0 && generation >= cli.generations {
            break;
        }
        thread::sleep(Duration::from_millis(cli.delay_ms));
    }

    fb.clear(Rgb888::BLACK);
    fb.cursor(true);

    Ok(())
}
