use std::io::{stdout, Stdout};

use termion::cursor::HideCursor;

use crate::{FrameSink, SimError, World};

pub use canvas::Canvas;
mod canvas;

pub use frame::{MarginFrame, Projection};
pub mod frame;

const ALIVE: char = '#';

/// colors of dead and alive cells, shared by the terminal and the gif.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 3],
    pub alive: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [200, 200, 200],
            alive: [0, 0, 0],
        }
    }
}

/// draws every generation to the terminal, scaled to fit the screen.
pub struct TerminalView {
    out: HideCursor<Stdout>,
    frame: MarginFrame,
    palette: Palette,
}

impl TerminalView {
    pub fn new(margin: i32, palette: Palette) -> Self {
        Self {
            out: HideCursor::from(stdout()),
            frame: MarginFrame::new(margin),
            palette,
        }
    }
}

impl FrameSink for TerminalView {
    fn draw(&mut self, world: &World, generation: u64) -> Result<(), SimError> {
        let mut canvas = Canvas::from_screen()?;
        paint(&mut canvas, &mut self.frame, world);
        let status = format!("generation {generation} | {} alive", world.len());
        canvas.display(&mut self.out, &status, self.palette)?;
        Ok(())
    }
}

/// projects the live cells of `world` onto `canvas`.
pub fn paint(canvas: &mut Canvas, frame: &mut MarginFrame, world: &World) {
    let Some(bounds) = frame.fit(world) else {
        return;
    };
    let projection = Projection::new(bounds, canvas.width() as u32, canvas.height() as u32);
    let size = projection.cell_size();
    for pos in world.actives() {
        canvas.fill(projection.project(pos.x, pos.y), size, ALIVE);
    }
}
