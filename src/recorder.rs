//! records generations into an animated gif.

use std::{fs::File, io::BufWriter, path::PathBuf};

use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame, Rgb, RgbImage,
};
use log::info;

use crate::{
    view::{MarginFrame, Palette, Projection},
    Finalize, FrameSink, SimError, World,
};

pub struct GifRecorder {
    path: PathBuf,
    width: u32,
    height: u32,
    delay: Delay,
    frame: MarginFrame,
    background: Rgb<u8>,
    alive: Rgb<u8>,
    images: Vec<RgbImage>,
}

impl GifRecorder {
    /// `fps` sets the delay between frames; `0` plays them back to back.
    pub fn new(
        path: impl Into<PathBuf>,
        (width, height): (u32, u32),
        fps: u32,
        margin: i32,
        palette: Palette,
    ) -> Self {
        let delay = match fps {
            0 => Delay::from_numer_denom_ms(0, 1),
            fps => Delay::from_numer_denom_ms(1000, fps),
        };
        Self {
            path: path.into(),
            width,
            height,
            delay,
            frame: MarginFrame::new(margin),
            background: Rgb(palette.background),
            alive: Rgb(palette.alive),
            images: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.images.len()
    }

    pub fn render(&mut self, world: &World) -> RgbImage {
        let mut image = RgbImage::from_pixel(self.width, self.height, self.background);
        let Some(bounds) = self.frame.fit(world) else {
            return image;
        };
        let projection = Projection::new(bounds, self.width, self.height);
        let size = projection.cell_size() as i64;
        for pos in world.actives() {
            let (px, py) = projection.project(pos.x, pos.y);
            for y in py.max(0)..(py + size).min(self.height as i64) {
                for x in px.max(0)..(px + size).min(self.width as i64) {
                    image.put_pixel(x as u32, y as u32, self.alive);
                }
            }
        }
        image
    }
}

impl FrameSink for GifRecorder {
    fn draw(&mut self, world: &World, _generation: u64) -> Result<(), SimError> {
        let image = self.render(world);
        self.images.push(image);
        Ok(())
    }
}

impl Finalize for GifRecorder {
    fn finish(self) -> Result<(), SimError> {
        if self.images.is_empty() {
            return Err(SimError::Config("no frames were recorded".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SimError::Config("gif size must not be zero".into()));
        }

        let file = BufWriter::new(File::create(&self.path)?);
        let mut encoder = GifEncoder::new(file);
        encoder.set_repeat(Repeat::Infinite)?;
        let count = self.frame_count();
        let delay = self.delay;
        let frames = self.images.into_iter().map(|image| {
            let rgba = image::DynamicImage::ImageRgb8(image).into_rgba8();
            Frame::from_parts(rgba, 0, 0, delay)
        });
        encoder.encode_frames(frames)?;
        info!("wrote {count} frames to {}", self.path.display());
        Ok(())
    }
}
