//! scale-free framing: a viewport that follows the live cells without
//! jittering when a pattern on its edge oscillates.

use crate::World;

/// one bound of the viewport, only moved when the target leaves the slack.
#[derive(Debug, Clone)]
pub struct Margin {
    margin: i32,
    value: Option<i32>,
}

impl Margin {
    pub fn new(margin: i32) -> Self {
        Self {
            margin,
            value: None,
        }
    }

    /// lower bound: jumps down to cover `target`, creeps up one step at a
    /// time once `target` is more than `margin` above it.
    pub fn set_min(&mut self, target: i32) -> i32 {
        let value = match self.value {
            Some(value) if target >= value => {
                if target > value.saturating_add(self.margin) {
                    value + 1
                } else {
                    value
                }
            }
            _ => target,
        };
        self.value = Some(value);
        value
    }

    /// upper bound, mirror of [`Margin::set_min`].
    pub fn set_max(&mut self, target: i32) -> i32 {
        let value = match self.value {
            Some(value) if target <= value => {
                if target < value.saturating_sub(self.margin) {
                    value - 1
                } else {
                    value
                }
            }
            _ => target,
        };
        self.value = Some(value);
        value
    }
}

/// half-open rectangle of cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Bounds {
    pub fn width(&self) -> i64 {
        self.x_max as i64 - self.x_min as i64
    }

    pub fn height(&self) -> i64 {
        self.y_max as i64 - self.y_min as i64
    }
}

#[derive(Debug, Clone)]
pub struct MarginFrame {
    x_min: Margin,
    y_min: Margin,
    x_max: Margin,
    y_max: Margin,
}

impl MarginFrame {
    pub fn new(margin: i32) -> Self {
        Self {
            x_min: Margin::new(margin),
            y_min: Margin::new(margin),
            x_max: Margin::new(margin),
            y_max: Margin::new(margin),
        }
    }

    /// fits the frame around `world`, staying close to the previous frame.
    /// an empty world leaves the frame untouched and has no bounds.
    pub fn fit(&mut self, world: &World) -> Option<Bounds> {
        let (min, max) = world.bounds()?;
        Some(Bounds {
            x_min: self.x_min.set_min(min.x),
            y_min: self.y_min.set_min(min.y),
            x_max: self.x_max.set_max(max.x.saturating_add(1)),
            y_max: self.y_max.set_max(max.y.saturating_add(1)),
        })
    }
}

/// maps cell coordinates onto a `width` x `height` surface, centered and
/// scaled so the whole frame fits.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    cell_size: f64,
    x_center: f64,
    y_center: f64,
    w_center: f64,
    h_center: f64,
}

impl Projection {
    pub fn new(bounds: Bounds, width: u32, height: u32) -> Self {
        let x_cell_size = width as f64 / bounds.width() as f64;
        let y_cell_size = height as f64 / bounds.height() as f64;
        Self {
            cell_size: x_cell_size.min(y_cell_size),
            x_center: (bounds.x_min as f64 + bounds.x_max as f64) / 2.0,
            y_center: (bounds.y_min as f64 + bounds.y_max as f64) / 2.0,
            w_center: width as f64 / 2.0,
            h_center: height as f64 / 2.0,
        }
    }

    /// top-left corner of the cell on the surface.
    pub fn project(&self, x: i32, y: i32) -> (i64, i64) {
        let px = self.w_center + (x as f64 - self.x_center) * self.cell_size;
        let py = self.h_center + (y as f64 - self.y_center) * self.cell_size;
        (px as i64, py as i64)
    }

    /// side of a drawn cell, never less than one unit.
    pub fn cell_size(&self) -> u32 {
        if self.cell_size > 1.0 {
            self.cell_size as u32
        } else {
            1
        }
    }
}
