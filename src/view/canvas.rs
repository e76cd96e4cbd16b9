use std::io::Write;

use termion::color;

use super::Palette;

/// a grid of characters drawn in one go.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// canvas covering the terminal, minus the status line.
    pub fn from_screen() -> std::io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = vec![vec![' '; width]; height];
        Self {
            height,
            lines,
            width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// fills a `size` x `size` square, clipped to the canvas.
    pub fn fill(&mut self, (x, y): (i64, i64), size: u32, char: char) {
        let clip = |start: i64, len: usize| {
            let end = (start + size as i64).clamp(0, len as i64) as usize;
            start.clamp(0, len as i64) as usize..end
        };
        let columns = clip(x, self.width);
        for line in &mut self.lines[clip(y, self.height)] {
            line[columns.clone()].fill(char);
        }
    }

    pub fn line(&self, index: usize) -> String {
        self.lines[index].iter().collect()
    }

    pub fn display(
        &self,
        out: &mut impl Write,
        status: &str,
        palette: Palette,
    ) -> std::io::Result<()> {
        let [r, g, b] = palette.background;
        let background = color::Bg(color::Rgb(r, g, b));
        let [r, g, b] = palette.alive;
        let foreground = color::Fg(color::Rgb(r, g, b));
        let clear = termion::clear::All;
        write!(out, "{background}{foreground}{clear}")?;
        for index in 0..self.height {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            write!(out, "{goto}{}", self.line(index))?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        let reset = format!("{}{}", color::Bg(color::Reset), color::Fg(color::Reset));
        write!(out, "{reset}{goto}{status}")?;
        out.flush()
    }
}

#[test]
fn test_fill_clips_to_canvas() {
    let mut canvas = Canvas::new(4, 3);
    canvas.fill((2, 1), 5, '#');
    canvas.fill((-3, -3), 4, '*');
    assert_eq!(canvas.line(0), "*   ");
    assert_eq!(canvas.line(1), "  ##");
    assert_eq!(canvas.line(2), "  ##");
}

#[test]
fn test_display_uses_palette() {
    let mut canvas = Canvas::new(2, 1);
    canvas.fill((0, 0), 1, '#');
    let palette = Palette {
        background: [1, 2, 3],
        alive: [250, 0, 9],
    };
    let mut out = Vec::new();
    canvas.display(&mut out, "gen 0", palette).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("\x1b[48;2;1;2;3m"));
    assert!(out.contains("\x1b[38;2;250;0;9m"));
    assert!(out.contains("# "));
    assert!(out.ends_with("gen 0"));
}
