use std::path::PathBuf;

use log::LevelFilter;

use crate::{view::Palette, SimError};

pub const USAGE: &str = "usage: sparse-life <PATH> [OPTIONS]

options:
    --generations=N      number of generations to run (default 69)
    --fps=N              frame rate cap, 0 for none (default 10)
    --gif=PATH           also record the run as an animated gif
    --width=N            gif width in pixels (default 800)
    --height=N           gif height in pixels (default 450)
    --margin=N           viewport slack in cells (default 10)
    --background=R,G,B   color of dead cells (default 200,200,200)
    --alive=R,G,B        color of alive cells (default 0,0,0)
    --save=PATH          write the last generation as a pattern file
    --headless           do not draw to the terminal
    --log-level=LEVEL    off/error/warn/info/debug/trace
    --help, -h           show this message";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub pattern: PathBuf,
    pub generations: u64,
    pub fps: u32,
    pub gif: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub margin: i32,
    pub palette: Palette,
    pub save: Option<PathBuf>,
    pub headless: bool,
    /// `None` picks a level that keeps the terminal view readable.
    pub log_level: Option<LevelFilter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: PathBuf::new(),
            generations: 69,
            fps: 10,
            gif: None,
            width: 800,
            height: 450,
            margin: 10,
            palette: Palette::default(),
            save: None,
            headless: false,
            log_level: None,
        }
    }
}

pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// parses the arguments following the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Command, SimError> {
        let mut config = Config::default();
        let mut pattern = None;

        for arg in args {
            let (key, value) = match arg.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (arg.as_str(), None),
            };
            match (key, value) {
                ("--help" | "-h", None) => return Ok(Command::Help),
                ("--headless", None) => config.headless = true,
                ("--generations", Some(value)) => config.generations = number(key, value)?,
                ("--fps", Some(value)) => config.fps = number(key, value)?,
                ("--width", Some(value)) => config.width = number(key, value)?,
                ("--height", Some(value)) => config.height = number(key, value)?,
                ("--margin", Some(value)) => config.margin = number(key, value)?,
                ("--gif", Some(value)) => config.gif = Some(PathBuf::from(value)),
                ("--save", Some(value)) => config.save = Some(PathBuf::from(value)),
                ("--background", Some(value)) => config.palette.background = rgb(key, value)?,
                ("--alive", Some(value)) => config.palette.alive = rgb(key, value)?,
                ("--log-level", Some(value)) => config.log_level = Some(level(value)?),
                _ if arg.starts_with('-') => {
                    return Err(SimError::Config(format!("unknown option {arg:?}")))
                }
                _ if pattern.is_none() => pattern = Some(PathBuf::from(&arg)),
                _ => return Err(SimError::Config(format!("unexpected argument {arg:?}"))),
            }
        }

        config.pattern =
            pattern.ok_or_else(|| SimError::Config("must provide a path argument".into()))?;
        if config.gif.is_some() && (config.width == 0 || config.height == 0) {
            return Err(SimError::Config("gif size must not be zero".into()));
        }
        if config.margin < 0 {
            return Err(SimError::Config("margin must not be negative".into()));
        }
        Ok(Command::Run(config))
    }

    pub fn effective_log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(if self.headless {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
    }
}

fn number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SimError> {
    value
        .parse()
        .map_err(|_| SimError::Config(format!("{key} expects a number, got {value:?}")))
}

fn rgb(key: &str, value: &str) -> Result<[u8; 3], SimError> {
    let bad = || SimError::Config(format!("{key} expects R,G,B, got {value:?}"));
    let mut channels = value.split(',').map(|c| c.trim().parse::<u8>());
    let mut next = || channels.next().and_then(Result::ok).ok_or_else(bad);
    let color = [next()?, next()?, next()?];
    match channels.next() {
        None => Ok(color),
        Some(_) => Err(bad()),
    }
}

fn level(value: &str) -> Result<LevelFilter, SimError> {
    value
        .parse()
        .map_err(|_| SimError::Config(format!("unknown log level {value:?}")))
}
