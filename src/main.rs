use std::{env::args, process::exit};

use log::{error, info, LevelFilter};

pub use utils::Pos;
mod utils;

pub use error::{PatternError, SimError};
mod error;

pub use world::World;
pub mod world;

pub use sim::{Clock, Finalize, FrameSink, Pacer, Sim};
mod sim;

pub use view::TerminalView;
pub mod view;

pub use recorder::GifRecorder;
mod recorder;

pub mod pattern;

use config::{Command, Config, USAGE};
mod config;

/// sets up `env_logger` once; `RUST_LOG` refines the given level.
pub fn init_logger(level: LevelFilter) {
    use env_logger::Builder;
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_secs()
            .try_init()
            .ok();
    });
}

fn run(config: &Config) -> Result<(), SimError> {
    let actives = pattern::load(&config.pattern)?;
    let mut simulation = Sim::from_actives(actives);
    let mut recorder = config.gif.as_ref().map(|path| {
        GifRecorder::new(
            path,
            (config.width, config.height),
            config.fps,
            config.margin,
            config.palette,
        )
    });

    let view = (!config.headless).then(|| TerminalView::new(config.margin, config.palette));
    simulation.run(
        config.generations,
        (view, recorder.as_mut()),
        Clock::new(config.fps),
    )?;

    info!(
        "finished at generation {} with {} alive",
        simulation.generation(),
        simulation.current().len()
    );

    if let Some(recorder) = recorder {
        recorder.finish()?;
    }
    if let Some(path) = &config.save {
        pattern::save(path, simulation.current())?;
    }
    Ok(())
}

pub fn main() {
    let command = Config::from_args(args().skip(1)).unwrap_or_else(|error| {
        eprintln!("[error] {error}");
        eprintln!("{USAGE}");
        exit(2);
    });
    let config = match command {
        Command::Help => {
            println!("{USAGE}");
            return;
        }
        Command::Run(config) => config,
    };

    init_logger(config.effective_log_level());
    if let Err(error) = run(&config) {
        error!("{error}");
        exit(1);
    }
}
