use std::{
    thread,
    time::{Duration, Instant},
};

use log::{debug, info};

use crate::{Pos, SimError, World};

/// receives each generation before it is replaced.
pub trait FrameSink {
    fn draw(&mut self, world: &World, generation: u64) -> Result<(), SimError>;
}

/// waits between generations.
pub trait Pacer {
    fn tick(&mut self) -> Result<(), SimError>;
}

/// output that is written once, after the last generation.
pub trait Finalize {
    fn finish(self) -> Result<(), SimError>;
}

impl<A, B> FrameSink for (A, B)
where
    A: FrameSink,
    B: FrameSink,
{
    fn draw(&mut self, world: &World, generation: u64) -> Result<(), SimError> {
        self.0.draw(world, generation)?;
        self.1.draw(world, generation)
    }
}

impl<S> FrameSink for Option<S>
where
    S: FrameSink,
{
    fn draw(&mut self, world: &World, generation: u64) -> Result<(), SimError> {
        match self {
            Some(sink) => sink.draw(world, generation),
            None => Ok(()),
        }
    }
}

impl<S> FrameSink for &mut S
where
    S: FrameSink + ?Sized,
{
    fn draw(&mut self, world: &World, generation: u64) -> Result<(), SimError> {
        (**self).draw(world, generation)
    }
}

/// caps the loop at a frame rate, sleeping for whatever is left of the frame.
/// the first frame is measured from the creation of the clock.
#[derive(Debug)]
pub struct Clock {
    frame: Option<Duration>,
    last_tick: Instant,
}

impl Clock {
    /// `fps == 0` never waits.
    pub fn new(fps: u32) -> Self {
        let frame = (fps > 0).then(|| Duration::from_secs(1) / fps);
        Self {
            frame,
            last_tick: Instant::now(),
        }
    }
}

impl Pacer for Clock {
    fn tick(&mut self) -> Result<(), SimError> {
        if let Some(frame) = self.frame {
            let elapsed = self.last_tick.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
        self.last_tick = Instant::now();
        Ok(())
    }
}

/// owns the current generation and replaces it with its successor.
#[derive(Debug, Default)]
pub struct Sim {
    world: World,
    generation: u64,
}

impl Sim {
    pub fn new(world: World) -> Self {
        Self {
            world,
            generation: 0,
        }
    }

    pub fn from_actives(actives: impl IntoIterator<Item = Pos>) -> Self {
        Self::new(actives.into_iter().collect())
    }

    pub fn current(&self) -> &World {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn advance(&mut self) -> Result<(), SimError> {
        self.world = self.world.step()?;
        self.generation += 1;
        Ok(())
    }

    /// shows, advances and paces `generations` times, stopping at the first error.
    ///
    /// the loop does not look for fixed points or cycles; a pattern that
    /// settles keeps being shown until the count runs out.
    pub fn run(
        &mut self,
        generations: u64,
        mut sink: impl FrameSink,
        mut pacer: impl Pacer,
    ) -> Result<(), SimError> {
        info!(
            "running {generations} generations from a population of {}",
            self.world.len()
        );
        for _ in 0..generations {
            debug!("generation {}: {} alive", self.generation, self.world.len());
            sink.draw(&self.world, self.generation)?;
            self.advance()?;
            pacer.tick()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    #[derive(Debug, Default)]
    struct Recording {
        frames: Vec<World>,
    }

    impl FrameSink for Recording {
        fn draw(&mut self, world: &World, _generation: u64) -> Result<(), SimError> {
            self.frames.push(world.clone());
            Ok(())
        }
    }

    struct NoPacing;

    impl Pacer for NoPacing {
        fn tick(&mut self) -> Result<(), SimError> {
            Ok(())
        }
    }

    /// time of every draw.
    #[derive(Default)]
    struct Stamps(Vec<Instant>);

    impl FrameSink for Stamps {
        fn draw(&mut self, _world: &World, _generation: u64) -> Result<(), SimError> {
            self.0.push(Instant::now());
            Ok(())
        }
    }

    fn blinker() -> Sim {
        Sim::from_actives([pos!(0, -1), pos!(0, 0), pos!(0, 1)])
    }

    #[test]
    fn advance_replaces_generation() {
        let mut sim = blinker();
        let start = sim.current().clone();
        sim.advance().unwrap();
        assert_eq!(sim.generation(), 1);
        assert_ne!(sim.current(), &start);
        sim.advance().unwrap();
        assert_eq!(sim.current(), &start);
    }

    #[test]
    fn run_shows_each_generation_before_advancing() {
        let mut sim = blinker();
        let mut recording = Recording::default();
        sim.run(5, &mut recording, NoPacing).unwrap();

        assert_eq!(sim.generation(), 5);
        assert_eq!(recording.frames.len(), 5);
        assert_eq!(recording.frames[0], blinker().current().clone());
        assert_eq!(recording.frames[2], recording.frames[0]);
        assert_ne!(recording.frames[1], recording.frames[0]);
    }

    #[test]
    fn run_keeps_going_on_empty_world() {
        let mut sim = Sim::from_actives([pos!(5, 5)]);
        let mut recording = Recording::default();
        sim.run(4, &mut recording, NoPacing).unwrap();
        assert_eq!(recording.frames.len(), 4);
        assert!(recording.frames[1..].iter().all(World::is_empty));
    }

    struct FailAt(u64);

    impl FrameSink for FailAt {
        fn draw(&mut self, _world: &World, generation: u64) -> Result<(), SimError> {
            if generation == self.0 {
                return Err(SimError::Config("sink gave up".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn sink_failure_stops_run() {
        let mut sim = blinker();
        let result = sim.run(10, FailAt(3), NoPacing);
        assert!(matches!(result, Err(SimError::Config(_))));
        assert_eq!(sim.generation(), 3);
    }

    #[test]
    fn overflow_stops_run() {
        let mut sim = Sim::from_actives([pos!(i32::MIN, 0)]);
        let mut recording = Recording::default();
        let result = sim.run(3, &mut recording, NoPacing);
        assert!(matches!(result, Err(SimError::CoordinateOutOfRange(_))));
        assert_eq!(recording.frames.len(), 1);
    }

    #[test]
    fn pair_sink_draws_into_both() {
        let mut sim = blinker();
        let mut left = Recording::default();
        let mut right = Recording::default();
        sim.run(2, (&mut left, Some(&mut right)), NoPacing).unwrap();
        assert_eq!(left.frames, right.frames);
        assert_eq!(left.frames.len(), 2);
    }

    #[test]
    fn clock_waits_for_the_frame() {
        let start = Instant::now();
        let mut clock = Clock::new(50);
        for _ in 0..3 {
            clock.tick().unwrap();
        }
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn first_generation_is_paced() {
        let mut sim = blinker();
        let mut stamps = Stamps::default();
        sim.run(3, &mut stamps, Clock::new(20)).unwrap();

        let gaps: Vec<_> = stamps.0.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(gaps.len(), 2);
        assert!(gaps.iter().all(|gap| *gap >= Duration::from_millis(45)), "{gaps:?}");
    }

    #[test]
    fn zero_fps_never_waits() {
        let mut clock = Clock::new(0);
        let start = Instant::now();
        for _ in 0..100 {
            clock.tick().unwrap();
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
