use std::time::Instant;

use log::trace;

use crate::FrameTime;

/// One stage of the per-frame pipeline, run against a shared context `C`.
pub trait System<C> {
    fn name(&self) -> &'static str;
    fn run(&mut self, ctx: &mut C, time: FrameTime);
}

/// Runs registered systems in insertion order, once per frame.
pub struct Scheduler<C> {
    systems: Vec<Box<dyn System<C>>>,
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self { systems: Vec::new() }
    }

    /// Add a system to the end of the pipeline
    pub fn add_system<S: System<C> + 'static>(&mut self, system: S) -> &mut Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Execute all systems once
    pub fn execute_once(&mut self, ctx: &mut C, time: FrameTime) {
        for system in &mut self.systems {
            let system_start = Instant::now();
            system.run(ctx, time);
            trace!("{} took {:?}", system.name(), system_start.elapsed());
        }
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Push(&'static str);

    impl System<Vec<&'static str>> for Push {
        fn name(&self) -> &'static str {
            self.0
        }

        fn run(&mut self, ctx: &mut Vec<&'static str>, _time: FrameTime) {
            ctx.push(self.0);
        }
    }

    #[test]
    fn systems_run_in_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Push("simulate")).add_system(Push("render"));

        let mut log = Vec::new();
        scheduler.execute_once(&mut log, FrameTime::new(0.0, 0));
        scheduler.execute_once(&mut log, FrameTime::new(16.0, 1));

        assert_eq!(log, vec!["simulate", "render", "simulate", "render"]);
        assert_eq!(scheduler.system_names(), vec!["simulate", "render"]);
    }
}
