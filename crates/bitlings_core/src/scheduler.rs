//! The tick loop.
//!
//! Each tick runs in a fixed order: drain queued commands, prune the dead,
//! step every creature, then hand a snapshot to the broadcast sink. The
//! scheduler owns the world; everything else talks to it through the command
//! queue or receives snapshots.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bitlings_data::{WorldCommand, WorldSnapshot};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Result, SimError};
use crate::metrics::{self, Metrics};
use crate::world::{TickOutcome, World};

/// Receives one finished snapshot per tick. Must not block.
pub trait BroadcastSink: Send + Sync {
    fn send(&self, snapshot: &WorldSnapshot);
}

impl<T: BroadcastSink + ?Sized> BroadcastSink for Arc<T> {
    fn send(&self, snapshot: &WorldSnapshot) {
        (**self).send(snapshot);
    }
}

/// Sink for headless runs: logs population counts and drops the snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

impl BroadcastSink for LoggingSink {
    fn send(&self, snapshot: &WorldSnapshot) {
        tracing::trace!(
            creatures = snapshot.creatures.len(),
            food = snapshot.food.len(),
            "Snapshot"
        );
    }
}

/// Producer half of the command queue. Cheap to clone; safe to use from any
/// task.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<WorldCommand>,
}

impl CommandSender {
    pub fn enqueue(&self, command: WorldCommand) -> Result<()> {
        self.tx.send(command).map_err(|_| SimError::QueueClosed)
    }
}

/// Consumer half, drained only at tick start.
#[derive(Debug)]
pub struct CommandQueue {
    rx: mpsc::UnboundedReceiver<WorldCommand>,
}

impl CommandQueue {
    /// Takes everything queued so far without waiting.
    pub fn drain(&mut self) -> Vec<WorldCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            commands.push(command);
        }
        commands
    }
}

#[must_use]
pub fn command_channel() -> (CommandSender, CommandQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSender { tx }, CommandQueue { rx })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub dt: f64,
    pub commands_applied: usize,
    pub commands_rejected: usize,
    pub outcome: TickOutcome,
}

pub struct Scheduler<S: BroadcastSink> {
    world: World,
    commands: CommandQueue,
    sink: S,
    metrics: Arc<Metrics>,
}

impl<S: BroadcastSink> Scheduler<S> {
    pub fn new(world: World, commands: CommandQueue, sink: S) -> Self {
        Self {
            world,
            commands,
            sink,
            metrics: Arc::new(Metrics::new()),
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs one tick with an explicit `dt` in seconds.
    pub fn tick(&mut self, dt: f64) -> TickReport {
        let started = std::time::Instant::now();

        let mut commands_applied = 0;
        let mut commands_rejected = 0;
        for command in self.commands.drain() {
            match self.world.apply_command(&command) {
                Ok(()) => commands_applied += 1,
                Err(e) => {
                    tracing::warn!(?command, error = %e, "Command rejected");
                    commands_rejected += 1;
                }
            }
        }

        let outcome = self.world.update(dt);
        let snapshot = self.world.snapshot();
        self.sink.send(&snapshot);

        self.metrics.add_to_counter(metrics::COMMAND_APPLIED, commands_applied as u64);
        self.metrics.add_to_counter(metrics::COMMAND_REJECTED, commands_rejected as u64);
        self.metrics.add_to_counter(metrics::CREATURE_DIED, outcome.pruned as u64);
        self.metrics.add_to_counter(metrics::FOOD_EATEN, outcome.food_eaten as u64);
        self.metrics.add_to_counter(metrics::CREATURE_FAULT, outcome.faults as u64);
        self.metrics.record_tick(
            started.elapsed(),
            self.world.creatures.len(),
            self.world.food.len(),
        );

        TickReport {
            tick: self.world.tick,
            dt,
            commands_applied,
            commands_rejected,
            outcome,
        }
    }

    /// Ticks at the configured interval until `shutdown` resolves. `dt` is the
    /// measured time since the previous tick started.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let period = self.world.config.tick_interval();
        self.run_with_period(period, shutdown).await;
    }

    pub async fn run_with_period<F>(&mut self, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(period_ms = period.as_millis() as u64, "Tick loop started");
        let mut last = Instant::now();
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(ticks = self.world.tick, "Tick loop stopped");
                    break;
                }
                _ = interval.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last).as_secs_f64();
                    last = now;
                    self.tick(dt);
                }
            }
        }
    }
}
