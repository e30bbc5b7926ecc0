//! Countdown timer background task
//!
//! [`CountdownTimer`] is a cheap, cloneable handle. The countdown itself lives
//! in a single driver task that owns the [`TimerState`], the tick schedule and
//! both observers. Control operations travel to the driver as commands and
//! are acknowledged once applied, so the caller observes them in order with
//! the ticks.

use std::ops::ControlFlow;

use serde::Serialize;
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    error::TimerError,
    state::{Phase, Progress, TickOutcome, TimerConfig, TimerState, Transition},
};

/// Progress observer, called once per tick while running
pub type ProgressObserver = Box<dyn FnMut(Progress) + Send + 'static>;

/// Completion observer, called once when a run reaches its duration
pub type CompletionObserver = Box<dyn FnMut() + Send + 'static>;

/// Latest published view of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub progress: Progress,
    /// Runs that reached their duration since the timer was spawned
    pub completed_runs: u64,
}

enum Command {
    Start {
        config: TimerConfig,
        /// Run at the driver's current tick interval instead of `config`'s
        keep_interval: bool,
        ack: oneshot::Sender<Progress>,
    },
    SetRunning {
        running: bool,
        ack: oneshot::Sender<TimerSnapshot>,
    },
    Stop {
        ack: oneshot::Sender<TimerSnapshot>,
    },
    OnTick(ProgressObserver),
    OnComplete(CompletionObserver),
    Shutdown {
        ack: oneshot::Sender<()>,
    },
}

/// Handle to a countdown driven by its own task
#[derive(Clone)]
pub struct CountdownTimer {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<TimerSnapshot>,
}

impl CountdownTimer {
    /// Spawn an idle timer on the current tokio runtime.
    ///
    /// `config` provides the initial tick interval and the duration used when
    /// the timer is resumed from idle without an explicit `start`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(config: TimerConfig) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let state = TimerState::new(&config);
        let (snapshots_tx, snapshots_rx) = watch::channel(TimerSnapshot {
            phase: state.phase(),
            progress: state.progress(),
            completed_runs: 0,
        });

        let driver = Driver {
            state,
            config,
            ticker: None,
            on_tick: None,
            on_complete: None,
            completed_runs: 0,
            commands: commands_rx,
            snapshots: snapshots_tx,
        };
        tokio::spawn(driver.run());

        Self {
            commands: commands_tx,
            snapshots: snapshots_rx,
        }
    }

    /// Begin a new run of `duration_seconds` at elapsed zero.
    ///
    /// The run keeps the tick interval of the previous run (or of the spawn
    /// config). A zero duration is rejected before anything is scheduled.
    pub async fn start(&self, duration_seconds: u64) -> Result<Progress, TimerError> {
        let config = TimerConfig::new(duration_seconds)?;
        self.request(|ack| Command::Start { config, keep_interval: true, ack })
            .await
    }

    /// Begin a new run with a fully specified configuration. Its tick
    /// interval applies to later runs as well.
    pub async fn start_with(&self, config: TimerConfig) -> Result<Progress, TimerError> {
        self.request(|ack| Command::Start { config, keep_interval: false, ack })
            .await
    }

    /// Pause (`false`) or resume (`true`) the current run.
    ///
    /// Resuming keeps the elapsed position. With no run in progress,
    /// `set_running(true)` starts a new run with the last configured duration.
    pub async fn set_running(&self, running: bool) -> Result<TimerSnapshot, TimerError> {
        self.request(|ack| Command::SetRunning { running, ack }).await
    }

    /// Abandon the current run. No observer fires after this returns.
    pub async fn stop(&self) -> Result<TimerSnapshot, TimerError> {
        self.request(|ack| Command::Stop { ack }).await
    }

    /// Register the progress observer, replacing any previous one
    pub fn on_tick<F>(&self, observer: F) -> Result<(), TimerError>
    where
        F: FnMut(Progress) + Send + 'static,
    {
        self.commands
            .send(Command::OnTick(Box::new(observer)))
            .map_err(|_| TimerError::Closed)
    }

    /// Register the completion observer, replacing any previous one
    pub fn on_complete<F>(&self, observer: F) -> Result<(), TimerError>
    where
        F: FnMut() + Send + 'static,
    {
        self.commands
            .send(Command::OnComplete(Box::new(observer)))
            .map_err(|_| TimerError::Closed)
    }

    /// Most recently published snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        *self.snapshots.borrow()
    }

    /// Watch snapshots as the driver publishes them
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the driver task. Every handle returns `Closed` afterwards.
    pub async fn shutdown(&self) -> Result<(), TimerError> {
        self.request(|ack| Command::Shutdown { ack }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, TimerError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.commands
            .send(command(ack_tx))
            .map_err(|_| TimerError::Closed)?;
        ack_rx.await.map_err(|_| TimerError::Closed)
    }
}

enum Event {
    Command(Option<Command>),
    Tick,
}

struct Driver {
    state: TimerState,
    config: TimerConfig,
    /// At most one schedule exists; replacing it cancels the old one
    ticker: Option<Interval>,
    on_tick: Option<ProgressObserver>,
    on_complete: Option<CompletionObserver>,
    completed_runs: u64,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<TimerSnapshot>,
}

impl Driver {
    async fn run(mut self) {
        debug!("Countdown driver started");

        loop {
            // Commands win over a tick that became ready at the same time
            let event = tokio::select! {
                biased;
                command = self.commands.recv() => Event::Command(command),
                _ = next_tick(&mut self.ticker) => Event::Tick,
            };

            match event {
                Event::Command(Some(command)) => {
                    if self.handle(command).is_break() {
                        break;
                    }
                }
                Event::Command(None) => {
                    debug!("All countdown handles dropped, stopping driver");
                    break;
                }
                Event::Tick => self.tick(),
            }
        }
    }

    fn handle(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Start { config, keep_interval, ack } => {
                self.config = if keep_interval {
                    config.inherit_tick_interval(&self.config)
                } else {
                    config
                };
                let transition = self.state.start(&self.config);
                self.apply(transition);
                if ack.send(self.state.progress()).is_err() {
                    warn!("Start requester went away before acknowledgement");
                }
            }
            Command::SetRunning { running, ack } => {
                let transition = self.state.set_running(running);
                self.apply(transition);
                if ack.send(self.snapshot()).is_err() {
                    warn!("Pause/resume requester went away before acknowledgement");
                }
            }
            Command::Stop { ack } => {
                let transition = self.state.stop();
                self.apply(transition);
                if ack.send(self.snapshot()).is_err() {
                    warn!("Stop requester went away before acknowledgement");
                }
            }
            Command::OnTick(observer) => {
                debug!("Progress observer registered");
                self.on_tick = Some(observer);
            }
            Command::OnComplete(observer) => {
                debug!("Completion observer registered");
                self.on_complete = Some(observer);
            }
            Command::Shutdown { ack } => {
                info!("Countdown timer shutting down");
                self.ticker = None;
                if ack.send(()).is_err() {
                    warn!("Shutdown requester went away before acknowledgement");
                }
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Started => {
                info!(
                    "Countdown started for {}s (tick every {:?})",
                    self.state.duration_seconds(),
                    self.config.tick_interval()
                );
            }
            Transition::Resumed => {
                info!(
                    "Countdown resumed at {}s of {}s",
                    self.state.elapsed_seconds(),
                    self.state.duration_seconds()
                );
            }
            Transition::Paused => {
                info!(
                    "Countdown paused at {}s of {}s",
                    self.state.elapsed_seconds(),
                    self.state.duration_seconds()
                );
                self.ticker = None;
            }
            Transition::Stopped => {
                info!("Countdown stopped");
                self.ticker = None;
            }
            Transition::Unchanged => {
                debug!("Countdown already {:?}, nothing to do", self.state.phase());
            }
        }

        if transition.needs_schedule() {
            self.schedule();
        }
        self.publish();
    }

    /// Replace the tick schedule; the first tick is one full period away
    fn schedule(&mut self) {
        let period = self.config.tick_interval();
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(interval);
    }

    fn tick(&mut self) {
        let Some(outcome) = self.state.advance() else {
            // Not running; a leftover schedule must not keep firing
            self.ticker = None;
            return;
        };

        match outcome {
            TickOutcome::Progress(progress) => {
                debug!(
                    "Countdown tick: {}s elapsed, {}s remaining ({}%)",
                    progress.elapsed_seconds, progress.remaining_seconds, progress.percent_complete
                );
                self.notify_progress(progress);
            }
            TickOutcome::Completed(progress) => {
                self.ticker = None;
                self.completed_runs += 1;
                self.notify_progress(progress);
                info!("Countdown complete after {}s", progress.duration_seconds);
                if let Some(observer) = self.on_complete.as_mut() {
                    observer();
                }
            }
        }
        self.publish();
    }

    fn notify_progress(&mut self, progress: Progress) {
        if let Some(observer) = self.on_tick.as_mut() {
            observer(progress);
        }
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.state.phase(),
            progress: self.state.progress(),
            completed_runs: self.completed_runs,
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
