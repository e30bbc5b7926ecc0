//! Configuration and CLI argument handling

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::{
    error::TimerError,
    services::{wellbeing::Signals, Need},
    state::{FocusSettings, TimerConfig},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "newro-focus")]
#[command(about = "Wellbeing focus sessions with an assistant stub")]
#[command(version)]
pub struct Config {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do. Without one, runs a focus session with default settings.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a focus countdown in the terminal (Ctrl-C ends it early)
    Focus(FocusArgs),
    /// Send one prompt to the assistant and print the conversation
    Chat {
        /// Prompt text
        #[arg(required = true)]
        prompt: Vec<String>,
        /// Act on low-risk steps without asking first
        #[arg(long)]
        auto_act: bool,
        /// Name used in the greeting
        #[arg(long, default_value = "Ava")]
        name: String,
    },
    /// Print a balanced plan for the day
    Plan,
    /// Preview the notification digest
    Digest {
        /// Delivery time (HH:MM)
        #[arg(long, default_value = "10:30")]
        at: String,
        /// Hold urgent messages for the digest too
        #[arg(long)]
        no_urgent_lane: bool,
        /// List FYI items instead of collapsing them
        #[arg(long)]
        expand: bool,
    },
    /// Request a workplace adjustment and track approvals
    Adjust {
        /// headset, screen-filter or quiet-workspace
        #[arg(long, requires = "reason")]
        need: Option<Need>,
        /// Plain-language reason for the request
        #[arg(long)]
        reason: Option<String>,
    },
    /// Check workload signals and offer an early-warning plan
    Wellbeing(WellbeingArgs),
    /// Print the latest meeting recap
    Recap,
}

#[derive(Debug, Clone, Args)]
pub struct WellbeingArgs {
    /// Room the plan books
    #[arg(long, default_value = "Quiet Pod B")]
    pub room: String,

    #[arg(long, default_value = "7")]
    pub meeting_hours: u32,

    #[arg(long, default_value = "3")]
    pub missed_blocks: u32,

    /// Energy is holding up
    #[arg(long)]
    pub energy_steady: bool,
}

impl WellbeingArgs {
    pub fn signals(&self) -> Signals {
        Signals {
            meeting_hours: self.meeting_hours,
            missed_focus_blocks: self.missed_blocks,
            energy_down: !self.energy_steady,
        }
    }

    pub fn settings(&self) -> FocusSettings {
        FocusSettings { room: self.room.clone(), ..FocusSettings::default() }
    }
}

#[derive(Debug, Clone, Args)]
pub struct FocusArgs {
    /// Focus block length in minutes
    #[arg(short, long, default_value = "25")]
    pub minutes: u64,

    /// Real-time milliseconds per countdown second
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Room booked for the session
    #[arg(long, default_value = "Quiet Pod B")]
    pub room: String,

    /// Room environment preset
    #[arg(long, default_value = "Low light • 20°C • Noise mask")]
    pub preset: String,

    /// Time queued notifications are delivered (HH:MM)
    #[arg(long, default_value = "10:30")]
    pub digest_time: String,

    /// Hold urgent messages for the digest too
    #[arg(long)]
    pub no_urgent_lane: bool,

    /// Show secondary guidance (turns calm mode off)
    #[arg(long)]
    pub detailed: bool,

    /// Emit one JSON object per tick instead of a progress bar
    #[arg(long)]
    pub json: bool,
}

impl Default for FocusArgs {
    fn default() -> Self {
        let settings = FocusSettings::default();
        Self {
            minutes: settings.focus_minutes,
            tick_ms: 1000,
            room: settings.room,
            preset: settings.preset,
            digest_time: settings.digest_time,
            no_urgent_lane: !settings.urgent_lane,
            detailed: !settings.calm,
            json: false,
        }
    }
}

impl FocusArgs {
    /// Settings record for this session
    pub fn settings(&self) -> FocusSettings {
        FocusSettings {
            focus_minutes: self.minutes,
            digest_time: self.digest_time.clone(),
            room: self.room.clone(),
            preset: self.preset.clone(),
            urgent_lane: !self.no_urgent_lane,
            calm: !self.detailed,
        }
    }

    /// Timer configuration, validating duration and tick length
    pub fn timer_config(&self) -> Result<TimerConfig, TimerError> {
        self.settings()
            .timer_config()?
            .with_tick_interval(Duration::from_millis(self.tick_ms))
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// The subcommand to run, defaulting to a focus session
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Focus(FocusArgs::default()))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
