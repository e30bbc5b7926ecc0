//! NEWRO focus - wellbeing focus sessions with an observable countdown
//!
//! This is the main entry point for the newro-focus command line tool.

use tokio::sync::oneshot;
use tracing::{info, warn};

use newro_focus::{
    config::{Command, Config, FocusArgs, WellbeingArgs},
    display::FocusView,
    services::{
        adjustments::{CATALOGUE, SLA_NOTE},
        digest::sample_notifications,
        draft_day_plan,
        wellbeing::{APPROVAL_NOTE, MICRO_SUPPORTS},
        AdjustmentTracker, Assistant, Delivery, Digest, EarlyWarning, Need, Recap,
        SUGGESTED_PROMPTS,
    },
    state::{Conversation, FocusSettings, Role},
    tasks::CountdownTimer,
    utils::shutdown_signal,
};

const DURING_FOCUS_NOTE: &str =
    "During focus: notifications pause, status set to Focus, room preset applies, digests queue";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("newro_focus={}", config.log_level()))
        .init();

    match config.command() {
        Command::Focus(args) => run_focus(args).await,
        Command::Chat { prompt, auto_act, name } => {
            run_chat(&prompt.join(" "), auto_act, &name);
            Ok(())
        }
        Command::Plan => {
            println!("{}", draft_day_plan());
            Ok(())
        }
        Command::Digest { at, no_urgent_lane, expand } => {
            let settings = FocusSettings {
                digest_time: at,
                urgent_lane: !no_urgent_lane,
                ..FocusSettings::default()
            };
            run_digest(&settings, expand)
        }
        Command::Adjust { need, reason } => run_adjust(need, reason.as_deref()),
        Command::Wellbeing(args) => {
            run_wellbeing(&args);
            Ok(())
        }
        Command::Recap => {
            for line in Recap::sample().lines() {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

async fn run_focus(args: FocusArgs) -> anyhow::Result<()> {
    let settings = args.settings();
    let timer_config = args.timer_config()?;

    for line in settings.summary() {
        info!("{}", line);
    }
    if let Some(note) = settings.unless_calm(DURING_FOCUS_NOTE) {
        info!("{}", note);
    }
    if settings.urgent_lane {
        info!("Urgent lane open: urgent messages still come through");
    }

    let timer = CountdownTimer::spawn(timer_config);

    let json = args.json;
    timer.on_tick(move |progress| {
        let view = FocusView::from_progress(&progress);
        if json {
            match serde_json::to_string(&view) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to serialize focus view: {}", e),
            }
        } else {
            println!("{}  {}", view.render_line(), view.growth.label());
        }
    })?;

    let (done_tx, done_rx) = oneshot::channel();
    let mut done_tx = Some(done_tx);
    timer.on_complete(move || {
        if let Some(tx) = done_tx.take() {
            let _ = tx.send(());
        }
    })?;

    let initial = timer.start_with(timer_config).await?;
    info!("Focus started: {} remaining", FocusView::from_progress(&initial).clock());

    let interrupted = async {
        if let Err(e) = shutdown_signal().await {
            // Without signal handling the session can only end by completing
            warn!("Signal handling unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = done_rx => {
            info!("Focus block complete. Time for a 5 minute reset");
        }
        _ = interrupted => {
            let elapsed = timer.snapshot().progress.elapsed_seconds;
            timer.stop().await?;
            info!("Focus ended early after {}s", elapsed);
        }
    }

    timer.shutdown().await?;
    Ok(())
}

fn run_chat(prompt: &str, auto_act: bool, name: &str) {
    let assistant = Assistant::default();
    let mut conversation = Conversation::new(name);
    conversation.ask_before_act = !auto_act;

    if conversation.send(&assistant, prompt).is_none() {
        println!("Try one of: {}", SUGGESTED_PROMPTS.join(" | "));
    }

    for message in conversation.messages() {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("[{}] {}:\n{}\n", message.at.format("%H:%M"), who, message.text);
    }
}

fn run_digest(settings: &FocusSettings, expand: bool) -> anyhow::Result<()> {
    let mut digest = Digest::new(settings)?;
    for notification in sample_notifications() {
        let text = notification.text.clone();
        if digest.route(notification) == Delivery::Now {
            println!("Delivered now: {}", text);
        }
    }
    info!("{} notifications held for {}", digest.len(), digest.delivery_time());

    for line in digest.lines(expand) {
        println!("{}", line);
    }
    Ok(())
}

fn run_adjust(need: Option<Need>, reason: Option<&str>) -> anyhow::Result<()> {
    let mut tracker = AdjustmentTracker::sample();
    if let Some(need) = need {
        tracker.submit(need, reason.unwrap_or_default())?;
        println!("{}", SLA_NOTE);
    }

    println!("Track approvals");
    for line in tracker.status_lines() {
        println!("• {}", line);
    }
    println!("What’s offered");
    for item in CATALOGUE {
        println!("• {}", item);
    }
    Ok(())
}

fn run_wellbeing(args: &WellbeingArgs) {
    let warning = EarlyWarning::assess(args.signals(), &args.settings());
    for line in warning.lines() {
        println!("{}", line);
    }
    if warning.plan.is_some() {
        println!("Micro-supports: {}", MICRO_SUPPORTS.join(" | "));
    }
    println!("{}", APPROVAL_NOTE);
}
