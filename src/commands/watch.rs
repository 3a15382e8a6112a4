//! Watch command: run the activity monitor in the foreground.
//!
//! Loads the configuration, applies any timing flags on top of it, hooks
//! global keyboard/mouse input and evaluates the engine once per second
//! until Ctrl-C or SIGTERM. Lines typed on stdin drive the monitor's
//! controls (reset, work/drift, pause, reload config).

use crate::libs::config::Config;
use crate::libs::engine::{ActivityEngine, ThresholdOverrides, Thresholds};
use crate::libs::messages::Message;
use crate::libs::monitor::{self, Monitor, RdevSource, ShellMode};
use crate::libs::telegram::Telegram;
use crate::{msg_info, msg_warning};
use anyhow::Result;
use chrono::Duration;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Second-scale timings for trying things out (10s/40s reminders, 5s short break, 15s inactivity)
    #[arg(short, long, conflicts_with = "long")]
    debug: bool,

    /// Longer focus blocks (40m/60m reminders, 10m short break, 25m inactivity)
    #[arg(short, long)]
    long: bool,

    /// Minutes of work before the first reminder, overriding config and presets
    #[arg(short, long, value_name = "MINUTES")]
    pomodoro: Option<u32>,

    /// Track time without showing or sending notifications
    #[arg(long)]
    drift: bool,
}

impl WatchArgs {
    /// Threshold changes requested on the command line, in application order.
    pub fn overrides(&self) -> Vec<ThresholdOverrides> {
        let mut overrides = Vec::new();

        if self.debug {
            msg_info!(Message::PresetDebug);
            overrides.push(Thresholds::debug().into());
        } else if self.long {
            msg_info!(Message::PresetLong);
            overrides.push(Thresholds::long().into());
        }

        if let Some(minutes) = self.pomodoro {
            msg_info!(Message::SoftLimitOverride(u64::from(minutes)));
            overrides.push(ThresholdOverrides {
                soft_limit: Some(Duration::minutes(i64::from(minutes))),
                ..Default::default()
            });
        }

        overrides
    }
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    let config = Config::read().unwrap_or_else(|e| {
        msg_warning!(Message::ConfigReadFailed(e.to_string()));
        Config::default()
    });

    let mut engine = ActivityEngine::new(config.thresholds()).with_alert_window(config.alert_window());
    for overrides in args.overrides() {
        engine.apply_thresholds(overrides);
    }

    let telegram = config.telegram();
    let mode = if args.drift { ShellMode::Drift } else { ShellMode::Work };
    let mut monitor = Monitor::new(engine).with_mode(mode);
    if telegram.is_ready() {
        monitor = monitor.with_outbound(monitor::spawn_outbound(Telegram::new(telegram)));
    } else {
        msg_info!(Message::OutboundNotConfigured);
    }

    match monitor::spawn_stdin_controls() {
        Ok(controls) => {
            monitor = monitor.with_controls(controls);
            msg_info!(Message::MonitorControlsHint);
        }
        Err(e) => msg_warning!(Message::ControlsUnavailable(e.to_string())),
    }

    monitor.run(Box::new(RdevSource::new()), monitor::shutdown_signal()).await?;
    Ok(())
}
