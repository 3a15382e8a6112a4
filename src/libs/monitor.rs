//! The consumer shell around the activity engine.
//!
//! [`Monitor`] owns the [`ActivityEngine`] and is the only place that
//! mutates it. Input pulses from an [`ActivitySource`] arrive as messages on
//! a channel and are applied on the same task that runs the once-per-second
//! evaluation, so the engine never needs a lock:
//!
//! ```text
//! rdev thread ──debounce──▶ mpsc ──┐
//!                                  ├─▶ select! loop ──▶ engine.signal_activity()
//! 1s interval ─────────────────────┤                └─▶ engine.evaluate(now)
//! control keys (r/m/p/c) ──────────┤                        │
//! Ctrl-C / SIGTERM ────────────────┘                        │
//!                                                           ├─▶ terminal card
//!                                                           └─▶ outbound queue ──▶ Telegram (own task)
//! ```
//!
//! Outbound delivery runs on separate tasks and only ever logs failures;
//! nothing flows back into the engine.

use crate::libs::config::Config;
use crate::libs::debounce::Debouncer;
use crate::libs::engine::{ActivityEngine, ThresholdOverrides};
use crate::libs::formatter::{format_human, format_short};
use crate::libs::messages::macros::is_debug_mode;
use crate::libs::messages::Message;
use crate::libs::notification::Notification;
use crate::libs::telegram::Telegram;
use crate::libs::view::{self, View, GRAY};
use crate::{msg_debug, msg_error, msg_info, msg_warning};
use anyhow::Result;
use parking_lot::Mutex;
use rdev::{listen, Event, EventType};
use std::future::Future;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{self, MissedTickBehavior};

/// Default evaluation cadence.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Something that can deliver debounced activity pulses.
///
/// `start` hooks the source up to `pulses` and returns; delivery then
/// continues in the background until the receiver is dropped.
pub trait ActivitySource: Send {
    fn start(self: Box<Self>, pulses: UnboundedSender<()>) -> Result<()>;
}

/// Global keyboard/pointer hook backed by `rdev`.
///
/// The hook runs on its own OS thread and is restarted after a second if
/// it fails.
#[derive(Debug, Default)]
pub struct RdevSource {
    debouncer: Debouncer,
}

impl RdevSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivitySource for RdevSource {
    fn start(self: Box<Self>, pulses: UnboundedSender<()>) -> Result<()> {
        let debouncer = Arc::new(Mutex::new(self.debouncer));

        std::thread::Builder::new().name("activity-hook".to_string()).spawn(move || loop {
            let debouncer = debouncer.clone();
            let pulses_for_listener = pulses.clone();
            let result = listen(move |event: Event| {
                let is_input = matches!(
                    event.event_type,
                    EventType::KeyPress(_) | EventType::ButtonPress(_) | EventType::MouseMove { .. } | EventType::Wheel { .. }
                );
                if is_input && debouncer.lock().accept(Instant::now()) {
                    // A closed channel means the monitor is gone; nothing to do.
                    let _ = pulses_for_listener.send(());
                }
            });

            match result {
                Err(e) => {
                    msg_error!(Message::ActivityListenerFailed(format!("{:?}", e)));
                    std::thread::sleep(Duration::from_secs(1));
                }
                Ok(()) => break,
            }

            if pulses.is_closed() {
                break;
            }
        })?;

        Ok(())
    }
}

/// A source driven by hand through an [`ActivityHandle`]; used by tests and
/// by anything that detects activity some other way.
#[derive(Debug)]
pub struct ManualSource {
    pulses: UnboundedReceiver<()>,
}

/// Sending side of a [`ManualSource`]. Pulses are debounced like real input.
#[derive(Debug)]
pub struct ActivityHandle {
    pulses: UnboundedSender<()>,
    debouncer: Debouncer,
}

impl ManualSource {
    pub fn new() -> (Self, ActivityHandle) {
        Self::with_debouncer(Debouncer::default())
    }

    pub fn with_debouncer(debouncer: Debouncer) -> (Self, ActivityHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { pulses: rx }, ActivityHandle { pulses: tx, debouncer })
    }
}

impl ActivityHandle {
    /// Sends a pulse unless one was accepted within the throttle window.
    /// Returns whether the pulse went through.
    pub fn pulse(&mut self) -> bool {
        self.pulse_at(Instant::now())
    }

    pub fn pulse_at(&mut self, at: Instant) -> bool {
        self.debouncer.accept(at) && self.pulses.send(()).is_ok()
    }
}

impl ActivitySource for ManualSource {
    fn start(self: Box<Self>, pulses: UnboundedSender<()>) -> Result<()> {
        let mut incoming = self.pulses;
        tokio::spawn(async move {
            while incoming.recv().await.is_some() {
                if pulses.send(()).is_err() {
                    break;
                }
            }
        });
        Ok(())
    }
}

/// An alert text queued for the messaging channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub silent: bool,
}

/// Starts the outbound dispatcher and returns its queue.
///
/// Each message is sent on its own task; failures are logged and dropped.
pub fn spawn_outbound(telegram: Telegram) -> UnboundedSender<OutboundMessage> {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutboundMessage>();

    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let telegram = telegram.clone();
            tokio::spawn(async move {
                if let Err(e) = telegram.send(&message.text, message.silent).await {
                    msg_warning!(Message::OutboundFailed(e.to_string()));
                }
            });
        }
    });

    tx
}

/// A user action delivered to a running [`Monitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Restart all totals from zero.
    Reset,
    /// Switch between `Work` and `Drift`.
    ToggleMode,
    /// Pause evaluation, or resume it if paused.
    TogglePause,
    /// Re-read the configuration file and apply its thresholds.
    ReloadConfig,
    ApplyThresholds(ThresholdOverrides),
}

impl FromStr for ControlCommand {
    type Err = Message;

    /// Parses one line of keyboard input: `r`, `m`, `p` or `c`.
    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "r" | "reset" => Ok(ControlCommand::Reset),
            "m" | "mode" => Ok(ControlCommand::ToggleMode),
            "p" | "pause" => Ok(ControlCommand::TogglePause),
            "c" | "config" => Ok(ControlCommand::ReloadConfig),
            other => Err(Message::UnknownControl(other.to_string())),
        }
    }
}

/// Reads control keys from stdin, one per line.
///
/// Runs on a plain OS thread so a pending read never holds up runtime
/// shutdown. Unknown input is reported and skipped.
pub fn spawn_stdin_controls() -> Result<UnboundedReceiver<ControlCommand>> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::Builder::new().name("control-input".to_string()).spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ControlCommand>() {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(message) => msg_warning!(message),
            }
        }
    })?;

    Ok(rx)
}

/// Whether notifications reach the user.
///
/// In `Drift` the engine keeps counting but nothing is shown or sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellMode {
    #[default]
    Work,
    Drift,
}

pub struct Monitor {
    engine: ActivityEngine,
    mode: ShellMode,
    outbound: Option<UnboundedSender<OutboundMessage>>,
    controls: Option<UnboundedReceiver<ControlCommand>>,
    tick: Duration,
    render: bool,
    paused: bool,
}

impl Monitor {
    pub fn new(engine: ActivityEngine) -> Self {
        Self {
            engine,
            mode: ShellMode::Work,
            outbound: None,
            controls: None,
            tick: TICK_INTERVAL,
            render: true,
            paused: false,
        }
    }

    pub fn with_mode(mut self, mode: ShellMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_outbound(mut self, outbound: UnboundedSender<OutboundMessage>) -> Self {
        self.outbound = Some(outbound);
        self
    }

    pub fn with_controls(mut self, controls: UnboundedReceiver<ControlCommand>) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Disables terminal output (status line, cards, summary table).
    pub fn quiet(mut self) -> Self {
        self.render = false;
        self
    }

    pub fn engine(&self) -> &ActivityEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ActivityEngine {
        &mut self.engine
    }

    pub fn mode(&self) -> ShellMode {
        self.mode
    }

    /// Switches between `Work` and `Drift`. Totals restart from zero so the
    /// two modes never share accounting.
    pub fn toggle_mode(&mut self) -> ShellMode {
        self.mode = match self.mode {
            ShellMode::Work => ShellMode::Drift,
            ShellMode::Drift => ShellMode::Work,
        };
        self.engine.reset();
        tracing::debug!(mode = ?self.mode, "shell mode toggled, engine reset");
        self.mode
    }

    /// Stops evaluating until [`resume`](Self::resume). Activity signals are
    /// still recorded.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            msg_info!(Message::MonitorPaused);
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            msg_info!(Message::MonitorResumed);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn on_control(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Reset => {
                self.engine.reset();
                msg_info!(Message::MonitorReset);
            }
            ControlCommand::ToggleMode => {
                let mode = self.toggle_mode();
                msg_info!(Message::MonitorModeChanged(format!("{:?}", mode)));
            }
            ControlCommand::TogglePause => {
                if self.paused {
                    self.resume();
                } else {
                    self.pause();
                }
            }
            ControlCommand::ReloadConfig => match Config::read() {
                Ok(config) => {
                    self.engine.apply_thresholds(config.thresholds());
                    msg_info!(Message::MonitorConfigReloaded);
                }
                Err(e) => msg_warning!(Message::ConfigReadFailed(e.to_string())),
            },
            ControlCommand::ApplyThresholds(overrides) => self.engine.apply_thresholds(overrides),
        }
    }

    pub fn on_activity(&mut self) {
        self.engine.signal_activity();
    }

    /// One evaluation step. Returns the notifications that were delivered:
    /// none while paused or drifting.
    pub fn on_tick(&mut self) -> Vec<Notification> {
        if self.paused {
            return Vec::new();
        }

        let now = self.engine.now();
        let events = self.engine.evaluate(now);

        if self.mode == ShellMode::Drift {
            return Vec::new();
        }

        for event in &events {
            tracing::info!(kind = %event.kind, outbound = event.send_outbound, "{}", event.title);
            if self.render {
                View::notification(event);
            }
            self.forward(event);
        }

        events
    }

    fn forward(&self, event: &Notification) {
        if !event.send_outbound {
            return;
        }
        let (Some(outbound), Some(text)) = (&self.outbound, &event.outbound_text) else {
            return;
        };
        let message = OutboundMessage {
            text: text.clone(),
            silent: event.outbound_silent,
        };
        if outbound.send(message).is_err() {
            tracing::warn!("outbound dispatcher is gone, dropping alert");
        }
    }

    fn print_status(&self) {
        if !self.render {
            return;
        }
        let now = self.engine.now();

        // Colour codes make no sense in log output.
        if is_debug_mode() {
            msg_debug!(Message::MonitorStatus {
                mode: self.engine.mode().to_string(),
                session: format_short(&self.engine.current_session_duration_at(now)),
                worked: format_short(&self.engine.display_worked_total()),
                away: format_short(&self.engine.display_away_total_at(now)),
            });
            return;
        }

        let line = match self.mode {
            ShellMode::Work => View::status_line(&self.engine, now),
            ShellMode::Drift => format!(
                "{} | {}",
                view::paint("Drifting", GRAY),
                View::status_line(&self.engine, now)
            ),
        };
        if let Err(e) = write_status(&mut std::io::stdout(), &line) {
            tracing::trace!(error = %e, "status line not written");
        }
    }

    /// Runs until `shutdown` completes, then logs the totals and hands the
    /// engine back.
    pub async fn run(mut self, source: Box<dyn ActivitySource>, shutdown: impl Future<Output = ()>) -> Result<ActivityEngine> {
        let (tx, mut pulses) = mpsc::unbounded_channel();
        source.start(tx)?;

        let thresholds = self.engine.thresholds();
        msg_info!(Message::MonitorStarted {
            soft_limit: format_human(&thresholds.soft_limit),
            hard_limit: format_human(&thresholds.hard_limit),
            short_break_idle: format_human(&thresholds.short_break_idle),
            inactivity_idle: format_human(&thresholds.inactivity_idle),
        });
        if self.mode == ShellMode::Drift {
            msg_info!(Message::MonitorDriftMode);
        }

        let mut interval = time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut source_open = true;
        let mut controls = self.controls.take();
        let mut controls_open = controls.is_some();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    msg_info!(Message::MonitorShuttingDown, true);
                    break;
                }
                pulse = pulses.recv(), if source_open => match pulse {
                    Some(()) => self.on_activity(),
                    None => {
                        source_open = false;
                        msg_warning!(Message::ActivitySourceClosed);
                    }
                },
                command = next_control(&mut controls), if controls_open => match command {
                    Some(command) => self.on_control(command),
                    None => controls_open = false,
                },
                _ = interval.tick() => {
                    self.on_tick();
                    self.print_status();
                }
            }
        }

        let now = self.engine.now();
        msg_info!(self.engine.summary_at(now));
        if self.render {
            View::summary(&self.engine, now);
        }
        msg_info!(Message::MonitorStopped);

        Ok(self.engine)
    }
}

/// Overwrites the current terminal line with `line`.
fn write_status(out: &mut impl Write, line: &str) -> std::io::Result<()> {
    write!(out, "\r{}\x1b[K", line)?;
    out.flush()
}

async fn next_control(controls: &mut Option<UnboundedReceiver<ControlCommand>>) -> Option<ControlCommand> {
    match controls {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Completes on Ctrl-C, SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => msg_info!(Message::MonitorReceivedSigterm),
                    _ = sigint.recv() => msg_info!(Message::MonitorReceivedSigint),
                }
            }
            _ => {
                msg_warning!(Message::MonitorSignalHandlingNotSupported);
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => msg_info!(Message::MonitorReceivedCtrlC),
            Err(_) => {
                msg_warning!(Message::MonitorSignalHandlingNotSupported);
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn status_line_overwrites_current_line() {
        let mut out = Vec::new();
        write_status(&mut out, "Active | session: 3 min").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\rActive | session: 3 min\x1b[K");
    }

    #[test]
    fn status_line_write_errors_are_returned() {
        let err = write_status(&mut BrokenPipe, "Active").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }
}
