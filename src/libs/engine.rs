//! Activity/idle state machine and notification-trigger engine.
//!
//! The engine owns every piece of tracking state: the current [`Mode`], the
//! timestamps of the last input and of the start of the current work
//! stretch, the worked/away totals and the one-shot reminder flags. It has
//! exactly two mutation entry points driven by the outside world:
//!
//! - [`ActivityEngine::signal_activity`]: a debounced input pulse arrived.
//! - [`ActivityEngine::evaluate`]: the periodic (1 Hz) tick.
//!
//! ```text
//!            since_activity > short_break_idle
//!   Active ─────────────────────────────────► ShortBreak
//!     │ ▲                                         │
//!     │ └──────────── signal_activity ────────────┤
//!     │                                           │ since_activity > inactivity_idle
//!     │ since_activity > inactivity_idle          ▼
//!     └─────────────────────────────────────► Inactive
//!                                                 │
//!       Active ◄──────── signal_activity ─────────┘
//! ```
//!
//! The engine performs no I/O and never fails. Intervals that would come out
//! negative (a clock stepping backwards) are clamped to zero. It is not
//! synchronized internally: the owner must serialize calls, which the
//! [`Monitor`](crate::libs::monitor::Monitor) does by applying signals on the
//! same task that evaluates.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use workcheck::libs::clock::ManualClock;
//! use workcheck::libs::engine::{ActivityEngine, Mode, Thresholds};
//! use workcheck::libs::notification::NotificationKind;
//!
//! let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let clock = ManualClock::new(start);
//! let mut engine = ActivityEngine::with_clock(Thresholds::default(), clock.clone());
//!
//! let events = engine.evaluate(clock.advance(Duration::minutes(6)));
//! assert_eq!(events[0].kind, NotificationKind::ShortBreak);
//! assert_eq!(engine.mode(), Mode::ShortBreak);
//! ```

use crate::libs::alert_window::{AlertWindow, WorkHours};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::formatter::format_human;
use crate::libs::notification::Notification;
use crate::libs::quotes::{QuoteSource, Quotes};
use chrono::{Duration, NaiveDateTime};
use std::collections::VecDeque;
use std::fmt;

/// What the user is doing right now, as far as the engine can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Input is arriving; the session clock is running.
    Active,
    /// No input for longer than `short_break_idle`; counted as away time.
    ShortBreak,
    /// No input for longer than `inactivity_idle`; threshold checks stop
    /// until the next activity signal.
    Inactive,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Mode::Active => "Active",
            Mode::ShortBreak => "Short break",
            Mode::Inactive => "Inactive",
        };
        write!(f, "{}", text)
    }
}

/// The four durations driving every transition and reminder.
///
/// Values are taken as given: zero or negative durations are not rejected
/// here, and `hard_limit >= soft_limit` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Work stretch length that triggers the first reminder.
    pub soft_limit: Duration,
    /// Work stretch length that triggers the second, outbound reminder.
    pub hard_limit: Duration,
    /// Idle time that turns the stretch into a short break.
    pub short_break_idle: Duration,
    /// Idle time that marks the user fully away.
    pub inactivity_idle: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            soft_limit: Duration::minutes(25),
            hard_limit: Duration::minutes(40),
            short_break_idle: Duration::minutes(5),
            inactivity_idle: Duration::minutes(15),
        }
    }
}

impl Thresholds {
    /// Second-scale thresholds for trying the tool out.
    pub fn debug() -> Self {
        Self {
            soft_limit: Duration::seconds(10),
            hard_limit: Duration::seconds(40),
            short_break_idle: Duration::seconds(5),
            inactivity_idle: Duration::seconds(15),
        }
    }

    /// Longer focus blocks with more generous idle allowances.
    pub fn long() -> Self {
        Self {
            soft_limit: Duration::minutes(40),
            hard_limit: Duration::minutes(60),
            short_break_idle: Duration::minutes(10),
            inactivity_idle: Duration::minutes(25),
        }
    }

    fn apply(&mut self, overrides: &ThresholdOverrides) {
        if let Some(value) = overrides.soft_limit {
            self.soft_limit = value;
        }
        if let Some(value) = overrides.hard_limit {
            self.hard_limit = value;
        }
        if let Some(value) = overrides.short_break_idle {
            self.short_break_idle = value;
        }
        if let Some(value) = overrides.inactivity_idle {
            self.inactivity_idle = value;
        }
    }
}

/// A partial threshold update; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdOverrides {
    pub soft_limit: Option<Duration>,
    pub hard_limit: Option<Duration>,
    pub short_break_idle: Option<Duration>,
    pub inactivity_idle: Option<Duration>,
}

impl From<Thresholds> for ThresholdOverrides {
    fn from(thresholds: Thresholds) -> Self {
        Self {
            soft_limit: Some(thresholds.soft_limit),
            hard_limit: Some(thresholds.hard_limit),
            short_break_idle: Some(thresholds.short_break_idle),
            inactivity_idle: Some(thresholds.inactivity_idle),
        }
    }
}

/// The activity engine. See the module documentation for the state machine.
pub struct ActivityEngine {
    thresholds: Thresholds,
    mode: Mode,
    last_activity_at: NaiveDateTime,
    last_reset_at: NaiveDateTime,
    session_start_at: NaiveDateTime,
    accumulated_worked: Duration,
    accumulated_away: Duration,
    soft_fired: bool,
    hard_fired: bool,
    pending: VecDeque<Notification>,
    clock: Box<dyn Clock>,
    alert_window: Box<dyn AlertWindow>,
    quotes: Box<dyn QuoteSource>,
}

impl fmt::Debug for ActivityEngine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ActivityEngine")
            .field("thresholds", &self.thresholds)
            .field("mode", &self.mode)
            .field("last_activity_at", &self.last_activity_at)
            .field("last_reset_at", &self.last_reset_at)
            .field("session_start_at", &self.session_start_at)
            .field("accumulated_worked", &self.accumulated_worked)
            .field("accumulated_away", &self.accumulated_away)
            .field("soft_fired", &self.soft_fired)
            .field("hard_fired", &self.hard_fired)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl ActivityEngine {
    /// Creates an engine on the system clock, gated by the default
    /// 9:00-18:00 work hours and using the built-in quotes.
    pub fn new(thresholds: Thresholds) -> Self {
        Self::with_clock(thresholds, SystemClock)
    }

    pub fn with_clock(thresholds: Thresholds, clock: impl Clock + 'static) -> Self {
        let now = clock.now();
        Self {
            thresholds,
            mode: Mode::Active,
            last_activity_at: now,
            last_reset_at: now,
            session_start_at: now,
            accumulated_worked: Duration::zero(),
            accumulated_away: Duration::zero(),
            soft_fired: false,
            hard_fired: false,
            pending: VecDeque::new(),
            clock: Box::new(clock),
            alert_window: Box::new(WorkHours::default()),
            quotes: Box::new(Quotes::seeded(now.and_utc().timestamp() as usize)),
        }
    }

    pub fn with_alert_window(mut self, window: impl AlertWindow + 'static) -> Self {
        self.alert_window = Box::new(window);
        self
    }

    pub fn with_quotes(mut self, quotes: impl QuoteSource + 'static) -> Self {
        self.quotes = Box::new(quotes);
        self
    }

    /// Current time according to the engine's clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Records a debounced activity pulse at the clock's current time.
    pub fn signal_activity(&mut self) {
        let now = self.clock.now();
        self.signal_activity_at(now);
    }

    /// Records a debounced activity pulse at `now`.
    ///
    /// Returning from a short break or inactivity closes the away stretch:
    /// its length is added to the away total, a welcome-back event is queued
    /// for the next [`evaluate`](Self::evaluate) and a fresh work stretch
    /// starts with both reminder flags cleared.
    pub fn signal_activity_at(&mut self, now: NaiveDateTime) {
        if self.mode != Mode::Active {
            let away = elapsed(self.last_activity_at, now);
            self.accumulated_away += away;

            let quote = self.quotes.next_quote();
            self.pending.push_back(Notification::welcome_back(away, self.accumulated_away, quote));

            self.soft_fired = false;
            self.hard_fired = false;
            self.last_reset_at = now;
            self.session_start_at = now;

            tracing::debug!(from = %self.mode, away_secs = away.num_seconds(), "user returned");
        }

        self.last_activity_at = now;
        self.mode = Mode::Active;
    }

    /// Advances the state machine to `now` and returns every event produced
    /// since the previous call: queued welcome-backs first, then reminders,
    /// then the short-break and inactivity transitions.
    ///
    /// Calling it twice with the same `now` yields nothing the second time.
    pub fn evaluate(&mut self, now: NaiveDateTime) -> Vec<Notification> {
        let mut events: Vec<Notification> = self.pending.drain(..).collect();

        if self.mode == Mode::Inactive {
            return events;
        }

        let since_reset = elapsed(self.last_reset_at, now);

        if self.mode == Mode::Active {
            if since_reset > self.thresholds.soft_limit && !self.soft_fired {
                events.push(Notification::soft_reminder(since_reset));
                self.soft_fired = true;
            }
            if since_reset > self.thresholds.hard_limit && !self.hard_fired {
                events.push(Notification::hard_reminder(since_reset));
                self.hard_fired = true;
            }
        }

        let since_activity = elapsed(self.last_activity_at, now);

        if self.mode == Mode::Active && since_activity > self.thresholds.short_break_idle {
            self.mode = Mode::ShortBreak;
            // No soft reminder while on a break.
            self.soft_fired = true;

            let stretch = elapsed(self.last_reset_at, self.last_activity_at);
            self.accumulated_worked += stretch;
            events.push(Notification::short_break(stretch, self.accumulated_worked));

            tracing::debug!(stretch_secs = stretch.num_seconds(), "short break started");
        }

        if since_activity > self.thresholds.inactivity_idle {
            if self.mode == Mode::Active {
                // Inactivity came first (short_break_idle >= inactivity_idle):
                // the stretch closes here instead.
                let stretch = elapsed(self.last_reset_at, self.last_activity_at);
                self.accumulated_worked += stretch;
                tracing::debug!(stretch_secs = stretch.num_seconds(), "work stretch closed by inactivity");
            }
            self.mode = Mode::Inactive;

            if self.alert_window.contains(now) {
                let quote = self.quotes.next_quote();
                events.push(Notification::inactivity_alert(self.thresholds.inactivity_idle, quote));
                tracing::debug!("user inactive");
            } else {
                tracing::debug!("user inactive outside alert window, no alert");
            }
        }

        events
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn soft_fired(&self) -> bool {
        self.soft_fired
    }

    pub fn hard_fired(&self) -> bool {
        self.hard_fired
    }

    /// Sum of closed work stretches.
    pub fn accumulated_worked(&self) -> Duration {
        self.accumulated_worked
    }

    /// Sum of closed away stretches.
    pub fn accumulated_away(&self) -> Duration {
        self.accumulated_away
    }

    pub fn current_session_duration(&self) -> Duration {
        self.current_session_duration_at(self.clock.now())
    }

    /// Length of the running session; zero unless [`Mode::Active`].
    pub fn current_session_duration_at(&self, now: NaiveDateTime) -> Duration {
        match self.mode {
            Mode::Active => elapsed(self.session_start_at, now),
            _ => Duration::zero(),
        }
    }

    /// Worked total including the open stretch up to the last input.
    pub fn display_worked_total(&self) -> Duration {
        match self.mode {
            Mode::Active => self.accumulated_worked + elapsed(self.last_reset_at, self.last_activity_at),
            _ => self.accumulated_worked,
        }
    }

    pub fn display_away_total(&self) -> Duration {
        self.display_away_total_at(self.clock.now())
    }

    /// Away total including the open idle stretch up to `now`.
    pub fn display_away_total_at(&self, now: NaiveDateTime) -> Duration {
        match self.mode {
            Mode::Active => self.accumulated_away,
            _ => self.accumulated_away + elapsed(self.last_activity_at, now),
        }
    }

    /// Replaces any subset of the thresholds. Progress of the current
    /// stretch is kept and re-checked on the next evaluation.
    pub fn apply_thresholds(&mut self, overrides: impl Into<ThresholdOverrides>) {
        self.thresholds.apply(&overrides.into());
        tracing::debug!(thresholds = ?self.thresholds, "thresholds applied");
    }

    /// Returns the engine to its just-constructed condition.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.reset_at(now);
    }

    pub fn reset_at(&mut self, now: NaiveDateTime) {
        self.mode = Mode::Active;
        self.last_activity_at = now;
        self.last_reset_at = now;
        self.session_start_at = now;
        self.accumulated_worked = Duration::zero();
        self.accumulated_away = Duration::zero();
        self.soft_fired = false;
        self.hard_fired = false;
        self.pending.clear();
    }

    /// One-line totals for the shutdown log.
    pub fn summary(&self) -> String {
        self.summary_at(self.clock.now())
    }

    pub fn summary_at(&self, now: NaiveDateTime) -> String {
        format!(
            "Shutting down. Total worked: {}; away: {}",
            format_human(&self.display_worked_total()),
            format_human(&self.display_away_total_at(now))
        )
    }
}

/// `to - from`, never negative.
fn elapsed(from: NaiveDateTime, to: NaiveDateTime) -> Duration {
    let delta = to.signed_duration_since(from);
    if delta < Duration::zero() {
        Duration::zero()
    } else {
        delta
    }
}
