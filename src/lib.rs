//! # WorkCheck - work/idle activity monitor
//!
//! Watches keyboard and pointer input, splits the day into work stretches,
//! short breaks and inactivity, and raises reminders when a stretch runs
//! too long or the user drifts away during working hours.
//!
//! ## Features
//!
//! - **Activity Engine**: deterministic state machine driven by input pulses and a 1 Hz tick
//! - **Reminders**: soft and hard break reminders, short-break and inactivity notices
//! - **Work-hours gate**: inactivity alerts only inside a configurable hour window
//! - **Outbound alerts**: optional Telegram delivery, off the evaluation path
//! - **Terminal UI**: live status line, notification cards and a shutdown summary
//!
//! ## Usage
//!
//! ```rust,no_run
//! use workcheck::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
