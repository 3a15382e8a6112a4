//! Core library modules for workcheck.
//!
//! - **Engine**: [`engine`] state machine, [`notification`] records, [`clock`] sources
//! - **Collaborators**: [`debounce`], [`quotes`], [`alert_window`], [`telegram`]
//! - **Shell**: [`monitor`] event loop and [`view`] terminal rendering
//! - **Infrastructure**: [`config`], [`data_storage`], [`formatter`], [`messages`]

pub mod alert_window;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod debounce;
pub mod engine;
pub mod formatter;
pub mod messages;
pub mod monitor;
pub mod notification;
pub mod quotes;
pub mod telegram;
pub mod view;
