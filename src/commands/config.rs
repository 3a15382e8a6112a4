//! Prints the effective configuration.

use crate::libs::{config::Config, messages::Message, view::View};
use crate::msg_print;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    msg_print!(Message::ConfigHeader(Config::path()?.display().to_string()), true);
    View::config(&config);
    Ok(())
}
