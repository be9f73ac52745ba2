use clap::Subcommand;
use pomotimer_core::Config;

use super::{open_widget, print_view, CliResult};

#[derive(Subcommand)]
pub enum SoundAction {
    /// Play the alarm when an interval completes
    On,
    /// Stay silent
    Off,
    /// Flip the current setting
    Toggle,
}

pub fn run(action: SoundAction) -> CliResult {
    let config = Config::load()?;
    let mut widget = open_widget(&config)?;
    match action {
        SoundAction::On => widget.set_sound_enabled(true)?,
        SoundAction::Off => widget.set_sound_enabled(false)?,
        SoundAction::Toggle => widget.toggle_sound()?,
    };
    print_view(&widget)
}
