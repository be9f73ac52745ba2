use pomotimer_core::Config;

use super::{open_widget, print_view, CliResult};

pub fn run() -> CliResult {
    let config = Config::load()?;
    let widget = open_widget(&config)?;
    print_view(&widget)
}
