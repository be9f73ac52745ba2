use pomotimer_core::Config;
use tracing::info;

use super::{open_widget, print_view, CliResult};

/// Invalid input leaves the goal as it was; the view is printed either way.
pub fn run(value: Option<String>) -> CliResult {
    let config = Config::load()?;
    let mut widget = open_widget(&config)?;
    let input = value.unwrap_or_else(|| config.ui.goal_input.clone());
    if let Some(event) = widget.apply_goal(&input)? {
        info!(event = event.kind(), "goal applied");
    }
    print_view(&widget)
}
