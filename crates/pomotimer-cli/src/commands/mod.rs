pub mod config;
pub mod goal;
pub mod run;
pub mod sound;
pub mod status;

use pomotimer_core::{CommandAlarm, Config, Database, PomodoroTimer, SystemClock};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Mount the widget on the on-disk store with the configured alarm.
pub fn open_widget(config: &Config) -> CliResult<PomodoroTimer<Database>> {
    let db = Database::open()?;
    let alarm = CommandAlarm::new(config.alarm.program.clone(), config.alarm_asset()?);
    let widget = PomodoroTimer::load(db, Box::new(SystemClock), Box::new(alarm))?;
    Ok(widget)
}

/// Print the widget view as pretty JSON.
pub fn print_view(widget: &PomodoroTimer<Database>) -> CliResult {
    println!("{}", serde_json::to_string_pretty(&widget.view())?);
    Ok(())
}
