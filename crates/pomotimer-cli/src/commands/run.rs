//! Interactive timer.
//!
//! Reads one command per line from stdin and redraws a single status line on
//! every input and every tick.

use std::io::{self, BufRead, Write};
use std::thread;

use clap::Args;
use pomotimer_core::storage::UiConfig;
use pomotimer_core::view::progress_bar;
use pomotimer_core::{Command, Config, Event, Mode, TimerRuntime, TimerView};
use tokio::sync::mpsc;
use tracing::debug;

use super::{open_widget, CliResult};

#[derive(Args)]
pub struct RunArgs {
    /// Interval to begin with
    #[arg(long, default_value = "work")]
    mode: Mode,
    /// Start counting down immediately
    #[arg(long)]
    start: bool,
}

pub fn run(args: RunArgs) -> CliResult {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run_interactive(args))
}

async fn run_interactive(args: RunArgs) -> CliResult {
    let config = Config::load()?;
    let widget = open_widget(&config)?;
    let mut runtime = TimerRuntime::new(widget);

    if args.mode != Mode::Work {
        runtime.dispatch(Command::SwitchMode(args.mode))?;
    }
    if args.start {
        runtime.dispatch(Command::Start)?;
    }

    let mut screen = Screen::new(config.ui.clone());
    screen.help()?;
    screen.draw(&runtime.widget().view())?;

    let mut lines = spawn_line_reader();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let line = line?;
                match parse_input(&line, &config.ui.goal_input) {
                    Input::Quit => break,
                    Input::Help => screen.help()?,
                    Input::Unknown(text) => screen.note(&format!("unknown command: {text}"))?,
                    Input::Command(command) => {
                        if let Some(event) = runtime.dispatch(command)? {
                            debug!(event = event.kind(), "command applied");
                        }
                    }
                }
            }
            completed = runtime.next_tick() => {
                if let Some(event) = completed? {
                    screen.announce(&event, &runtime.widget().view())?;
                }
            }
            _ = &mut ctrl_c => break,
        }
        screen.draw(&runtime.widget().view())?;
    }

    runtime.shutdown();
    screen.finish()?;
    Ok(())
}

/// Read stdin lines on a plain thread. A blocking read cannot be cancelled,
/// so it must not be owned by the runtime that is torn down on exit.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[derive(Debug, PartialEq)]
enum Input {
    Command(Command),
    Help,
    Quit,
    Unknown(String),
}

/// Map one line of user input onto a widget command.
fn parse_input(line: &str, default_goal: &str) -> Input {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "p" | "start" | "pause" | "toggle" => Input::Command(Command::Toggle),
        "r" | "reset" => Input::Command(Command::Reset),
        "g" | "goal" => {
            let value = if rest.is_empty() { default_goal } else { rest };
            Input::Command(Command::SetGoal(value.to_string()))
        }
        "m" | "mute" | "sound" => Input::Command(Command::ToggleSound),
        "h" | "?" | "help" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => match other.parse::<Mode>() {
            Ok(mode) => Input::Command(Command::SwitchMode(mode)),
            Err(_) => Input::Unknown(line.to_string()),
        },
    }
}

struct Screen {
    ui: UiConfig,
    out: io::Stdout,
}

impl Screen {
    fn new(ui: UiConfig) -> Self {
        Self {
            ui,
            out: io::stdout(),
        }
    }

    fn help(&mut self) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "\r\x1b[2K[enter] start/pause  r reset  w/s/l work/short/long")?;
        writeln!(out, "g <n> set goal  m sound on/off  q quit")?;
        out.flush()
    }

    fn note(&mut self, message: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "\r\x1b[2K{message}")?;
        out.flush()
    }

    fn draw(&mut self, view: &TimerView) -> io::Result<()> {
        let line = status_line(view, self.ui.progress_bar_width as usize);
        let mut out = self.out.lock();
        if self.ui.terminal_title {
            write!(out, "\x1b]0;{}\x07", view.title)?;
        }
        write!(out, "\r\x1b[2K{line}")?;
        out.flush()
    }

    fn announce(&mut self, event: &Event, view: &TimerView) -> io::Result<()> {
        if let Event::IntervalCompleted {
            mode, next_mode, ..
        } = event
        {
            self.note(&format!(
                "{} finished. Up next: {} (press enter to start)",
                mode.label(),
                next_mode.label()
            ))?;
            if *mode == Mode::Work && view.goal_achieved {
                self.note("Goal achieved! Keep going!")?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        let mut out = self.out.lock();
        if self.ui.terminal_title {
            write!(out, "\x1b]0;\x07")?;
        }
        writeln!(out)?;
        out.flush()
    }
}

fn status_line(view: &TimerView, bar_width: usize) -> String {
    let state = if view.active { "running" } else { "paused" };
    let sound = if view.sound_enabled { "on" } else { "off" };
    let mut line = format!(
        "[{}] {} {}  sound:{}",
        view.mode_label, view.countdown, state, sound
    );
    if view.has_goal() {
        line.push_str(&format!(
            "  {}/{} {} {:.0}%",
            view.completed_today,
            view.goal,
            progress_bar(view.progress_pct, bar_width),
            view.progress_pct
        ));
    } else {
        line.push_str(&format!("  done today: {}", view.completed_today));
    }
    line
}
