use std::io::Write;

use anyhow::Result;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    select,
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    i18n::{Language, Phrase},
    timer::{
        notifier::TerminalNotifier,
        processing::{ProcessingModule, TimerEventProcessor},
        recorder::SessionRecorder,
        runner::{TimerCommand, TimerEvent, TimerRunner, DEFAULT_TICK_INTERVAL},
        state::{Phase, PomodoroTimer, TimerDurations, TimerSnapshot},
    },
    utils::{clock::DefaultClock, shutdown::detect_shutdown},
};

use super::AppContext;

const BAR_WIDTH: usize = 20;

#[derive(Debug, clap::Args)]
pub struct TimerCommandArgs {
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Focus length in minutes. Defaults to focusMinutes from settings.json"
    )]
    focus_minutes: Option<u32>,
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Break length in minutes. Defaults to breakMinutes from settings.json"
    )]
    break_minutes: Option<u32>,
    #[arg(long, help = "Start the next phase as soon as one ends")]
    continuous: bool,
    #[arg(long, help = "Quit after this many focus sessions")]
    stop_after: Option<u32>,
}

/// Runs the timer in the foreground until `q`, ctrl-c or `--stop-after` is reached. Completed
/// focus sessions are recorded for the signed in user.
pub async fn process_timer_command(context: &AppContext, args: TimerCommandArgs) -> Result<()> {
    let user = context.require_user().await?;
    let language = context.language;
    let durations = TimerDurations::from_minutes(
        args.focus_minutes.unwrap_or(context.settings.focus_minutes),
        args.break_minutes.unwrap_or(context.settings.break_minutes),
    );
    info!("Starting timer with {durations:?}");

    let shutdown = CancellationToken::new();
    let (commands_tx, commands_rx) = mpsc::channel(8);
    let (events_tx, events_rx) = mpsc::channel(32);

    let runner = TimerRunner::new(
        PomodoroTimer::new(durations),
        commands_rx,
        events_tx,
        Box::new(TerminalNotifier::new(context.settings.notifications)),
        Box::new(DefaultClock),
        shutdown.clone(),
        DEFAULT_TICK_INTERVAL,
    );
    let processing = ProcessingModule::new(
        events_rx,
        (
            SessionRecorder::new(context.store.clone(), user.id, Box::new(DefaultClock)),
            TerminalView::new(
                language,
                args.continuous,
                args.stop_after,
                commands_tx.clone(),
                shutdown.clone(),
            ),
        ),
    );

    println!("{}", language.t(Phrase::PomodoroTimer));
    println!(
        "{}",
        language.pick(
            "p or enter: start/pause, r: reset, q: quit",
            "p أو enter: تشغيل/إيقاف، r: إعادة، q: خروج",
        )
    );
    commands_tx.send(TimerCommand::Toggle).await?;

    let input = read_input(
        BufReader::new(tokio::io::stdin()),
        commands_tx,
        shutdown.clone(),
    );

    let (runner_result, processing_result, input_result, _) = tokio::join!(
        runner.run(),
        processing.run(),
        input,
        detect_shutdown(shutdown.clone()),
    );
    println!();
    runner_result?;
    processing_result?;
    input_result?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Command(TimerCommand),
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim().to_lowercase().as_str() {
        "" | "p" => Some(Input::Command(TimerCommand::Toggle)),
        "r" => Some(Input::Command(TimerCommand::Reset)),
        "q" => Some(Input::Quit),
        _ => None,
    }
}

/// Forwards typed commands to the runner until `q`, shutdown, or the end of input. Closing the
/// input doesn't stop a running timer.
async fn read_input(
    reader: impl AsyncBufRead + Unpin,
    commands: mpsc::Sender<TimerCommand>,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut lines = reader.lines();
    loop {
        let line = select! {
            _ = shutdown.cancelled() => return Ok(()),
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            info!("Input closed");
            return Ok(());
        };
        match parse_input(&line) {
            Some(Input::Command(command)) => {
                if commands.send(command).await.is_err() {
                    return Ok(());
                }
            }
            Some(Input::Quit) => {
                info!("Quit requested");
                shutdown.cancel();
                return Ok(());
            }
            None => warn!("Ignoring timer input {line:?}"),
        }
    }
}

fn status_line(language: Language, snapshot: &TimerSnapshot) -> String {
    let phase = match snapshot.phase {
        Phase::Focus => language.t(Phrase::Focus),
        Phase::Break => language.t(Phrase::Break),
    };
    let paused = if snapshot.running {
        ""
    } else {
        language.pick(" (paused)", " (متوقف)")
    };
    format!(
        "{phase} {} {} {}: {}{paused}",
        snapshot.display(),
        snapshot.progress().bar(BAR_WIDTH),
        language.t(Phrase::Sessions),
        snapshot.sessions,
    )
}

/// Keeps one status line up to date and decides what happens after a phase ends.
struct TerminalView {
    language: Language,
    continuous: bool,
    stop_after: Option<u32>,
    commands: mpsc::Sender<TimerCommand>,
    shutdown: CancellationToken,
}

impl TerminalView {
    fn new(
        language: Language,
        continuous: bool,
        stop_after: Option<u32>,
        commands: mpsc::Sender<TimerCommand>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            language,
            continuous,
            stop_after,
            commands,
            shutdown,
        }
    }

    fn render(&self, snapshot: &TimerSnapshot) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "\r\x1b[K{}", status_line(self.language, snapshot))?;
        stdout.flush()?;
        Ok(())
    }
}

impl TimerEventProcessor for TerminalView {
    async fn process_next(&mut self, event: TimerEvent) -> Result<()> {
        match event {
            TimerEvent::Changed(snapshot) | TimerEvent::Tick(snapshot) => self.render(&snapshot),
            TimerEvent::PhaseCompleted(completion, snapshot) => {
                let notification = completion.notification();
                println!("\r\x1b[K{} {}", notification.title, notification.body);

                let reached_goal = completion.finished == Phase::Focus
                    && self.stop_after.is_some_and(|goal| completion.sessions >= goal);
                if reached_goal {
                    info!("Reached {} sessions, stopping", completion.sessions);
                    self.shutdown.cancel();
                    return Ok(());
                }
                if self.continuous {
                    self.commands.send(TimerCommand::Toggle).await?;
                }
                self.render(&snapshot)
            }
        }
    }

    async fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use super::{parse_input, read_input, status_line, Input, TerminalView};
    use crate::{
        i18n::Language,
        timer::{
            processing::TimerEventProcessor,
            runner::{TimerCommand, TimerEvent},
            state::{Phase, PhaseCompletion, PomodoroTimer, TimerDurations},
        },
    };

    #[test]
    fn parses_keys() {
        assert_eq!(parse_input(""), Some(Input::Command(TimerCommand::Toggle)));
        assert_eq!(parse_input(" P "), Some(Input::Command(TimerCommand::Toggle)));
        assert_eq!(parse_input("r"), Some(Input::Command(TimerCommand::Reset)));
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input("x"), None);
    }

    #[tokio::test]
    async fn input_forwards_commands_until_quit() -> Result<()> {
        let (tx, mut rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        read_input(&b"p\nwhat\nr\nq\np\n"[..], tx, shutdown.clone()).await?;

        assert_eq!(rx.recv().await, Some(TimerCommand::Toggle));
        assert_eq!(rx.recv().await, Some(TimerCommand::Reset));
        assert_eq!(rx.recv().await, None);
        assert!(shutdown.is_cancelled());
        Ok(())
    }

    #[tokio::test]
    async fn end_of_input_keeps_timer_alive() -> Result<()> {
        let (tx, _rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        read_input(&b"p\n"[..], tx, shutdown.clone()).await?;
        assert!(!shutdown.is_cancelled());
        Ok(())
    }

    #[test]
    fn status_line_shows_phase_and_time() {
        let snapshot = PomodoroTimer::new(TimerDurations::from_minutes(25, 5)).snapshot();
        let line = status_line(Language::En, &snapshot);
        assert!(line.starts_with("Focus 25:00 ["));
        assert!(line.ends_with("Sessions: 0 (paused)"));
    }

    fn completion(finished: Phase, sessions: u32) -> TimerEvent {
        let snapshot = PomodoroTimer::new(TimerDurations::default()).snapshot();
        TimerEvent::PhaseCompleted(PhaseCompletion { finished, sessions }, snapshot)
    }

    #[tokio::test]
    async fn continuous_mode_starts_next_phase() -> Result<()> {
        let (tx, mut rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let mut view = TerminalView::new(Language::En, true, None, tx, shutdown.clone());

        view.process_next(completion(Phase::Focus, 1)).await?;
        assert_eq!(rx.try_recv().ok(), Some(TimerCommand::Toggle));
        assert!(!shutdown.is_cancelled());
        Ok(())
    }

    #[tokio::test]
    async fn stops_after_goal() -> Result<()> {
        let (tx, mut rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let mut view = TerminalView::new(Language::En, true, Some(2), tx, shutdown.clone());

        view.process_next(completion(Phase::Focus, 1)).await?;
        view.process_next(completion(Phase::Break, 1)).await?;
        assert!(!shutdown.is_cancelled());
        view.process_next(completion(Phase::Focus, 2)).await?;
        assert!(shutdown.is_cancelled());

        assert_eq!(rx.try_recv().ok(), Some(TimerCommand::Toggle));
        assert_eq!(rx.try_recv().ok(), Some(TimerCommand::Toggle));
        assert!(rx.try_recv().is_err());
        Ok(())
    }
}
