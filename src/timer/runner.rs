use std::time::Duration;

use anyhow::Result;
use tokio::{sync::mpsc, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::utils::clock::Clock;

use super::{
    notifier::{NotificationPermission, Notifier},
    state::{PhaseCompletion, PomodoroTimer, TimerSnapshot},
};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Wakes the loop up while nothing is scheduled. Only has to be longer than any real tick.
const IDLE_WAKE: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Toggle,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Started, paused or reset.
    Changed(TimerSnapshot),
    Tick(TimerSnapshot),
    PhaseCompleted(PhaseCompletion, TimerSnapshot),
}

/// Drives a [PomodoroTimer] in real time. Commands come in through one channel, every state
/// change goes out through another so the caller can render it and persist completions.
pub struct TimerRunner {
    timer: PomodoroTimer,
    commands: mpsc::Receiver<TimerCommand>,
    events: mpsc::Sender<TimerEvent>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
    shutdown: CancellationToken,
    tick_interval: Duration,
}

impl TimerRunner {
    pub fn new(
        timer: PomodoroTimer,
        commands: mpsc::Receiver<TimerCommand>,
        events: mpsc::Sender<TimerEvent>,
        notifier: Box<dyn Notifier>,
        clock: Box<dyn Clock>,
        shutdown: CancellationToken,
        tick_interval: Duration,
    ) -> Self {
        Self {
            timer,
            commands,
            events,
            notifier,
            clock,
            shutdown,
            tick_interval,
        }
    }

    /// Executes the timer event loop until shutdown or until every command sender is gone.
    pub async fn run(mut self) -> Result<()> {
        self.publish(TimerEvent::Changed(self.timer.snapshot()))
            .await?;

        // Ticks are scheduled from the previous tick, not from when it was handled, so the
        // countdown doesn't drift.
        let mut next_tick: Option<Instant> = None;
        loop {
            let wake = next_tick.unwrap_or_else(|| self.clock.instant() + IDLE_WAKE);

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Timer stopped by shutdown");
                    return Ok(())
                }
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        info!("Command channel closed, stopping timer");
                        return Ok(())
                    };
                    next_tick = self.apply(command).await?;
                }
                _ = self.clock.sleep_until(wake) => {
                    if next_tick.is_some() {
                        next_tick = self.on_tick(wake).await?;
                    }
                }
            }
        }
    }

    async fn apply(&mut self, command: TimerCommand) -> Result<Option<Instant>> {
        debug!("Applying {command:?}");
        let next_tick = match command {
            TimerCommand::Toggle => {
                let starting = !self.timer.is_running();
                if starting && self.notifier.permission() == NotificationPermission::Default {
                    let permission = self.notifier.request_permission();
                    info!("Notification permission is now {permission:?}");
                }
                self.timer
                    .toggle()
                    .then(|| self.clock.instant() + self.tick_interval)
            }
            TimerCommand::Reset => {
                self.timer.reset();
                None
            }
        };
        self.publish(TimerEvent::Changed(self.timer.snapshot()))
            .await?;
        Ok(next_tick)
    }

    async fn on_tick(&mut self, scheduled: Instant) -> Result<Option<Instant>> {
        match self.timer.tick() {
            Some(completion) => {
                info!("Finished {:?} phase, {} sessions", completion.finished, completion.sessions);
                self.notify(&completion);
                self.publish(TimerEvent::PhaseCompleted(
                    completion,
                    self.timer.snapshot(),
                ))
                .await?;
                Ok(None)
            }
            None => {
                self.publish(TimerEvent::Tick(self.timer.snapshot())).await?;
                Ok(self
                    .timer
                    .is_running()
                    .then_some(scheduled + self.tick_interval))
            }
        }
    }

    fn notify(&self, completion: &PhaseCompletion) {
        if self.notifier.permission() != NotificationPermission::Granted {
            return;
        }
        if let Err(e) = self.notifier.notify(&completion.notification()) {
            warn!("Failed to show notification {e:?}");
        }
    }

    async fn publish(&self, event: TimerEvent) -> Result<()> {
        self.events
            .send(event)
            .await
            .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::Result;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use super::{TimerCommand, TimerEvent, TimerRunner, DEFAULT_TICK_INTERVAL};
    use crate::{
        timer::{
            notifier::{MockNotifier, NotificationPermission},
            state::{Phase, PomodoroTimer, TimerDurations, TimerSnapshot},
        },
        utils::{clock::DefaultClock, logging::TEST_LOGGING},
    };

    const DURATIONS: TimerDurations = TimerDurations { focus: 3, rest: 2 };

    struct Harness {
        commands: mpsc::Sender<TimerCommand>,
        events: mpsc::Receiver<TimerEvent>,
        shutdown: CancellationToken,
    }

    impl Harness {
        async fn next(&mut self) -> TimerEvent {
            self.events.recv().await.expect("runner stopped early")
        }

        /// Reads events until a phase completes and returns the snapshot after it.
        async fn until_completed(&mut self) -> (Phase, TimerSnapshot) {
            loop {
                if let TimerEvent::PhaseCompleted(completion, snapshot) = self.next().await {
                    return (completion.finished, snapshot);
                }
            }
        }
    }

    fn runner(notifier: MockNotifier) -> (TimerRunner, Harness) {
        let (command_sender, command_receiver) = mpsc::channel(4);
        let (event_sender, event_receiver) = mpsc::channel(16);
        let shutdown = CancellationToken::new();
        let runner = TimerRunner::new(
            PomodoroTimer::new(DURATIONS),
            command_receiver,
            event_sender,
            Box::new(notifier),
            Box::new(DefaultClock),
            shutdown.clone(),
            DEFAULT_TICK_INTERVAL,
        );
        (
            runner,
            Harness {
                commands: command_sender,
                events: event_receiver,
                shutdown,
            },
        )
    }

    fn granted_notifier(expected_notifications: usize) -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(NotificationPermission::Granted);
        notifier.expect_request_permission().never();
        notifier
            .expect_notify()
            .times(expected_notifications)
            .returning(|_| Ok(()));
        notifier
    }

    #[tokio::test(start_paused = true)]
    async fn focus_then_break_cycle() -> Result<()> {
        *TEST_LOGGING;
        let (runner, mut harness) = runner(granted_notifier(2));

        let (result, ()) = tokio::join!(runner.run(), async {
            assert!(matches!(harness.next().await, TimerEvent::Changed(s) if !s.running));

            let started = tokio::time::Instant::now();
            harness.commands.send(TimerCommand::Toggle).await.unwrap();
            let (finished, snapshot) = harness.until_completed().await;
            assert_eq!(finished, Phase::Focus);
            assert_eq!(snapshot.phase, Phase::Break);
            assert_eq!(snapshot.time_left, 2);
            assert_eq!(snapshot.sessions, 1);
            assert!(!snapshot.running);
            assert_eq!(started.elapsed(), Duration::from_secs(3));

            harness.commands.send(TimerCommand::Toggle).await.unwrap();
            let (finished, snapshot) = harness.until_completed().await;
            assert_eq!(finished, Phase::Break);
            assert_eq!(snapshot.phase, Phase::Focus);
            assert_eq!(snapshot.time_left, 3);
            assert_eq!(snapshot.sessions, 1);

            harness.shutdown.cancel();
        });
        result
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_timer_does_not_tick() -> Result<()> {
        let (runner, mut harness) = runner(granted_notifier(0));

        let (result, ()) = tokio::join!(runner.run(), async {
            harness.next().await;
            tokio::time::sleep(Duration::from_secs(10)).await;
            assert!(harness.events.try_recv().is_err());
            harness.shutdown.cancel();
        });
        result
    }

    #[tokio::test(start_paused = true)]
    async fn reset_while_running_stops_the_countdown() -> Result<()> {
        let (runner, mut harness) = runner(granted_notifier(0));

        let (result, ()) = tokio::join!(runner.run(), async {
            harness.next().await;
            harness.commands.send(TimerCommand::Toggle).await.unwrap();
            harness.next().await;
            assert!(matches!(harness.next().await, TimerEvent::Tick(s) if s.time_left == 2));

            harness.commands.send(TimerCommand::Reset).await.unwrap();
            let TimerEvent::Changed(snapshot) = harness.next().await else {
                panic!("expected a state change after reset");
            };
            assert_eq!((snapshot.phase, snapshot.time_left, snapshot.running), (Phase::Focus, 3, false));

            tokio::time::sleep(Duration::from_secs(10)).await;
            assert!(harness.events.try_recv().is_err());
            harness.shutdown.cancel();
        });
        result
    }

    #[tokio::test(start_paused = true)]
    async fn asks_for_permission_on_first_start_only() -> Result<()> {
        let mut notifier = MockNotifier::new();
        let mut permission = NotificationPermission::Default;
        notifier
            .expect_permission()
            .returning(move || std::mem::replace(&mut permission, NotificationPermission::Denied));
        notifier
            .expect_request_permission()
            .times(1)
            .return_const(NotificationPermission::Denied);
        notifier.expect_notify().never();
        let (runner, mut harness) = runner(notifier);

        let (result, ()) = tokio::join!(runner.run(), async {
            harness.next().await;
            harness.commands.send(TimerCommand::Toggle).await.unwrap();
            harness.until_completed().await;
            harness.commands.send(TimerCommand::Toggle).await.unwrap();
            harness.until_completed().await;
            harness.shutdown.cancel();
        });
        result
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_commands_close() -> Result<()> {
        let (runner, harness) = runner(granted_notifier(0));
        let Harness {
            commands,
            mut events,
            ..
        } = harness;
        drop(commands);
        runner.run().await?;
        assert!(matches!(events.recv().await, Some(TimerEvent::Changed(_))));
        Ok(())
    }
}
