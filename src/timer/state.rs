use crate::utils::{percentage::Percentage, time::format_countdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    Break,
}

/// Lengths of both phases in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub focus: u32,
    pub rest: u32,
}

impl TimerDurations {
    /// Phases are at least a minute long.
    pub fn from_minutes(focus: u32, rest: u32) -> Self {
        Self {
            focus: focus.max(1).saturating_mul(60),
            rest: rest.max(1).saturating_mul(60),
        }
    }

    pub fn of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus,
            Phase::Break => self.rest,
        }
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self::from_minutes(25, 5)
    }
}

/// Produced when a phase runs out. `finished` is the phase that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompletion {
    pub finished: Phase,
    pub sessions: u32,
}

impl PhaseCompletion {
    pub fn notification(&self) -> Notification {
        match self.finished {
            Phase::Focus => Notification {
                title: "Session Complete!",
                body: "Time for a break!",
            },
            Phase::Break => Notification {
                title: "Break Complete!",
                body: "Time to get back to work!",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub time_left: u32,
    pub running: bool,
    pub sessions: u32,
    pub total: u32,
}

impl TimerSnapshot {
    pub fn progress(&self) -> Percentage {
        Percentage::ratio(self.total - self.time_left.min(self.total), self.total)
    }

    pub fn display(&self) -> String {
        format_countdown(self.time_left)
    }
}

/// Two phase countdown. Each phase stops the timer when it runs out, the next one has to be
/// started again.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    durations: TimerDurations,
    phase: Phase,
    time_left: u32,
    running: bool,
    sessions: u32,
}

impl PomodoroTimer {
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            phase: Phase::Focus,
            time_left: durations.focus,
            running: false,
            sessions: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or pauses. Returns whether the timer is running afterwards.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if !self.running || self.time_left == 0 {
            return None;
        }
        self.time_left -= 1;
        if self.time_left == 0 {
            Some(self.complete())
        } else {
            None
        }
    }

    fn complete(&mut self) -> PhaseCompletion {
        let finished = self.phase;
        self.phase = match finished {
            Phase::Focus => {
                self.sessions += 1;
                Phase::Break
            }
            Phase::Break => Phase::Focus,
        };
        self.time_left = self.durations.of(self.phase);
        self.running = false;
        PhaseCompletion {
            finished,
            sessions: self.sessions,
        }
    }

    /// Back to a stopped focus phase. The session count survives.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Focus;
        self.time_left = self.durations.focus;
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            time_left: self.time_left,
            running: self.running,
            sessions: self.sessions,
            total: self.durations.of(self.phase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, PhaseCompletion, PomodoroTimer, TimerDurations};

    const DURATIONS: TimerDurations = TimerDurations { focus: 4, rest: 2 };

    fn run_for(timer: &mut PomodoroTimer, seconds: u32) -> Vec<PhaseCompletion> {
        (0..seconds).filter_map(|_| timer.tick()).collect()
    }

    #[test]
    fn durations_are_at_least_a_minute() {
        let durations = TimerDurations::from_minutes(0, 2);
        assert_eq!(durations.of(Phase::Focus), 60);
        assert_eq!(durations.of(Phase::Break), 120);
    }

    #[test]
    fn starts_stopped_in_focus() {
        let timer = PomodoroTimer::new(TimerDurations::default());
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.phase, Phase::Focus);
        assert_eq!(snapshot.time_left, 25 * 60);
        assert!(!snapshot.running);
        assert_eq!(snapshot.display(), "25:00");
    }

    #[test]
    fn does_not_count_down_while_stopped() {
        let mut timer = PomodoroTimer::new(DURATIONS);
        assert!(run_for(&mut timer, 10).is_empty());
        assert_eq!(timer.snapshot().time_left, 4);
    }

    #[test]
    fn focus_elapsing_moves_to_break_and_counts_session() {
        let mut timer = PomodoroTimer::new(DURATIONS);
        assert!(timer.toggle());

        let completions = run_for(&mut timer, 4);

        assert_eq!(
            completions,
            vec![PhaseCompletion {
                finished: Phase::Focus,
                sessions: 1
            }]
        );
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.time_left, 2);
        assert!(!snapshot.running);
        assert_eq!(snapshot.sessions, 1);
    }

    #[test]
    fn break_elapsing_returns_to_focus_without_counting() {
        let mut timer = PomodoroTimer::new(DURATIONS);
        timer.toggle();
        run_for(&mut timer, 4);
        timer.toggle();

        let completions = run_for(&mut timer, 2);

        assert_eq!(completions[0].finished, Phase::Break);
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.phase, Phase::Focus);
        assert_eq!(snapshot.time_left, 4);
        assert!(!snapshot.running);
        assert_eq!(snapshot.sessions, 1);
    }

    #[test]
    fn reset_returns_to_stopped_focus_from_anywhere() {
        let mut timer = PomodoroTimer::new(DURATIONS);
        timer.toggle();
        run_for(&mut timer, 2);
        timer.reset();
        assert_eq!(timer.snapshot().phase, Phase::Focus);
        assert_eq!(timer.snapshot().time_left, 4);
        assert!(!timer.is_running());

        timer.toggle();
        run_for(&mut timer, 4);
        timer.toggle();
        run_for(&mut timer, 1);
        timer.reset();
        let snapshot = timer.snapshot();
        assert_eq!((snapshot.phase, snapshot.time_left, snapshot.running), (Phase::Focus, 4, false));
        assert_eq!(snapshot.sessions, 1);
    }

    #[test]
    fn pausing_keeps_remaining_time() {
        let mut timer = PomodoroTimer::new(DURATIONS);
        timer.toggle();
        run_for(&mut timer, 1);
        assert!(!timer.toggle());
        run_for(&mut timer, 3);
        assert_eq!(timer.snapshot().time_left, 3);
    }

    #[test]
    fn progress_tracks_current_phase() {
        let mut timer = PomodoroTimer::new(DURATIONS);
        timer.toggle();
        run_for(&mut timer, 1);
        assert_eq!(*timer.snapshot().progress(), 25.);
        run_for(&mut timer, 3);
        assert_eq!(*timer.snapshot().progress(), 0.);
    }

    #[test]
    fn notification_text_follows_finished_phase() {
        let focus = PhaseCompletion {
            finished: Phase::Focus,
            sessions: 1,
        };
        assert_eq!(focus.notification().title, "Session Complete!");
        assert_eq!(focus.notification().body, "Time for a break!");
        let rest = PhaseCompletion {
            finished: Phase::Break,
            sessions: 1,
        };
        assert_eq!(rest.notification().title, "Break Complete!");
    }
}
