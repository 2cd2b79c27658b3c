//! The pomodoro timer. [state::PomodoroTimer] is the pure countdown, [runner::TimerRunner] drives
//! it once per second and reports through [processing::TimerEventProcessor] implementations such
//! as [recorder::SessionRecorder].

pub mod notifier;
pub mod processing;
pub mod recorder;
pub mod runner;
pub mod state;
