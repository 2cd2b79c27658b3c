use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;

/// Non-negative percentage. Used for timer progress and for reading progress typed on the
/// command line as `40` or `40%`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// Share of `whole` that `done` represents. A zero `whole` counts as complete.
    pub fn ratio(done: u32, whole: u32) -> Percentage {
        if whole == 0 {
            return Percentage(100.);
        }
        Percentage(f64::from(done.min(whole)) / f64::from(whole) * 100.)
    }

    /// Renders a fixed-width bar, `[#####.....]` for 50%.
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.0.min(100.) / 100.) * width as f64).round() as usize;
        format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
    }
}

impl FromStr for Percentage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // This means that 100%% also works, but I think I'm fine with that
        let s = s.trim_end_matches("%");
        let v = s.parse::<f64>()?;
        Percentage::new_opt(v).ok_or_else(|| anyhow!("Can't parse {s} into percentage"))
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
