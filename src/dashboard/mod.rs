//! Landing view: greeting, verse and wisdom of the day, today's stats and the quick access list.

pub mod content;
pub mod stats;

use chrono::NaiveDate;

use crate::{
    i18n::{Language, Phrase},
    utils::time::long_date,
};

/// Greeting line. Arabic doesn't take the comma.
pub fn greeting(language: Language, full_name: &str) -> String {
    let greeting = language.t(Phrase::Greeting);
    match language {
        Language::En => format!("{greeting}, {full_name}"),
        Language::Ar => format!("{greeting} {full_name}"),
    }
}

pub fn today_line(language: Language, today: NaiveDate) -> String {
    format!("{}: {}", language.t(Phrase::Today), long_date(today))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAccessCard {
    pub title: Phrase,
    /// Command that opens the area.
    pub command: &'static str,
}

pub const QUICK_ACCESS: [QuickAccessCard; 4] = [
    QuickAccessCard {
        title: Phrase::Worship,
        command: "baraka prayer",
    },
    QuickAccessCard {
        title: Phrase::Study,
        command: "baraka course list",
    },
    QuickAccessCard {
        title: Phrase::Tasks,
        command: "baraka task list",
    },
    QuickAccessCard {
        title: Phrase::Reading,
        command: "baraka reading",
    },
];
