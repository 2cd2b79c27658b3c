use anyhow::Result;
use rand::thread_rng;

use crate::{
    dashboard::{
        content::resolve_daily_content, greeting, stats::DashboardStats, today_line, QUICK_ACCESS,
    },
    i18n::{Language, Phrase},
    utils::{percentage::Percentage, time::day_label},
};

use super::{
    output::{heading, progress_line},
    AppContext,
};

const DAILY_PRAYERS: u32 = 5;

pub async fn process_dashboard_command(context: &AppContext) -> Result<()> {
    let user = context.require_user().await?;
    let language = context.language;
    let today = context.clock.today();

    // Content rotates on the user's own calendar day, records are keyed by the UTC one.
    let content = resolve_daily_content(
        &context.store,
        &day_label(context.clock.local_day()),
        &mut thread_rng(),
    )
    .await?;
    let stats = DashboardStats::collect(&context.store, &user.id, today).await?;

    println!("{}", heading(&greeting(language, &user.full_name)));
    println!("{}", today_line(language, today));
    println!();
    println!("{}", heading(language.t(Phrase::DailyVerse)));
    println!("{}", content.verse_text(language));
    println!("{}", content.verse.reference);
    println!();
    println!("{}", heading(language.t(Phrase::WisdomQuote)));
    println!("{}", content.quote_text(language));
    println!();
    for line in stats_lines(language, &stats) {
        println!("{line}");
    }
    println!();
    println!("{}", heading(language.t(Phrase::QuickAccess)));
    for card in QUICK_ACCESS {
        println!("{}\t{}", language.t(card.title), card.command);
    }
    Ok(())
}

fn stats_lines(language: Language, stats: &DashboardStats) -> Vec<String> {
    let prayers = stats.prayers_completed as u32;
    let reading = Percentage::new_opt(stats.reading_progress.min(100.))
        .unwrap_or_else(|| Percentage::ratio(0, 1));
    vec![
        progress_line(
            language.t(Phrase::Prayers),
            &format!("{prayers}/{DAILY_PRAYERS}"),
            Percentage::ratio(prayers, DAILY_PRAYERS),
        ),
        format!(
            "{}\t{}",
            language.t(Phrase::Tasks),
            stats.tasks_completed
        ),
        format!(
            "{}\t{}",
            language.t(Phrase::Sessions),
            stats.pomodoro_sessions
        ),
        progress_line(language.t(Phrase::Reading), &reading.to_string(), reading),
    ]
}

#[cfg(test)]
mod tests {
    use super::stats_lines;
    use crate::{dashboard::stats::DashboardStats, i18n::Language};

    #[test]
    fn stats_show_fractions_and_bars() {
        let stats = DashboardStats {
            tasks_completed: 2,
            pomodoro_sessions: 3,
            prayers_completed: 5,
            reading_progress: 50.,
        };
        let lines = stats_lines(Language::En, &stats);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("5/5"));
        assert!(lines[0].ends_with("[####################]"));
        assert_eq!(lines[1], "Tasks\t2");
        assert_eq!(lines[2], "Sessions\t3");
        assert!(lines[3].contains("50%"));
        assert!(lines[3].ends_with("[##########..........]"));
    }
}
