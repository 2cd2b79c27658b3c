use anyhow::{anyhow, Result};
use clap::{Subcommand, ValueEnum};

use crate::{
    i18n::Phrase,
    storage::entities::{PrayerDay, Task},
    tracking::{
        add_task, complete_task, list_tasks, reading, set_prayer, set_reading, Prayer,
        ReadingProgress,
    },
    utils::percentage::Percentage,
};

use super::{
    output::{heading, progress_line, short_id},
    AppContext,
};

#[derive(Debug, clap::Args)]
pub struct PrayerCommand {
    prayer: Prayer,
    #[arg(long, help = "Mark the prayer as not done")]
    undo: bool,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    #[command(about = "Add a task")]
    Add { title: String },
    #[command(about = "Complete a task by id, the first characters are enough")]
    Done { id: String },
    #[command(about = "List tasks")]
    List,
}

pub async fn process_prayer_command(
    context: &AppContext,
    PrayerCommand { prayer, undo }: PrayerCommand,
) -> Result<()> {
    let user = context.require_user().await?;
    let day = set_prayer(
        &context.store,
        &user.id,
        context.clock.today(),
        prayer,
        !undo,
    )
    .await?;
    println!("{}", heading(context.language.t(Phrase::Prayers)));
    for line in prayer_lines(&day) {
        println!("{line}");
    }
    Ok(())
}

fn prayer_lines(day: &PrayerDay) -> Vec<String> {
    Prayer::value_variants()
        .iter()
        .map(|prayer| {
            let mark = if prayer.is_done(day) { "[x]" } else { "[ ]" };
            format!("{mark} {prayer}")
        })
        .collect()
}

pub async fn process_task_command(context: &AppContext, command: TaskCommand) -> Result<()> {
    let user = context.require_user().await?;
    let language = context.language;
    match command {
        TaskCommand::Add { title } => {
            if title.trim().is_empty() {
                return Err(anyhow!("Task title can't be empty"));
            }
            let task = add_task(&context.store, &user.id, &title, context.clock.time()).await?;
            println!("{}", task_line(&task));
        }
        TaskCommand::Done { id } => {
            let task = complete_task(&context.store, &user.id, &id)
                .await?
                .ok_or_else(|| anyhow!("No task matches \"{id}\""))?;
            println!("{}", task_line(&task));
        }
        TaskCommand::List => {
            println!("{}", heading(language.t(Phrase::Tasks)));
            for task in list_tasks(&context.store, &user.id).await? {
                println!("{}", task_line(&task));
            }
        }
    }
    Ok(())
}

fn task_line(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    format!("{mark} {}\t{}", short_id(&task.id), task.title)
}

pub async fn process_reading_command(
    context: &AppContext,
    progress: Option<ReadingProgress>,
) -> Result<()> {
    let user = context.require_user().await?;
    let today = context.clock.today();
    let progress = match progress {
        Some(progress) => {
            set_reading(&context.store, &user.id, today, progress).await?;
            progress.0
        }
        None => {
            let day = reading(&context.store, &user.id, today).await?;
            Percentage::new_opt(day.progress.min(100.))
                .ok_or_else(|| anyhow!("Stored reading progress {} is invalid", day.progress))?
        }
    };
    println!(
        "{}",
        progress_line(
            context.language.t(Phrase::Reading),
            &progress.to_string(),
            progress
        )
    );
    Ok(())
}
