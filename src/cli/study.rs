use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::{
    error::StudyError,
    i18n::Phrase,
    storage::entities::DailyMetric,
    study::{CourseBook, MetricSheet, DEFAULT_COURSE_COLOR},
    toast::Toast,
};

use super::{
    output::{course_line, heading, print_toast},
    AppContext,
};

#[derive(Subcommand, Debug)]
pub enum CourseCommand {
    #[command(about = "Add a course")]
    Add {
        name: String,
        #[arg(long, default_value = DEFAULT_COURSE_COLOR, help = "Color as #rrggbb")]
        color: String,
    },
    #[command(about = "List courses")]
    List,
    #[command(about = "Delete a course by name or id. Its metrics are kept")]
    Delete { course: String },
}

#[derive(Subcommand, Debug)]
pub enum MetricCommand {
    #[command(about = "Show the five metrics of a course")]
    Show {
        course: String,
        #[arg(long, help = "Day as YYYY-MM-DD, today by default")]
        date: Option<NaiveDate>,
    },
    #[command(about = "Set one of today's metrics of a course")]
    Set {
        course: String,
        #[arg(help = "Metric number, 1 to 5")]
        index: usize,
        value: f64,
    },
}

pub async fn process_course_command(context: &AppContext, command: CourseCommand) -> Result<()> {
    let user = context.require_user().await?;
    let language = context.language;
    let mut book = CourseBook::load(context.store.clone(), &user.id).await?;

    match command {
        CourseCommand::Add { name, color } => {
            let course = book.add(&name, &color, context.clock.time()).await?;
            println!("{}", course_line(course));
            print_toast(&Toast::new(
                language.pick("Added", "تم الإضافة"),
                language.pick("Course added successfully", "تم إضافة المادة بنجاح"),
            ));
        }
        CourseCommand::List => {
            println!("{}", heading(language.t(Phrase::CourseManagement)));
            for course in book.courses() {
                println!("{}", course_line(course));
            }
        }
        CourseCommand::Delete { course } => {
            let id = book
                .find(&course)
                .map(|c| c.id.clone())
                .ok_or(StudyError::UnknownCourse { query: course })?;
            book.delete(&id).await?;
            print_toast(&Toast::new(
                language.pick("Deleted", "تم الحذف"),
                language.pick("Course deleted", "تم حذف المادة"),
            ));
        }
    }
    Ok(())
}

pub async fn process_metric_command(context: &AppContext, command: MetricCommand) -> Result<()> {
    let user = context.require_user().await?;
    let mut book = CourseBook::load(context.store.clone(), &user.id).await?;

    match command {
        MetricCommand::Show { course, date } => {
            let course = book.select(&course)?;
            let date = date.unwrap_or_else(|| context.clock.today());
            let sheet = MetricSheet::load(context.store.clone(), &user.id, &course.id, date).await?;
            println!("{}", course_line(course));
            print_metrics(sheet.record());
        }
        MetricCommand::Set {
            course,
            index,
            value,
        } => {
            let course = book.select(&course)?;
            let mut sheet =
                MetricSheet::load(context.store.clone(), &user.id, &course.id, context.clock.today())
                    .await?;
            let record = sheet.update(index, value).await?;
            print_metrics(record);
        }
    }
    Ok(())
}

fn print_metrics(record: &DailyMetric) {
    println!("{}", record.date);
    for (i, value) in record.values().iter().enumerate() {
        println!("{}\t{value}", i + 1);
    }
}
