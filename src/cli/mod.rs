pub mod dashboard;
pub mod output;
pub mod session;
pub mod study;
pub mod timer;
pub mod tracking;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use dashboard::process_dashboard_command;
use session::{process_session_command, SessionCommand};
use study::{process_course_command, process_metric_command, CourseCommand, MetricCommand};
use timer::{process_timer_command, TimerCommandArgs};
use tracing::{info, level_filters::LevelFilter};
use tracking::{
    process_prayer_command, process_reading_command, process_task_command, PrayerCommand,
    TaskCommand,
};

use crate::{
    auth::{current_user, User},
    config::Settings,
    i18n::{store_language, stored_language, Language},
    storage::kv_store::FileStore,
    tracking::ReadingProgress,
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Baraka", version, long_about = None)]
#[command(about = "Track prayers, study, tasks and reading, and focus with a pomodoro timer")]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print logs to stdout as well")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Log level, overrides RUST_LOG. One of off, error, warn, info, debug, trace"
    )]
    log_filter: Option<LevelFilter>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommand),
    #[command(about = "Show today's greeting, verse, wisdom and progress")]
    Dashboard,
    #[command(about = "Run a pomodoro timer in this terminal")]
    Timer {
        #[command(flatten)]
        args: TimerCommandArgs,
    },
    #[command(subcommand, about = "Manage study courses")]
    Course(CourseCommand),
    #[command(subcommand, about = "Show or record a course's daily metrics")]
    Metric(MetricCommand),
    #[command(about = "Mark one of today's prayers")]
    Prayer {
        #[command(flatten)]
        command: PrayerCommand,
    },
    #[command(subcommand, about = "Manage tasks")]
    Task(TaskCommand),
    #[command(about = "Record today's reading progress, for example 40%. Shows it when omitted")]
    Reading { progress: Option<ReadingProgress> },
    #[command(about = "Switch the interface language. Toggles between en and ar when omitted")]
    Language { language: Option<Language> },
}

/// What the user configured and the store every command reads from.
pub struct AppContext {
    pub settings: Settings,
    pub store: Arc<FileStore>,
    pub clock: Box<dyn Clock>,
    pub language: Language,
}

impl AppContext {
    pub async fn open(dir: &Path) -> Result<Self> {
        let settings = Settings::load(dir);
        let store_dir = dir.join("store");
        let store = Arc::new(
            FileStore::new(store_dir.clone())
                .with_context(|| format!("Failed to open store in {store_dir:?}"))?,
        );
        let language = stored_language(&store, settings.language).await?;
        Ok(Self {
            settings,
            store,
            clock: Box::new(DefaultClock),
            language,
        })
    }

    /// Signed in user, or an error telling how to sign in.
    pub async fn require_user(&self) -> Result<User> {
        current_user(&self.store).await?.ok_or_else(|| {
            anyhow!(
                "{}",
                self.language.pick(
                    "Not signed in. Run `baraka sign-in` first",
                    "لم يتم تسجيل الدخول. شغّل `baraka sign-in` أولاً",
                )
            )
        })
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let dir = match args.dir {
        Some(dir) => ensure_dir(dir)?,
        None => create_application_default_path()?,
    };
    let log_dir = ensure_dir(dir.join("logs"))?;
    enable_logging(CLI_PREFIX, &log_dir, args.log_filter, args.log)?;
    info!("Using application directory {dir:?}");

    let context = AppContext::open(&dir).await?;

    match args.commands {
        Commands::Session(command) => process_session_command(&context, command).await,
        Commands::Dashboard => process_dashboard_command(&context).await,
        Commands::Timer { args } => process_timer_command(&context, args).await,
        Commands::Course(command) => process_course_command(&context, command).await,
        Commands::Metric(command) => process_metric_command(&context, command).await,
        Commands::Prayer { command } => process_prayer_command(&context, command).await,
        Commands::Task(command) => process_task_command(&context, command).await,
        Commands::Reading { progress } => process_reading_command(&context, progress).await,
        Commands::Language { language } => {
            let language = language.unwrap_or_else(|| context.language.toggle());
            store_language(&context.store, language).await?;
            println!("{language}");
            Ok(())
        }
    }
}
