use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use clap::Subcommand;
use tracing::info;

use crate::{
    auth::{
        current_user, end_session,
        form::{Route, SignInForm},
        local::LocalAuthProvider,
        start_session, AuthProvider,
    },
    i18n::{Language, Phrase},
    toast::Toast,
};

use super::{output::print_toast, AppContext};

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    #[command(about = "Sign in to an existing profile")]
    SignIn {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    #[command(about = "Create a profile and sign in")]
    SignUp {
        #[arg(long, help = "Full name shown in the greeting")]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    #[command(about = "End the current session")]
    SignOut,
    #[command(about = "Show who is signed in")]
    Whoami,
}

pub async fn process_session_command(context: &AppContext, command: SessionCommand) -> Result<()> {
    let language = context.language;
    match command {
        SessionCommand::SignIn { email, password } => {
            let email = value_or_prompt(email, language.t(Phrase::Email))?;
            let password = value_or_prompt(password, language.t(Phrase::Password))?;

            let provider = LocalAuthProvider::new(context.store.clone());
            let mut form = SignInForm::new(email, password);
            let outcome = form.submit(&provider, &context.store, language).await;
            print_toast(&outcome.toast);
            match outcome.route {
                Route::Dashboard => Ok(()),
                // The toast already carries the reason.
                Route::SignIn => Err(anyhow!("{}", sign_in_failed(language))),
            }
        }
        SessionCommand::SignUp {
            name,
            email,
            password,
        } => {
            let email = value_or_prompt(email, language.t(Phrase::Email))?;
            let password = value_or_prompt(password, language.t(Phrase::Password))?;

            let provider = LocalAuthProvider::new(context.store.clone());
            let user = provider.sign_up(&email, &password, &name).await?;
            start_session(&context.store, &user).await?;
            print_toast(&Toast::new(
                language.t(Phrase::Success),
                language.pick("Account created", "تم إنشاء الحساب"),
            ));
            Ok(())
        }
        SessionCommand::SignOut => {
            end_session(&context.store).await?;
            info!("Signed out");
            println!("{}", language.pick("Signed out", "تم تسجيل الخروج"));
            Ok(())
        }
        SessionCommand::Whoami => {
            match current_user(&context.store).await? {
                Some(user) => println!("{}\t{}", user.full_name, user.email),
                None => println!("{}", language.pick("Not signed in", "لم يتم تسجيل الدخول")),
            }
            Ok(())
        }
    }
}

fn sign_in_failed(language: Language) -> &'static str {
    language.pick("Sign in failed", "فشل تسجيل الدخول")
}

/// Reads a missing value from stdin. Empty input is passed on, validation reports it.
fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
