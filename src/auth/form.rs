use tracing::{info, warn};

use crate::{
    i18n::{Language, Phrase},
    storage::kv_store::KeyValueStore,
    toast::Toast,
};

use super::{start_session, AuthProvider, User};

const FALLBACK_ERROR: &str = "An error occurred";

/// Where the user should land after submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    SignIn,
}

#[derive(Debug)]
pub struct SignInOutcome {
    pub toast: Toast,
    pub route: Route,
    pub user: Option<User>,
}

/// State of the sign-in form.
#[derive(Debug, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    loading: bool,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submit_label(&self, language: Language) -> &'static str {
        if self.loading {
            language.pick("Signing in...", "جارٍ تسجيل الدخول...")
        } else {
            language.t(Phrase::SignIn)
        }
    }

    /// Signs in through `provider`. Failures never escape: they become a destructive toast and
    /// the user stays on the sign-in page. On success the session is stored in `store`.
    pub async fn submit(
        &mut self,
        provider: &dyn AuthProvider,
        store: &impl KeyValueStore,
        language: Language,
    ) -> SignInOutcome {
        self.loading = true;
        let result = provider.sign_in(&self.email, &self.password).await;
        let outcome = match result {
            Ok(user) => match start_session(store, &user).await {
                Ok(()) => {
                    info!("Signed in {}", user.id);
                    SignInOutcome {
                        toast: Toast::new(
                            language.t(Phrase::Success),
                            language.pick("Signed in successfully", "تم تسجيل الدخول بنجاح"),
                        ),
                        route: Route::Dashboard,
                        user: Some(user),
                    }
                }
                Err(e) => Self::failure(language, e.to_string()),
            },
            Err(e) => Self::failure(language, e.to_string()),
        };
        self.loading = false;
        outcome
    }

    fn failure(language: Language, message: String) -> SignInOutcome {
        warn!("Sign in failed: {message:?}");
        let description = if message.is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        };
        SignInOutcome {
            toast: Toast::destructive(language.t(Phrase::Error), description),
            route: Route::SignIn,
            user: None,
        }
    }
}
