//! Two languages and a phrase table. Good enough for labels, not a translation framework.

use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    error::StorageError,
    storage::{keys::StorageKey, kv_store::KeyValueStore, load_json, save_json},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    /// Picks between an English and an Arabic literal.
    pub fn pick<'a>(self, en: &'a str, ar: &'a str) -> &'a str {
        match self {
            Language::En => en,
            Language::Ar => ar,
        }
    }

    pub fn t(self, phrase: Phrase) -> &'static str {
        let (en, ar) = phrase.texts();
        self.pick(en, ar)
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ar => write!(f, "ar"),
        }
    }
}

/// Language chosen by the user, or `fallback` when nothing was chosen yet.
pub async fn stored_language(
    store: &impl KeyValueStore,
    fallback: Language,
) -> Result<Language, StorageError> {
    Ok(load_json(store, &StorageKey::language())
        .await?
        .unwrap_or(fallback))
}

pub async fn store_language(
    store: &impl KeyValueStore,
    language: Language,
) -> Result<(), StorageError> {
    save_json(store, &StorageKey::language(), &language).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Greeting,
    Today,
    DailyVerse,
    WisdomQuote,
    Worship,
    Study,
    Tasks,
    Reading,
    PomodoroTimer,
    Focus,
    Break,
    Sessions,
    Success,
    Error,
    SignIn,
    SignUp,
    Email,
    Password,
    Save,
    CourseManagement,
    Prayers,
    QuickAccess,
}

impl Phrase {
    fn texts(self) -> (&'static str, &'static str) {
        match self {
            Phrase::Greeting => ("Peace be upon you", "السلام عليكم"),
            Phrase::Today => ("Today", "اليوم"),
            Phrase::DailyVerse => ("Verse of the day", "آية اليوم"),
            Phrase::WisdomQuote => ("Wisdom of the day", "حكمة اليوم"),
            Phrase::Worship => ("Worship", "العبادة"),
            Phrase::Study => ("Study", "الدراسة"),
            Phrase::Tasks => ("Tasks", "المهام"),
            Phrase::Reading => ("Reading", "القراءة"),
            Phrase::PomodoroTimer => ("Pomodoro timer", "مؤقت بومودورو"),
            Phrase::Focus => ("Focus", "تركيز"),
            Phrase::Break => ("Break", "استراحة"),
            Phrase::Sessions => ("Sessions", "الجلسات"),
            Phrase::Success => ("Success", "تم بنجاح"),
            Phrase::Error => ("Error", "خطأ"),
            Phrase::SignIn => ("Sign in", "تسجيل الدخول"),
            Phrase::SignUp => ("Sign up", "إنشاء حساب"),
            Phrase::Email => ("Email", "البريد الإلكتروني"),
            Phrase::Password => ("Password", "كلمة المرور"),
            Phrase::Save => ("Save", "حفظ"),
            Phrase::CourseManagement => ("Courses", "إدارة المواد"),
            Phrase::Prayers => ("Prayers", "الصلوات"),
            Phrase::QuickAccess => ("Quick Access", "الوصول السريع"),
        }
    }
}
