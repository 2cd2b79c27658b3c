use rand::{seq::SliceRandom, Rng};
use tracing::info;

use crate::{
    error::StorageError,
    i18n::Language,
    storage::{
        entities::{Verse, WisdomQuote},
        keys::StorageKey,
        kv_store::KeyValueStore,
        load_json, save_json,
    },
};

const QURANIC_VERSES: [(&str, &str, &str); 5] = [
    ("إِنَّ مَعَ الْعُسْرِ يُسْرًا", "Indeed, with hardship comes ease", "Quran 94:6"),
    ("فَاذْكُرُونِي أَذْكُرْكُمْ", "Remember Me; I will remember you", "Quran 2:152"),
    ("وَهُوَ مَعَكُمْ أَيْنَ مَا كُنتُمْ", "And He is with you wherever you are", "Quran 57:4"),
    (
        "إِنَّ اللَّهَ لَا يُضِيعُ أَجْرَ الْمُحْسِنِينَ",
        "Indeed, Allah does not waste the reward of those who do good",
        "Quran 9:120",
    ),
    (
        "وَمَن يَتَّقِ اللَّهَ يَجْعَل لَّهُ مَخْرَجًا",
        "Whoever fears Allah, He will make a way out for him",
        "Quran 65:2",
    ),
];

const WISDOM_QUOTES: [(&str, &str); 5] = [
    ("العلم نور", "Knowledge is light"),
    ("الصبر مفتاح الفرج", "Patience is the key to relief"),
    ("من جد وجد", "Whoever strives shall succeed"),
    ("خير الناس أنفعهم للناس", "The best of people are those most beneficial to others"),
    ("اطلبوا العلم من المهد إلى اللحد", "Seek knowledge from the cradle to the grave"),
];

fn verse(&(ar, en, reference): &(&str, &str, &str)) -> Verse {
    Verse {
        ar: ar.into(),
        en: en.into(),
        reference: reference.into(),
    }
}

fn quote(&(ar, en): &(&str, &str)) -> WisdomQuote {
    WisdomQuote {
        ar: ar.into(),
        en: en.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyContent {
    pub verse: Verse,
    pub quote: WisdomQuote,
}

impl DailyContent {
    pub fn verse_text(&self, language: Language) -> &str {
        language.pick(&self.verse.en, &self.verse.ar)
    }

    pub fn quote_text(&self, language: Language) -> &str {
        language.pick(&self.quote.en, &self.quote.ar)
    }
}

/// Returns the verse and quote of the day. The first call on a new `day_label` draws both at
/// random and stores them, later calls on the same day read them back.
pub async fn resolve_daily_content(
    store: &impl KeyValueStore,
    day_label: &str,
    rng: &mut impl Rng,
) -> Result<DailyContent, StorageError> {
    // The day label is kept as a bare string, not as JSON.
    let stored_day = store.get(&StorageKey::daily_content_date()).await?;

    if stored_day.as_deref() != Some(day_label) {
        let content = DailyContent {
            verse: verse(QURANIC_VERSES.choose(rng).unwrap_or(&QURANIC_VERSES[0])),
            quote: quote(WISDOM_QUOTES.choose(rng).unwrap_or(&WISDOM_QUOTES[0])),
        };
        info!("Drawing new daily content for {day_label}");
        store
            .set(&StorageKey::daily_content_date(), day_label.to_string())
            .await?;
        save_json(store, &StorageKey::daily_verse(), &content.verse).await?;
        save_json(store, &StorageKey::wisdom_quote(), &content.quote).await?;
        return Ok(content);
    }

    Ok(DailyContent {
        verse: load_json(store, &StorageKey::daily_verse())
            .await?
            .unwrap_or_else(|| verse(&QURANIC_VERSES[0])),
        quote: load_json(store, &StorageKey::wisdom_quote())
            .await?
            .unwrap_or_else(|| quote(&WISDOM_QUOTES[0])),
    })
}
