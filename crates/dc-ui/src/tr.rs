//! Translation handle passed into every template.

use std::sync::Arc;

use chrono::NaiveDate;
use dc_core::i18n::{self, Catalog, Language, Lookup};

/// A catalogue bound to one language.
#[derive(Debug, Clone)]
pub struct Tr {
    catalog: Arc<Catalog>,
    language: Language,
}

impl Tr {
    pub fn new(catalog: Arc<Catalog>, language: Language) -> Self {
        Self { catalog, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Text for `key`. Falls back to English, then to the key itself.
    pub fn t(&self, key: &str) -> String {
        match self.catalog.lookup(self.language, key) {
            Ok(Lookup::Found(text)) => text.to_string(),
            Ok(Lookup::Fallback(text)) => {
                tracing::debug!(language = %self.language, key, "Using English fallback");
                text.to_string()
            }
            Err(missing) => {
                tracing::warn!(language = %self.language, key = %missing.key, "Missing translation");
                missing.key
            }
        }
    }

    pub fn number(&self, n: u32) -> String {
        i18n::format_number(u64::from(n), self.language)
    }

    pub fn money(&self, dollars: u32) -> String {
        i18n::format_currency(dollars, self.language)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        i18n::format_date(date, self.language)
    }

    pub fn date_full(&self, date: NaiveDate) -> String {
        i18n::format_date_full(date, self.language)
    }

    pub fn day_short(&self, date: NaiveDate) -> String {
        i18n::format_day_short(date, self.language)
    }
}
