//! # Internationalisation
//!
//! String catalogues are nested JSON objects addressed by dotted keys
//! (`"booking.steps.provider.title"`). A lookup tells the caller whether the
//! text came from the requested language, from the English fallback, or was
//! not found at all.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const EN_JSON: &str = include_str!("../locales/en.json");
const FA_JSON: &str = include_str!("../locales/fa.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fa,
}

impl Language {
    pub const ALL: &'static [Language] = &[Language::En, Language::Fa];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fa => "fa",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fa => "فارسی",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Fa)
    }

    /// Value for the HTML `dir` attribute.
    pub fn direction(self) -> &'static str {
        if self.is_rtl() {
            "rtl"
        } else {
            "ltr"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language `{0}`")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Language::En),
            "fa" | "fa-ir" => Ok(Language::Fa),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A successful catalogue lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Text from the requested language.
    Found(&'a str),
    /// The requested language lacks the key; English text is returned.
    Fallback(&'a str),
}

/// No catalogue, English included, has a string at this key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no translation for `{key}`")]
pub struct MissingKey {
    pub key: String,
}

#[derive(Debug, Error)]
#[error("invalid {language} catalogue: {source}")]
pub struct CatalogError {
    pub language: Language,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    en: Value,
    fa: Value,
}

impl Catalog {
    /// The catalogues compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EN_JSON, FA_JSON)
    }

    pub fn from_json(en: &str, fa: &str) -> Result<Self, CatalogError> {
        let parse = |language: Language, raw: &str| {
            serde_json::from_str::<Value>(raw).map_err(|source| CatalogError { language, source })
        };
        Ok(Self {
            en: parse(Language::En, en)?,
            fa: parse(Language::Fa, fa)?,
        })
    }

    fn root(&self, language: Language) -> &Value {
        match language {
            Language::En => &self.en,
            Language::Fa => &self.fa,
        }
    }

    pub fn lookup(&self, language: Language, key: &str) -> Result<Lookup<'_>, MissingKey> {
        if let Some(text) = resolve(self.root(language), key) {
            return Ok(Lookup::Found(text));
        }
        if language != Language::En {
            if let Some(text) = resolve(&self.en, key) {
                return Ok(Lookup::Fallback(text));
            }
        }
        Err(MissingKey { key: key.to_string() })
    }
}

fn resolve<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(root, |node, part| node.get(part))?
        .as_str()
}

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

fn localize_digits(ascii: &str, language: Language) -> String {
    match language {
        Language::En => ascii.to_string(),
        Language::Fa => ascii
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => PERSIAN_DIGITS[d as usize],
                None => c,
            })
            .collect(),
    }
}

fn group_thousands(n: u64, separator: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// `1520` becomes `1,520` (en) or `۱٬۵۲۰` (fa).
pub fn format_number(n: u64, language: Language) -> String {
    let separator = match language {
        Language::En => ',',
        Language::Fa => '٬',
    };
    localize_digits(&group_thousands(n, separator), language)
}

/// Whole-dollar amounts in USD: `$350.00` (en) or `$۳۵۰٫۰۰` (fa).
pub fn format_currency(dollars: u32, language: Language) -> String {
    let decimal = match language {
        Language::En => '.',
        Language::Fa => '٫',
    };
    format!("${}{}{}", format_number(u64::from(dollars), language), decimal, localize_digits("00", language))
}

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October",
    "November", "December",
];

const FA_MONTHS: [&str; 12] = [
    "ژانویه", "فوریه", "مارس", "آوریل", "مه", "ژوئن", "ژوئیه", "اوت", "سپتامبر", "اکتبر", "نوامبر",
    "دسامبر",
];

fn fa_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Sat => "شنبه",
        Weekday::Sun => "یکشنبه",
        Weekday::Mon => "دوشنبه",
        Weekday::Tue => "سه‌شنبه",
        Weekday::Wed => "چهارشنبه",
        Weekday::Thu => "پنجشنبه",
        Weekday::Fri => "جمعه",
    }
}

/// Long date: `December 15, 2024` (en) or `۱۵ دسامبر ۲۰۲۴` (fa). Both use the Gregorian calendar.
pub fn format_date(date: NaiveDate, language: Language) -> String {
    let month = date.month0() as usize;
    match language {
        Language::En => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
        Language::Fa => localize_digits(&format!("{} {} {}", date.day(), FA_MONTHS[month], date.year()), language),
    }
}

/// Date with weekday, used on the booking review: `Friday, January 10, 2025`.
pub fn format_date_full(date: NaiveDate, language: Language) -> String {
    match language {
        Language::En => date.format("%A, %B %-d, %Y").to_string(),
        Language::Fa => format!("{}، {}", fa_weekday(date.weekday()), format_date(date, language)),
    }
}

/// Compact label for date pickers: `Fri, Jan 10`.
pub fn format_day_short(date: NaiveDate, language: Language) -> String {
    match language {
        Language::En => date.format("%a, %b %-d").to_string(),
        Language::Fa => localize_digits(
            &format!("{} {} {}", fa_weekday(date.weekday()), date.day(), FA_MONTHS[date.month0() as usize]),
            language,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: &str = r#"{"nav": {"home": "Home", "blog": "Blog"}, "site": {"title": "Clinic"}}"#;
    const FA: &str = r#"{"nav": {"home": "خانه"}}"#;

    #[test]
    fn lookup_reports_source_of_text() {
        let catalog = Catalog::from_json(EN, FA).unwrap();
        assert_eq!(catalog.lookup(Language::Fa, "nav.home"), Ok(Lookup::Found("خانه")));
        assert_eq!(catalog.lookup(Language::Fa, "nav.blog"), Ok(Lookup::Fallback("Blog")));
        assert_eq!(catalog.lookup(Language::En, "nav.blog"), Ok(Lookup::Found("Blog")));
    }

    #[test]
    fn missing_keys_are_errors_not_echoes() {
        let catalog = Catalog::from_json(EN, FA).unwrap();
        assert_eq!(
            catalog.lookup(Language::En, "nav.pricing"),
            Err(MissingKey { key: "nav.pricing".into() })
        );
        // A key naming an object rather than a string is missing too.
        assert!(catalog.lookup(Language::En, "nav").is_err());
    }

    #[test]
    fn embedded_catalogues_parse_and_cover_navigation() {
        let catalog = Catalog::embedded().unwrap();
        for key in ["nav.home", "nav.blog", "nav.gallery", "nav.contact", "booking.heading"] {
            assert!(matches!(catalog.lookup(Language::En, key), Ok(Lookup::Found(_))), "{key}");
            assert!(catalog.lookup(Language::Fa, key).is_ok(), "{key}");
        }
    }

    #[test]
    fn language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>(), Ok(*lang));
        }
        assert!(Language::Fa.is_rtl());
        assert_eq!(Language::En.direction(), "ltr");
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn numbers_and_currency_per_language() {
        assert_eq!(format_number(1520, Language::En), "1,520");
        assert_eq!(format_number(1520, Language::Fa), "۱٬۵۲۰");
        assert_eq!(format_number(312, Language::En), "312");
        assert_eq!(format_currency(350, Language::En), "$350.00");
        assert_eq!(format_currency(350, Language::Fa), "$۳۵۰٫۰۰");
    }

    #[test]
    fn dates_per_language() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        assert_eq!(format_date(date, Language::En), "December 15, 2024");
        assert_eq!(format_date(date, Language::Fa), "۱۵ دسامبر ۲۰۲۴");

        let friday = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(format_date_full(friday, Language::En), "Friday, January 10, 2025");
        assert_eq!(format_day_short(friday, Language::En), "Fri, Jan 10");
    }
}
