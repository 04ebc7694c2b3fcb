//! # Domain Models
//!
//! These structs represent the content and form data of the clinic site.
//! Content records are immutable once loaded; ids are small integers
//! assigned by the content source.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque identity of a content record (blog post, gallery item, doctor, service).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

/// Defines a fixed category set with a URL slug and a display label per variant.
/// Parsing accepts either form, case-insensitively.
macro_rules! category_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $slug:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The value used in query strings.
            pub fn slug(self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }

            /// Human-readable label (English; templates localise through the catalogue).
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.slug().eq_ignore_ascii_case(wanted) || c.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownCategory(wanted.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// Returned when a category string matches none of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

category_enum! {
    /// Topic of a blog article.
    BlogCategory {
        AntiAging => "anti-aging", "Anti-Aging";
        HairRestoration => "hair-restoration", "Hair Restoration";
        AcneTreatment => "acne-treatment", "Acne Treatment";
        LaserTreatments => "laser-treatments", "Laser Treatments";
        Injectables => "injectables", "Injectables";
        BodyContouring => "body-contouring", "Body Contouring";
        Skincare => "skincare", "Skincare";
    }
}

category_enum! {
    /// Treatment family a before/after case belongs to.
    GalleryCategory {
        Acne => "acne", "Acne Treatment";
        Hair => "hair", "Hair Restoration";
        Laser => "laser", "Laser Treatments";
        Injectables => "injectables", "Injectables";
        Body => "body", "Body Contouring";
        Skincare => "skincare", "Skincare";
    }
}

/// A published article in the knowledge centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: RecordId,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub author_title: String,
    pub published_on: NaiveDate,
    /// Display string, e.g. "8 min read"
    pub read_time: String,
    pub category: BlogCategory,
    pub tags: Vec<String>,
    /// Featured posts get their own section on the unfiltered listing.
    pub featured: bool,
    pub likes: u32,
    pub comments: u32,
    pub views: u32,
    /// Article body, one entry per paragraph.
    pub body: Vec<String>,
}

/// A before/after case in the results gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: RecordId,
    pub category: GalleryCategory,
    pub treatment: String,
    /// Anonymised patient descriptor, e.g. "Female, 28"
    pub patient: String,
    pub description: String,
    pub tags: Vec<String>,
    pub likes: u32,
    pub views: u32,
    pub taken_on: NaiveDate,
}

/// A bookable provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: RecordId,
    pub name: String,
    pub title: String,
    pub specialty: String,
    pub experience: String,
    pub rating: f32,
    pub reviews: u32,
    /// Consultation fee in whole US dollars.
    pub price: u32,
    pub availability: Vec<String>,
}

impl Doctor {
    /// Initials shown in the avatar placeholder ("Dr. Sarah Johnson" -> "DSJ").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// A bookable consultation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: RecordId,
    pub category: String,
    pub name: String,
    pub duration_minutes: u32,
    /// Fee in whole US dollars.
    pub price: u32,
    pub description: String,
}

/// A treatment family shown on the treatments overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub starting_price: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

/// Practice-wide contact details, used by the footer, contact page and JSON-LD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicInfo {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
    pub address: PostalAddress,
    pub latitude: String,
    pub longitude: String,
    pub opening_hours: Vec<String>,
    pub price_range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A validated message from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_slug_and_label() {
        assert_eq!("hair".parse::<GalleryCategory>(), Ok(GalleryCategory::Hair));
        assert_eq!("Acne Treatment".parse::<BlogCategory>(), Ok(BlogCategory::AcneTreatment));
        assert_eq!("anti-aging".parse::<BlogCategory>(), Ok(BlogCategory::AntiAging));
        assert!("podiatry".parse::<BlogCategory>().is_err());
    }

    #[test]
    fn doctor_initials() {
        let doctor = Doctor {
            id: RecordId(1),
            name: "Dr. Sarah Johnson".into(),
            title: String::new(),
            specialty: String::new(),
            experience: String::new(),
            rating: 4.9,
            reviews: 0,
            price: 0,
            availability: vec![],
        };
        assert_eq!(doctor.initials(), "DSJ");
    }
}
