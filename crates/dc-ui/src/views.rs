//! View models: display-ready values built from domain records.
//!
//! Templates only read strings and flags from these types; all formatting,
//! localisation and like arithmetic happens here.

use chrono::{Datelike, NaiveDate};
use dc_core::i18n::Language;
use dc_core::likes::LikedSet;
use dc_core::models::{BlogPost, ClinicInfo, Department, Doctor, Faq, GalleryItem, Service, Treatment};
use dc_core::query::{effective_sort, CategoryFilter, Listable, Query, SortKey};

use crate::tr::Tr;

/// Top-level site sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Treatments,
    Gallery,
    About,
    Blog,
    Contact,
    Booking,
}

impl Section {
    const NAV: [Section; 6] = [
        Section::Home,
        Section::Treatments,
        Section::Gallery,
        Section::About,
        Section::Blog,
        Section::Contact,
    ];

    pub fn href(self) -> &'static str {
        match self {
            Section::Home => "/",
            Section::Treatments => "/treatments",
            Section::Gallery => "/gallery",
            Section::About => "/about",
            Section::Blog => "/blog",
            Section::Contact => "/contact",
            Section::Booking => "/booking",
        }
    }

    fn label_key(self) -> &'static str {
        match self {
            Section::Home => "nav.home",
            Section::Treatments => "nav.treatments",
            Section::Gallery => "nav.gallery",
            Section::About => "nav.about",
            Section::Blog => "nav.blog",
            Section::Contact => "nav.contact",
            Section::Booking => "nav.book",
        }
    }
}

/// Per-request inputs shared by every page.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub tr: Tr,
    pub clinic: ClinicInfo,
    pub base_url: String,
    /// Path and query of the current request; the language switcher returns here.
    pub path: String,
    pub today: NaiveDate,
}

impl PageContext {
    pub fn layout(&self, section: Option<Section>, title: String, description: String) -> Layout {
        let tr = &self.tr;
        let site_title = tr.t("site.title");
        let title = if title.is_empty() { site_title.clone() } else { format!("{title} | {site_title}") };
        let description = if description.is_empty() { tr.t("site.tagline") } else { description };
        let canonical_path = self.path.split('?').next().unwrap_or("/");

        Layout {
            lang: tr.language().code(),
            dir: tr.language().direction(),
            title,
            description,
            canonical: format!("{}{}", self.base_url.trim_end_matches('/'), canonical_path),
            site_title,
            nav: Section::NAV
                .iter()
                .map(|s| NavLink {
                    href: s.href(),
                    label: tr.t(s.label_key()),
                    active: Some(*s) == section,
                })
                .collect(),
            book_label: tr.t(Section::Booking.label_key()),
            languages: Language::ALL
                .iter()
                .map(|l| LanguageOption {
                    code: l.code(),
                    name: l.native_name(),
                    selected: *l == tr.language(),
                })
                .collect(),
            return_to: self.path.clone(),
            phone: self.clinic.phone.clone(),
            phone_href: tel_href(&self.clinic.phone),
            email: self.clinic.email.clone(),
            address_line: format!(
                "{}, {}, {} {}",
                self.clinic.address.street,
                self.clinic.address.locality,
                self.clinic.address.region,
                self.clinic.address.postal_code
            ),
            opening_hours: self.clinic.opening_hours.clone(),
            json_ld: Vec::new(),
            year: self.today.year(),
        }
    }
}

fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    format!("tel:{digits}")
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: &'static str,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

/// Chrome shared by every page: `<head>`, header, footer.
#[derive(Debug, Clone)]
pub struct Layout {
    pub lang: &'static str,
    pub dir: &'static str,
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub site_title: String,
    pub nav: Vec<NavLink>,
    pub book_label: String,
    pub languages: Vec<LanguageOption>,
    pub return_to: String,
    pub phone: String,
    pub phone_href: String,
    pub email: String,
    pub address_line: String,
    pub opening_hours: Vec<String>,
    /// Pre-serialised JSON-LD documents, already safe for a `<script>` body.
    pub json_ld: Vec<String>,
    pub year: i32,
}

/// Query string reproducing a listing's filters, without the leading `?`.
/// Defaults are left out so an unfiltered listing yields an empty string.
pub fn listing_query<C: Copy>(query: &Query<C>, slug: fn(C) -> &'static str) -> String {
    let mut parts = Vec::new();
    if !query.term.trim().is_empty() {
        parts.push(format!("q={}", encode_component(query.term.trim())));
    }
    if let CategoryFilter::Only(c) = query.category {
        parts.push(format!("category={}", slug(c)));
    }
    if query.sort != SortKey::default() {
        parts.push(format!("sort={}", query.sort.slug()));
    }
    parts.join("&")
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// One `<option>` in a filter or sort `<select>`.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub(crate) fn category_options<C: Copy + PartialEq>(
    tr: &Tr,
    all_key: &str,
    prefix: &str,
    all: &[C],
    slug: fn(C) -> &'static str,
    query: &Query<C>,
) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: "all".into(),
        label: tr.t(all_key),
        selected: query.category.is_all(),
    }];
    options.extend(all.iter().map(|c| SelectOption {
        value: slug(*c).to_string(),
        label: tr.t(&format!("{prefix}.{}", slug(*c))),
        selected: !query.category.is_all() && query.category.admits(*c),
    }));
    options
}

/// Sort choices offered for `R`, marking the one actually in effect.
pub(crate) fn sort_options<R: Listable>(tr: &Tr, section: &str, requested: SortKey) -> Vec<SelectOption> {
    let active = effective_sort::<R>(requested);
    R::SORT_KEYS
        .iter()
        .map(|key| SelectOption {
            value: key.slug().to_string(),
            label: tr.t(&format!("{section}.sort.{}", key.slug())),
            selected: *key == active,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct PostCard {
    pub href: String,
    pub like_action: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub author_title: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub likes: String,
    pub comments: String,
    pub views: String,
    pub liked: bool,
}

impl PostCard {
    pub fn new(tr: &Tr, post: &BlogPost, liked: &LikedSet) -> Self {
        Self {
            href: format!("/blog/{}", post.id),
            like_action: format!("/blog/{}/like", post.id),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            author_title: post.author_title.clone(),
            date: tr.date(post.published_on),
            read_time: post.read_time.clone(),
            category: tr.t(&format!("categories.blog.{}", post.category.slug())),
            tags: post.tags.clone(),
            likes: tr.number(liked.displayed_likes(post)),
            comments: tr.number(post.comments),
            views: tr.number(post.views),
            liked: liked.contains(post.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryCard {
    pub href: String,
    pub like_action: String,
    pub treatment: String,
    pub patient: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: String,
    pub likes: String,
    pub views: String,
    pub liked: bool,
}

impl GalleryCard {
    /// `listing` is the gallery query string the card links back into.
    pub fn new(tr: &Tr, item: &GalleryItem, liked: &LikedSet, listing: &str) -> Self {
        let href = if listing.is_empty() {
            format!("/gallery?item={}", item.id)
        } else {
            format!("/gallery?{listing}&item={}", item.id)
        };
        Self {
            href,
            like_action: format!("/gallery/{}/like", item.id),
            treatment: item.treatment.clone(),
            patient: item.patient.clone(),
            description: item.description.clone(),
            category: tr.t(&format!("categories.gallery.{}", item.category.slug())),
            tags: item.tags.clone(),
            date: tr.date(item.taken_on),
            likes: tr.number(liked.displayed_likes(item)),
            views: tr.number(item.views),
            liked: liked.contains(item.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DoctorCard {
    pub id: String,
    pub name: String,
    pub title: String,
    pub specialty: String,
    pub experience: String,
    pub initials: String,
    pub rating: String,
    pub reviews: String,
    pub price: String,
    pub availability: String,
    pub selected: bool,
}

impl DoctorCard {
    pub fn new(tr: &Tr, doctor: &Doctor, selected: bool) -> Self {
        Self {
            id: doctor.id.to_string(),
            name: doctor.name.clone(),
            title: doctor.title.clone(),
            specialty: doctor.specialty.clone(),
            experience: doctor.experience.clone(),
            initials: doctor.initials(),
            rating: format!("{:.1}", doctor.rating),
            reviews: tr.number(doctor.reviews),
            price: tr.money(doctor.price),
            availability: doctor.availability.join(", "),
            selected,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: String,
    pub selected: bool,
}

impl ServiceCard {
    pub fn new(tr: &Tr, service: &Service, selected: bool) -> Self {
        Self {
            id: service.id.to_string(),
            name: service.name.clone(),
            description: service.description.clone(),
            duration: format!("{} {}", tr.number(service.duration_minutes), tr.t("booking.minutes")),
            price: tr.money(service.price),
            selected,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreatmentCard {
    pub href: String,
    pub name: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub starting_price: String,
}

impl TreatmentCard {
    pub fn new(tr: &Tr, treatment: &Treatment) -> Self {
        Self {
            href: format!("/treatments/{}", treatment.slug),
            name: treatment.name.clone(),
            description: treatment.description.clone(),
            highlights: treatment.highlights.clone(),
            starting_price: tr.money(treatment.starting_price),
        }
    }
}

/// A headline figure on the home and about pages.
#[derive(Debug, Clone)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

pub(crate) fn clinic_stats(tr: &Tr, treatments: usize) -> Vec<Stat> {
    let count = u32::try_from(treatments).unwrap_or(u32::MAX);
    vec![
        Stat { value: format!("{}+", tr.number(10_000)), label: tr.t("home.stats.patients") },
        Stat { value: format!("{}+", tr.number(15)), label: tr.t("home.stats.years") },
        Stat { value: tr.number(count), label: tr.t("home.stats.treatments") },
        Stat { value: format!("{}%", tr.number(98)), label: tr.t("home.stats.satisfaction") },
    ]
}

#[derive(Debug, Clone)]
pub struct DepartmentCard {
    pub name: String,
    pub description: String,
    pub email: String,
    pub phone: String,
}

impl From<&Department> for DepartmentCard {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            description: d.description.clone(),
            email: d.email.clone(),
            phone: d.phone.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl From<&Faq> for FaqEntry {
    fn from(f: &Faq) -> Self {
        Self { question: f.question.clone(), answer: f.answer.clone() }
    }
}
