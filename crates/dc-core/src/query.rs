//! # List queries
//!
//! Search, category filter and ordering shared by the blog and gallery
//! listings. [`evaluate`] is a pure function of its inputs: the listings call
//! it on every request with the query taken from the URL.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BlogCategory, BlogPost, GalleryCategory, GalleryItem, RecordId};

/// Ordering applied after filtering. Every key sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Recent,
    /// Most liked first.
    Popular,
    /// Most viewed first.
    Views,
    /// Most commented first.
    Discussion,
}

impl SortKey {
    /// Parses a query-string value. Unknown values fall back to [`SortKey::Recent`].
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "popular" | "likes" => SortKey::Popular,
            "views" => SortKey::Views,
            "comments" | "discussion" => SortKey::Discussion,
            _ => SortKey::Recent,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Popular => "popular",
            SortKey::Views => "views",
            SortKey::Discussion => "comments",
        }
    }
}

/// `all`, or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<C> {
    All,
    Only(C),
}

impl<C> Default for CategoryFilter<C> {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl<C: Copy + PartialEq> CategoryFilter<C> {
    pub fn admits(&self, category: C) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl<C: FromStr> CategoryFilter<C> {
    /// Parses a query-string value; `all`, empty and unknown values mean no filter.
    pub fn parse_or_all(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return CategoryFilter::All;
        }
        raw.parse().map(CategoryFilter::Only).unwrap_or(CategoryFilter::All)
    }
}

/// The user's search, filter and sort choices for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<C> {
    pub term: String,
    pub category: CategoryFilter<C>,
    pub sort: SortKey,
}

impl<C> Default for Query<C> {
    fn default() -> Self {
        Self {
            term: String::new(),
            category: CategoryFilter::All,
            sort: SortKey::Recent,
        }
    }
}

impl<C: FromStr> Query<C> {
    /// Builds a query from raw query-string values. Missing or malformed
    /// parts take their defaults rather than failing.
    pub fn from_params(term: Option<&str>, category: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            term: term.unwrap_or_default().to_string(),
            category: category.map(CategoryFilter::parse_or_all).unwrap_or_default(),
            sort: sort.map(SortKey::parse_or_default).unwrap_or_default(),
        }
    }
}

impl<C> Query<C> {
    /// True when the query neither searches nor filters.
    pub fn is_unfiltered(&self) -> bool {
        self.term.trim().is_empty() && matches!(self.category, CategoryFilter::All)
    }
}

/// A record the listing engine can search and order.
pub trait Listable {
    type Category: Copy + PartialEq;

    /// Sort keys this kind of record offers; others fall back to recency.
    const SORT_KEYS: &'static [SortKey];

    fn id(&self) -> RecordId;
    fn category(&self) -> Self::Category;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn tags(&self) -> &[String];
    fn created_on(&self) -> NaiveDate;
    fn likes(&self) -> u32;
    fn views(&self) -> u32;
    fn comments(&self) -> Option<u32> {
        None
    }
}

impl Listable for BlogPost {
    type Category = BlogCategory;

    const SORT_KEYS: &'static [SortKey] =
        &[SortKey::Recent, SortKey::Popular, SortKey::Views, SortKey::Discussion];

    fn id(&self) -> RecordId {
        self.id
    }
    fn category(&self) -> BlogCategory {
        self.category
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.excerpt
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn created_on(&self) -> NaiveDate {
        self.published_on
    }
    fn likes(&self) -> u32 {
        self.likes
    }
    fn views(&self) -> u32 {
        self.views
    }
    fn comments(&self) -> Option<u32> {
        Some(self.comments)
    }
}

impl Listable for GalleryItem {
    type Category = GalleryCategory;

    const SORT_KEYS: &'static [SortKey] = &[SortKey::Recent, SortKey::Popular, SortKey::Views];

    fn id(&self) -> RecordId {
        self.id
    }
    fn category(&self) -> GalleryCategory {
        self.category
    }
    fn title(&self) -> &str {
        &self.treatment
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn created_on(&self) -> NaiveDate {
        self.taken_on
    }
    fn likes(&self) -> u32 {
        self.likes
    }
    fn views(&self) -> u32 {
        self.views
    }
}

/// The sort key actually applied to `R`: requested keys the record kind
/// does not offer degrade to recency.
pub fn effective_sort<R: Listable>(requested: SortKey) -> SortKey {
    if R::SORT_KEYS.contains(&requested) {
        requested
    } else {
        SortKey::Recent
    }
}

/// Filters `records` by `query` and orders the survivors.
///
/// Matching is plain case-insensitive containment against the title, the
/// description and each tag. Ordering is stable, so records with equal keys
/// keep their input order.
pub fn evaluate<'a, R: Listable>(records: &'a [R], query: &Query<R::Category>) -> Vec<&'a R> {
    let needle = query.term.trim().to_lowercase();

    let mut hits: Vec<&R> = records
        .iter()
        .filter(|r| query.category.admits(r.category()))
        .filter(|r| needle.is_empty() || matches_term(*r, &needle))
        .collect();

    let sort = effective_sort::<R>(query.sort);
    hits.sort_by(|a, b| compare(*a, *b, sort));
    hits
}

fn matches_term<R: Listable>(record: &R, needle: &str) -> bool {
    record.title().to_lowercase().contains(needle)
        || record.description().to_lowercase().contains(needle)
        || record.tags().iter().any(|tag| tag.to_lowercase().contains(needle))
}

fn compare<R: Listable>(a: &R, b: &R, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Recent => b.created_on().cmp(&a.created_on()),
        SortKey::Popular => b.likes().cmp(&a.likes()),
        SortKey::Views => b.views().cmp(&a.views()),
        SortKey::Discussion => b.comments().unwrap_or(0).cmp(&a.comments().unwrap_or(0)),
    }
}

/// Up to `limit` other posts ranked by shared tags, a shared category
/// counting as one extra tag. Posts sharing nothing are left out.
pub fn related_posts<'a>(posts: &'a [BlogPost], post: &BlogPost, limit: usize) -> Vec<&'a BlogPost> {
    let mut scored: Vec<(usize, &BlogPost)> = posts
        .iter()
        .filter(|candidate| candidate.id != post.id)
        .map(|candidate| {
            let shared = candidate
                .tags
                .iter()
                .filter(|tag| post.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
                .count();
            let same_category = usize::from(candidate.category == post.category);
            (shared + same_category, candidate)
        })
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, p)| p).collect()
}
