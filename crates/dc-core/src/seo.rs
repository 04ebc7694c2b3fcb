//! Sitemap and schema.org structured data.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::models::{BlogPost, ClinicInfo, Doctor, Faq};

/// Public routes listed in `sitemap.xml`, relative to the site root.
pub const SITEMAP_ROUTES: &[&str] = &[
    "",
    "/about",
    "/treatments",
    "/treatments/dermatology",
    "/treatments/hair-restoration",
    "/treatments/laser",
    "/treatments/injectables",
    "/treatments/body-contouring",
    "/treatments/skincare",
    "/gallery",
    "/blog",
    "/contact",
    "/booking",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub priority: f32,
}

/// Home ranks 1.0, treatment detail pages 0.8, everything else 0.7.
fn priority(route: &str) -> f32 {
    if route.is_empty() {
        1.0
    } else if route.starts_with("/treatments/") {
        0.8
    } else {
        0.7
    }
}

pub fn sitemap_entries(base_url: &str, last_modified: NaiveDate) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    SITEMAP_ROUTES
        .iter()
        .map(|route| SitemapEntry {
            url: format!("{base}{route}"),
            last_modified,
            priority: priority(route),
        })
        .collect()
}

/// Renders the entries as a sitemaps.org `urlset`. Every page changes weekly.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing to a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.url),
            entry.last_modified.format("%Y-%m-%d"),
            entry.priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// JSON-LD describing the practice as a `MedicalClinic`.
pub fn clinic_json_ld(clinic: &ClinicInfo, site_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": ["MedicalClinic", "LocalBusiness"],
        "name": clinic.name,
        "description": clinic.description,
        "url": site_url,
        "telephone": clinic.phone,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": clinic.address.street,
            "addressLocality": clinic.address.locality,
            "addressRegion": clinic.address.region,
            "postalCode": clinic.address.postal_code,
            "addressCountry": clinic.address.country,
        },
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": clinic.latitude,
            "longitude": clinic.longitude,
        },
        "openingHours": clinic.opening_hours,
        "priceRange": clinic.price_range,
        "currenciesAccepted": ["USD"],
    })
}

/// JSON-LD for one provider.
pub fn physician_json_ld(doctor: &Doctor, clinic: &ClinicInfo) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Physician",
        "name": doctor.name,
        "jobTitle": doctor.title,
        "medicalSpecialty": doctor.specialty,
        "telephone": clinic.phone,
        "worksFor": clinic.name,
    })
}

/// JSON-LD for a blog article page.
pub fn blog_posting_json_ld(post: &BlogPost, clinic: &ClinicInfo, url: &str) -> Value {
    let published = post.published_on.format("%Y-%m-%d").to_string();
    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.excerpt,
        "author": { "@type": "Person", "name": post.author },
        "datePublished": published,
        "dateModified": published,
        "url": url,
        "keywords": post.tags.join(", "),
        "publisher": { "@type": "Organization", "name": clinic.name },
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
    })
}

pub fn faq_json_ld(faqs: &[Faq]) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": faqs
            .iter()
            .map(|faq| json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer },
            }))
            .collect::<Vec<_>>(),
    })
}

/// Serialises JSON-LD for embedding in a `<script>` element.
/// `</` is escaped so the payload cannot close the element early.
pub fn script_payload(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
