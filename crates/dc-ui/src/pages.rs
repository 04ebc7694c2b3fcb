//! One askama template per page, with the builders that fill them.

use askama::Template;
use dc_core::contact::{ContactField, ContactForm, FieldError};
use dc_core::likes::LikedSet;
use dc_core::models::{
    BlogCategory, BlogPost, Department, Doctor, Faq, GalleryCategory, GalleryItem, RecordId, Service, Treatment,
};
use dc_core::query::{evaluate, related_posts, Query};
use dc_core::seo;
use dc_core::wizard::{BookingWizard, WizardStep, TIME_SLOTS, TOTAL_STEPS};

use crate::tr::Tr;
use crate::views::{
    category_options, clinic_stats, listing_query, sort_options, DepartmentCard, DoctorCard, FaqEntry, GalleryCard,
    Layout, PageContext, PostCard, Section, SelectOption, ServiceCard, Stat, TreatmentCard,
};

/// How many posts the home page previews, and how many related posts an article shows.
const LATEST_POSTS: usize = 3;
const RELATED_POSTS: usize = 2;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub layout: Layout,
    pub tr: Tr,
    pub stats: Vec<Stat>,
    pub treatments: Vec<TreatmentCard>,
    pub doctors: Vec<DoctorCard>,
    pub latest: Vec<PostCard>,
}

impl HomePage {
    pub fn build(
        ctx: &PageContext,
        treatments: &[Treatment],
        doctors: &[Doctor],
        posts: &[BlogPost],
        liked: &LikedSet,
    ) -> Self {
        let tr = &ctx.tr;
        let mut layout = ctx.layout(Some(Section::Home), String::new(), String::new());
        layout
            .json_ld
            .push(seo::script_payload(&seo::clinic_json_ld(&ctx.clinic, &ctx.base_url)));

        let newest = evaluate(posts, &Query::<BlogCategory>::default());
        Self {
            stats: clinic_stats(tr, treatments.len()),
            treatments: treatments.iter().map(|t| TreatmentCard::new(tr, t)).collect(),
            doctors: doctors.iter().map(|d| DoctorCard::new(tr, d, false)).collect(),
            latest: newest.into_iter().take(LATEST_POSTS).map(|p| PostCard::new(tr, p, liked)).collect(),
            layout,
            tr: tr.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub layout: Layout,
    pub tr: Tr,
    pub stats: Vec<Stat>,
    pub doctors: Vec<DoctorCard>,
}

impl AboutPage {
    pub fn build(ctx: &PageContext, doctors: &[Doctor], treatments: usize) -> Self {
        let tr = &ctx.tr;
        let mut layout = ctx.layout(Some(Section::About), tr.t("about.heading"), tr.t("about.intro"));
        layout.json_ld.extend(
            doctors
                .iter()
                .map(|d| seo::script_payload(&seo::physician_json_ld(d, &ctx.clinic))),
        );
        Self {
            stats: clinic_stats(tr, treatments),
            doctors: doctors.iter().map(|d| DoctorCard::new(tr, d, false)).collect(),
            layout,
            tr: tr.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "treatments.html")]
pub struct TreatmentsPage {
    pub layout: Layout,
    pub tr: Tr,
    pub treatments: Vec<TreatmentCard>,
}

impl TreatmentsPage {
    pub fn build(ctx: &PageContext, treatments: &[Treatment]) -> Self {
        let tr = &ctx.tr;
        Self {
            layout: ctx.layout(Some(Section::Treatments), tr.t("treatments.heading"), tr.t("treatments.intro")),
            treatments: treatments.iter().map(|t| TreatmentCard::new(tr, t)).collect(),
            tr: tr.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "treatment.html")]
pub struct TreatmentPage {
    pub layout: Layout,
    pub tr: Tr,
    pub treatment: TreatmentCard,
}

impl TreatmentPage {
    pub fn build(ctx: &PageContext, treatment: &Treatment) -> Self {
        let tr = &ctx.tr;
        Self {
            layout: ctx.layout(Some(Section::Treatments), treatment.name.clone(), treatment.description.clone()),
            treatment: TreatmentCard::new(tr, treatment),
            tr: tr.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "blog_index.html")]
pub struct BlogIndexPage {
    pub layout: Layout,
    pub tr: Tr,
    pub term: String,
    pub categories: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
    /// Empty unless the listing is unfiltered.
    pub featured: Vec<PostCard>,
    pub posts: Vec<PostCard>,
    pub result_count: String,
    pub is_empty: bool,
}

impl BlogIndexPage {
    pub fn build(ctx: &PageContext, posts: &[BlogPost], query: &Query<BlogCategory>, liked: &LikedSet) -> Self {
        let tr = &ctx.tr;
        let matches = evaluate(posts, query);
        let show_featured = query.is_unfiltered();

        let featured = if show_featured {
            posts.iter().filter(|p| p.featured).map(|p| PostCard::new(tr, p, liked)).collect()
        } else {
            Vec::new()
        };
        let listed = matches
            .iter()
            .filter(|p| !(show_featured && p.featured))
            .map(|p| PostCard::new(tr, p, liked))
            .collect();

        Self {
            layout: ctx.layout(Some(Section::Blog), tr.t("blog.heading"), tr.t("blog.intro")),
            term: query.term.clone(),
            categories: category_options(
                tr,
                "blog.all_categories",
                "categories.blog",
                BlogCategory::ALL,
                BlogCategory::slug,
                query,
            ),
            sorts: sort_options::<BlogPost>(tr, "blog", query.sort),
            featured,
            posts: listed,
            result_count: format!("{} {}", tr.number(matches.len() as u32), tr.t("blog.articles")),
            is_empty: matches.is_empty(),
            tr: tr.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "blog_post.html")]
pub struct BlogPostPage {
    pub layout: Layout,
    pub tr: Tr,
    pub post: PostCard,
    pub body: Vec<String>,
    pub related: Vec<PostCard>,
}

impl BlogPostPage {
    pub fn build(ctx: &PageContext, post: &BlogPost, all: &[BlogPost], liked: &LikedSet) -> Self {
        let tr = &ctx.tr;
        let mut layout = ctx.layout(Some(Section::Blog), post.title.clone(), post.excerpt.clone());
        layout
            .json_ld
            .push(seo::script_payload(&seo::blog_posting_json_ld(post, &ctx.clinic, &layout.canonical)));

        Self {
            post: PostCard::new(tr, post, liked),
            body: post.body.clone(),
            related: related_posts(all, post, RELATED_POSTS)
                .into_iter()
                .map(|p| PostCard::new(tr, p, liked))
                .collect(),
            layout,
            tr: tr.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryPage {
    pub layout: Layout,
    pub tr: Tr,
    pub term: String,
    pub categories: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
    pub items: Vec<GalleryCard>,
    pub result_count: String,
    pub is_empty: bool,
    /// The case opened with `?item=`, if it exists.
    pub selected: Option<GalleryCard>,
    /// Link that closes the detail panel and keeps the filters.
    pub close_href: String,
}

impl GalleryPage {
    pub fn build(
        ctx: &PageContext,
        items: &[GalleryItem],
        query: &Query<GalleryCategory>,
        liked: &LikedSet,
        open: Option<RecordId>,
    ) -> Self {
        let tr = &ctx.tr;
        let listing = listing_query(query, GalleryCategory::slug);
        let matches = evaluate(items, query);

        Self {
            layout: ctx.layout(Some(Section::Gallery), tr.t("gallery.heading"), tr.t("gallery.intro")),
            term: query.term.clone(),
            categories: category_options(
                tr,
                "gallery.all_treatments",
                "categories.gallery",
                GalleryCategory::ALL,
                GalleryCategory::slug,
                query,
            ),
            sorts: sort_options::<GalleryItem>(tr, "gallery", query.sort),
            items: matches.iter().map(|i| GalleryCard::new(tr, i, liked, &listing)).collect(),
            result_count: format!("{} {}", tr.number(matches.len() as u32), tr.t("gallery.results")),
            is_empty: matches.is_empty(),
            selected: open
                .and_then(|id| items.iter().find(|i| i.id == id))
                .map(|i| GalleryCard::new(tr, i, liked, &listing)),
            close_href: if listing.is_empty() { "/gallery".into() } else { format!("/gallery?{listing}") },
            tr: tr.clone(),
        }
    }
}

/// One dot in the wizard's progress indicator.
#[derive(Debug, Clone)]
pub struct StepMarker {
    pub number: u8,
    pub label: String,
    pub done: bool,
    pub current: bool,
}

#[derive(Debug, Clone)]
pub struct DateChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct TimeChoice {
    pub value: &'static str,
    pub selected: bool,
}

/// Patient fields echoed back into the step 4 form.
#[derive(Debug, Clone, Default)]
pub struct PatientFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct BookingSummary {
    pub doctor: String,
    pub doctor_title: String,
    pub service: String,
    pub duration: String,
    pub fee: String,
    pub date: String,
    pub time: String,
    pub patient_name: String,
    pub email: String,
    pub phone: String,
}

const STEP_KEYS: [&str; TOTAL_STEPS as usize] = ["provider", "service", "datetime", "patient", "review"];

#[derive(Template)]
#[template(path = "booking.html")]
pub struct BookingPage {
    pub layout: Layout,
    pub tr: Tr,
    pub step_number: u8,
    pub total_steps: u8,
    pub progress: u8,
    pub step_title: String,
    pub step_subtitle: String,
    pub markers: Vec<StepMarker>,
    pub on_provider: bool,
    pub on_service: bool,
    pub on_datetime: bool,
    pub on_patient: bool,
    pub on_review: bool,
    pub submitted: bool,
    pub submitting: bool,
    pub doctors: Vec<DoctorCard>,
    pub services: Vec<ServiceCard>,
    pub dates: Vec<DateChoice>,
    pub times: Vec<TimeChoice>,
    pub patient: PatientFields,
    pub summary: Option<BookingSummary>,
    pub can_retreat: bool,
    /// Localised error shown above the step, e.g. after a failed submission.
    pub notice: Option<String>,
    pub reference: Option<String>,
}

impl BookingPage {
    pub fn build(
        ctx: &PageContext,
        wizard: &BookingWizard,
        doctors: &[Doctor],
        services: &[Service],
        notice: Option<String>,
    ) -> Self {
        let tr = &ctx.tr;
        let step = wizard.step();
        let selection = wizard.selection();
        let key = STEP_KEYS.get(usize::from(step.number()).saturating_sub(1)).copied();

        let (step_title, step_subtitle) = match (step, key) {
            (WizardStep::Submitted, _) | (_, None) => (tr.t("booking.success.title"), tr.t("booking.success.body")),
            (_, Some(key)) => (
                tr.t(&format!("booking.steps.{key}.title")),
                tr.t(&format!("booking.steps.{key}.subtitle")),
            ),
        };

        let markers = STEP_KEYS
            .iter()
            .zip(1u8..)
            .map(|(key, number)| StepMarker {
                number,
                label: tr.t(&format!("booking.steps.{key}.title")),
                done: number < step.number(),
                current: number == step.number(),
            })
            .collect();

        let summary = match (&selection.provider, &selection.service, selection.date, &selection.time) {
            (Some(doctor), Some(service), Some(date), Some(time)) => Some(BookingSummary {
                doctor: doctor.name.clone(),
                doctor_title: doctor.title.clone(),
                service: service.name.clone(),
                duration: format!("{} {}", tr.number(service.duration_minutes), tr.t("booking.minutes")),
                fee: tr.money(service.price),
                date: tr.date_full(date),
                time: time.clone(),
                patient_name: selection.patient.full_name(),
                email: selection.patient.email.clone(),
                phone: selection.patient.phone.clone(),
            }),
            _ => None,
        };

        let patient = &selection.patient;
        let notice = notice.or_else(|| wizard.last_failure().map(|_| tr.t("booking.failure")));

        Self {
            layout: ctx.layout(Some(Section::Booking), tr.t("booking.heading"), String::new()),
            step_number: step.number().min(TOTAL_STEPS),
            total_steps: TOTAL_STEPS,
            progress: wizard.progress_percent(),
            step_title,
            step_subtitle,
            markers,
            on_provider: step == WizardStep::Provider,
            on_service: step == WizardStep::Service,
            on_datetime: step == WizardStep::DateTime,
            on_patient: step == WizardStep::PatientInfo,
            on_review: step == WizardStep::Review,
            submitted: step == WizardStep::Submitted,
            submitting: wizard.is_submitting(),
            doctors: doctors
                .iter()
                .map(|d| DoctorCard::new(tr, d, selection.provider.as_ref().is_some_and(|p| p.id == d.id)))
                .collect(),
            services: services
                .iter()
                .map(|s| ServiceCard::new(tr, s, selection.service.as_ref().is_some_and(|c| c.id == s.id)))
                .collect(),
            dates: wizard
                .window()
                .dates()
                .map(|d| DateChoice {
                    value: d.format("%Y-%m-%d").to_string(),
                    label: tr.day_short(d),
                    selected: selection.date == Some(d),
                })
                .collect(),
            times: TIME_SLOTS
                .iter()
                .map(|slot| TimeChoice { value: *slot, selected: selection.time.as_deref() == Some(*slot) })
                .collect(),
            patient: PatientFields {
                first_name: patient.first_name.clone(),
                last_name: patient.last_name.clone(),
                email: patient.email.clone(),
                phone: patient.phone.clone(),
                date_of_birth: patient.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                notes: patient.notes.clone().unwrap_or_default(),
            },
            summary,
            can_retreat: wizard.can_retreat(),
            notice,
            reference: wizard.confirmation().map(|c| c.reference.clone()),
            tr: tr.clone(),
        }
    }
}

/// A contact form input with its current value and validation message.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub input_type: &'static str,
    pub label: String,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactPage {
    pub layout: Layout,
    pub tr: Tr,
    /// Single-line inputs in display order; the message textarea is separate.
    pub inputs: Vec<FormField>,
    pub message: FormField,
    pub sent: bool,
    pub notice: Option<String>,
    pub whatsapp_href: String,
    pub departments: Vec<DepartmentCard>,
    pub faqs: Vec<FaqEntry>,
}

impl ContactPage {
    /// `form` is echoed back unless the message was sent, in which case the form is cleared.
    pub fn build(
        ctx: &PageContext,
        form: &ContactForm,
        errors: &[FieldError],
        sent: bool,
        notice: Option<String>,
        departments: &[Department],
        faqs: &[Faq],
    ) -> Self {
        let tr = &ctx.tr;
        let blank = ContactForm::default();
        let shown = if sent { &blank } else { form };
        let error_for = |field: ContactField| {
            errors
                .iter()
                .find(|e| e.field == field)
                .map(|e| tr.t(e.problem.message_key()))
        };
        let field = |name: &'static str, input_type: &'static str, value: &str, error: Option<String>| FormField {
            name,
            input_type,
            label: tr.t(&format!("contact.fields.{name}")),
            value: value.to_string(),
            error,
        };

        let mut layout = ctx.layout(Some(Section::Contact), tr.t("contact.heading"), tr.t("contact.intro"));
        layout.json_ld.push(seo::script_payload(&seo::faq_json_ld(faqs)));

        Self {
            inputs: vec![
                field(ContactField::Name.name(), "text", &shown.name, error_for(ContactField::Name)),
                field(ContactField::Email.name(), "email", &shown.email, error_for(ContactField::Email)),
                field("phone", "tel", &shown.phone, None),
                field(ContactField::Subject.name(), "text", &shown.subject, error_for(ContactField::Subject)),
            ],
            message: field(ContactField::Message.name(), "text", &shown.message, error_for(ContactField::Message)),
            sent,
            notice,
            whatsapp_href: format!("https://wa.me/{}", ctx.clinic.whatsapp),
            departments: departments.iter().map(DepartmentCard::from).collect(),
            faqs: faqs.iter().map(FaqEntry::from).collect(),
            layout,
            tr: tr.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub layout: Layout,
    pub tr: Tr,
    pub status: u16,
    pub message: String,
}

impl ErrorPage {
    /// `message_key` is a catalogue key under `errors.`.
    pub fn build(ctx: &PageContext, status: u16, message_key: &str) -> Self {
        let tr = &ctx.tr;
        let message = tr.t(&format!("errors.{message_key}"));
        Self {
            layout: ctx.layout(None, message.clone(), String::new()),
            tr: tr.clone(),
            status,
            message,
        }
    }
}
