//! # dc-api Handlers
//!
//! This module coordinates the flow between HTTP requests, the visitor's
//! session and the core ports.

use axum::extract::{Path, Query as UrlQuery, State};
use axum::http::header::{CONTENT_TYPE, REFERER};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use chrono::NaiveDate;
use dc_core::contact::ContactForm;
use dc_core::error::AppError;
use dc_core::i18n::Language;
use dc_core::likes::toggle_like;
use dc_core::models::{BlogCategory, GalleryCategory, RecordId};
use dc_core::query::Query;
use dc_core::seo;
use dc_core::traits::BookingError;
use dc_core::wizard::{Advance, BookingConfirmation, BookingWizard, PatientInfo, WizardStep};
use dc_ui::{
    AboutPage, BlogIndexPage, BlogPostPage, BookingPage, ContactPage, GalleryPage, HomePage, Template,
    TreatmentPage, TreatmentsPage,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::session::{SessionId, SessionStore};
use crate::AppState;

fn render<T: Template>(page: T) -> ApiResult<Html<String>> {
    page.render()
        .map(Html)
        .map_err(|e| ApiError(AppError::Internal(format!("template rendering failed: {e}"))))
}

fn request_path(uri: &Uri) -> String {
    uri.path_and_query().map(|pq| pq.as_str().to_string()).unwrap_or_else(|| "/".into())
}

/// Accepts only same-site absolute paths, so redirects cannot leave the site.
fn local_path(candidate: &str) -> Option<&str> {
    (candidate.starts_with('/') && !candidate.starts_with("//") && !candidate.contains('\\')).then_some(candidate)
}

/// Redirects to the page the form was posted from, or `fallback`.
fn redirect_back(headers: &HeaderMap, fallback: &str) -> Redirect {
    let target = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|referer| {
            let after_scheme = referer.split_once("://").map_or(referer, |(_, rest)| rest);
            after_scheme.find('/').map(|i| &after_scheme[i..])
        })
        .and_then(local_path)
        .unwrap_or(fallback);
    Redirect::to(target)
}

fn parse_id(raw: &str, kind: &str) -> ApiResult<RecordId> {
    raw.parse()
        .map_err(|_| ApiError(AppError::NotFound(kind.into(), raw.into())))
}

pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let treatments = state.content.list_treatments().await?;
    let doctors = state.content.list_doctors().await?;
    let posts = state.content.list_posts().await?;
    let liked = state.sessions.with(session, |s| s.blog_likes.clone());
    render(HomePage::build(&ctx, &treatments, &doctors, &posts, &liked))
}

pub async fn about(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let doctors = state.content.list_doctors().await?;
    let treatments = state.content.list_treatments().await?;
    render(AboutPage::build(&ctx, &doctors, treatments.len()))
}

pub async fn treatments(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let treatments = state.content.list_treatments().await?;
    render(TreatmentsPage::build(&ctx, &treatments))
}

pub async fn treatment(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(slug): Path<String>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let treatment = state
        .content
        .list_treatments()
        .await?
        .into_iter()
        .find(|t| t.slug == slug)
        .ok_or_else(|| AppError::NotFound("treatment".into(), slug.clone()))?;
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    render(TreatmentPage::build(&ctx, &treatment))
}

/// `?q=&category=&sort=` as shared by the blog and gallery listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    /// Gallery only: the case whose detail panel is open.
    pub item: Option<String>,
}

impl ListingParams {
    fn query<C: std::str::FromStr>(&self) -> Query<C> {
        Query::from_params(self.q.as_deref(), self.category.as_deref(), self.sort.as_deref())
    }
}

pub async fn blog_index(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
    UrlQuery(params): UrlQuery<ListingParams>,
) -> ApiResult<Html<String>> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let posts = state.content.list_posts().await?;
    let query: Query<BlogCategory> = params.query();
    let liked = state.sessions.with(session, |s| s.blog_likes.clone());
    tracing::debug!(term = %query.term, sort = ?query.sort, "Blog listing");
    render(BlogIndexPage::build(&ctx, &posts, &query, &liked))
}

pub async fn blog_post(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(raw_id): Path<String>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let id = parse_id(&raw_id, "blog post")?;
    let post = state
        .content
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound("blog post".into(), raw_id.clone()))?;
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let all = state.content.list_posts().await?;
    let liked = state.sessions.with(session, |s| s.blog_likes.clone());
    render(BlogPostPage::build(&ctx, &post, &all, &liked))
}

pub async fn like_post(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Redirect> {
    let id = parse_id(&raw_id, "blog post")?;
    if state.content.get_post(id).await?.is_none() {
        return Err(AppError::NotFound("blog post".into(), raw_id).into());
    }
    let liked = state.sessions.with(session, |s| {
        s.blog_likes = toggle_like(&s.blog_likes, id);
        s.blog_likes.contains(id)
    });
    state.metrics.like("blog", liked);
    Ok(redirect_back(&headers, &format!("/blog/{id}")))
}

pub async fn gallery(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
    UrlQuery(params): UrlQuery<ListingParams>,
) -> ApiResult<Html<String>> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let items = state.content.list_gallery().await?;
    let query: Query<GalleryCategory> = params.query();
    let open = params.item.as_deref().and_then(|raw| raw.parse::<RecordId>().ok());
    let liked = state.sessions.with(session, |s| s.gallery_likes.clone());
    render(GalleryPage::build(&ctx, &items, &query, &liked, open))
}

pub async fn like_gallery_item(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Redirect> {
    let id = parse_id(&raw_id, "gallery item")?;
    if state.content.get_gallery_item(id).await?.is_none() {
        return Err(AppError::NotFound("gallery item".into(), raw_id).into());
    }
    let liked = state.sessions.with(session, |s| {
        s.gallery_likes = toggle_like(&s.gallery_likes, id);
        s.gallery_likes.contains(id)
    });
    state.metrics.like("gallery", liked);
    Ok(redirect_back(&headers, "/gallery"))
}

pub async fn booking_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let today = state.today();
    let wizard = state
        .sessions
        .with(session, |s| s.wizard.get_or_insert_with(|| BookingWizard::new(today)).clone());
    let doctors = state.content.list_doctors().await?;
    let services = state.content.list_services().await?;
    render(BookingPage::build(&ctx, &wizard, &doctors, &services, None))
}

/// Posted by every wizard step. Only the fields of the current step are read.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub action: String,
    pub provider: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub notes: String,
}

impl BookingForm {
    fn patient(&self) -> ApiResult<PatientInfo> {
        let date_of_birth = match self.date_of_birth.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| AppError::ValidationError(format!("invalid date of birth `{raw}`")))?,
            ),
        };
        let notes = self.notes.trim();
        Ok(PatientInfo {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            date_of_birth,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Writes the posted fields for the wizard's current step into the session.
async fn apply_step_fields(state: &AppState, session: SessionId, form: &BookingForm) -> ApiResult<()> {
    let today = state.today();
    let step = state
        .sessions
        .with(session, |s| s.wizard.get_or_insert_with(|| BookingWizard::new(today)).step());

    match step {
        WizardStep::Provider => {
            if let Some(raw) = non_empty(&form.provider) {
                let id = raw
                    .parse::<RecordId>()
                    .map_err(|_| AppError::ValidationError(format!("invalid provider `{raw}`")))?;
                let doctor = state
                    .content
                    .get_doctor(id)
                    .await?
                    .ok_or_else(|| AppError::ValidationError(format!("unknown provider `{raw}`")))?;
                with_wizard(state, session, |w| w.choose_provider(doctor))?;
            }
        }
        WizardStep::Service => {
            if let Some(raw) = non_empty(&form.service) {
                let id = raw
                    .parse::<RecordId>()
                    .map_err(|_| AppError::ValidationError(format!("invalid service `{raw}`")))?;
                let service = state
                    .content
                    .get_service(id)
                    .await?
                    .ok_or_else(|| AppError::ValidationError(format!("unknown service `{raw}`")))?;
                with_wizard(state, session, |w| w.choose_service(service))?;
            }
        }
        WizardStep::DateTime => {
            if let Some(raw) = non_empty(&form.date) {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| AppError::ValidationError(format!("invalid date `{raw}`")))?;
                with_wizard(state, session, |w| w.choose_date(date))?;
            }
            if let Some(slot) = non_empty(&form.time) {
                with_wizard(state, session, |w| w.choose_time(slot))?;
            }
        }
        WizardStep::PatientInfo => {
            let patient = form.patient()?;
            with_wizard(state, session, |w| w.set_patient(patient))?;
        }
        WizardStep::Review | WizardStep::Submitted => {}
    }
    Ok(())
}

fn with_wizard<R>(
    state: &AppState,
    session: SessionId,
    f: impl FnOnce(&mut BookingWizard) -> Result<R, dc_core::wizard::WizardError>,
) -> ApiResult<R> {
    let today = state.today();
    state
        .sessions
        .with(session, |s| f(s.wizard.get_or_insert_with(|| BookingWizard::new(today))))
        .map_err(ApiError::from)
}

fn booking_outcome_label(outcome: &Result<impl Sized, BookingError>) -> &'static str {
    match outcome {
        Ok(_) => "confirmed",
        Err(BookingError::Unavailable(_)) => "unavailable",
        Err(BookingError::SlotTaken) => "slot_taken",
        Err(BookingError::Rejected(_)) => "rejected",
    }
}

/// Settles a wizard submission exactly once. Dropping it unsettled (the
/// booking task panicked) records the booking as unavailable so the visitor
/// can retry or restart.
struct PendingSubmission {
    sessions: SessionStore,
    session: SessionId,
    settled: bool,
}

impl PendingSubmission {
    fn new(sessions: SessionStore, session: SessionId) -> Self {
        Self { sessions, session, settled: false }
    }

    fn settle(mut self, outcome: Result<BookingConfirmation, BookingError>) {
        self.settled = true;
        finish_booking(&self.sessions, self.session, outcome);
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!(session = %self.session.0, "Booking submission abandoned");
            let outcome = Err(BookingError::Unavailable("the booking could not be completed".into()));
            finish_booking(&self.sessions, self.session, outcome);
        }
    }
}

fn finish_booking(sessions: &SessionStore, session: SessionId, outcome: Result<BookingConfirmation, BookingError>) {
    sessions.with(session, |s| {
        if let Some(wizard) = s.wizard.as_mut() {
            wizard.finish_submission(outcome);
        }
    });
}

/// Drives the wizard: `next`, `back`, `submit` or `restart`.
/// Always answers with a redirect to `/booking` on success.
pub async fn booking_action(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<BookingForm>,
) -> ApiResult<Redirect> {
    match form.action.as_str() {
        "next" => {
            apply_step_fields(&state, session, &form).await?;
            let advanced = with_wizard(&state, session, |w| Ok(w.advance()))?;
            if advanced == Advance::Blocked {
                tracing::debug!(session = %session.0, "Wizard step incomplete");
            }
        }
        "back" => {
            with_wizard(&state, session, |w| Ok(w.retreat()))?;
        }
        "restart" => {
            let today = state.today();
            state.sessions.with(session, |s| {
                if s.wizard.as_ref().is_some_and(BookingWizard::is_submitting) {
                    return Err(AppError::Conflict("a booking is being submitted".into()));
                }
                s.wizard = Some(BookingWizard::new(today));
                Ok(())
            })?;
        }
        "submit" => {
            // The booking runs in its own task so a dropped request still settles the wizard.
            let request = with_wizard(&state, session, |w| w.begin_submission())?;
            let pending = PendingSubmission::new(state.sessions.clone(), session);
            let booking = state.booking.clone();
            let metrics = state.metrics.clone();
            let task = tokio::spawn(async move {
                let outcome = booking.submit(&request).await;
                metrics.booking(booking_outcome_label(&outcome));
                pending.settle(outcome);
            });
            task.await
                .map_err(|e| AppError::Internal(format!("booking task failed: {e}")))?;
        }
        other => {
            return Err(AppError::ValidationError(format!("unknown booking action `{other}`")).into());
        }
    }
    Ok(Redirect::to("/booking"))
}

pub async fn contact_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let departments = state.content.departments().await?;
    let faqs = state.content.faqs().await?;
    render(ContactPage::build(&ctx, &ContactForm::default(), &[], false, None, &departments, &faqs))
}

pub async fn contact_submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
    Form(form): Form<ContactForm>,
) -> ApiResult<Response> {
    let ctx = state.page_context(session, &request_path(&uri)).await?;
    let departments = state.content.departments().await?;
    let faqs = state.content.faqs().await?;

    let message = match form.validate() {
        Ok(message) => message,
        Err(errors) => {
            state.metrics.contact("invalid");
            let page = ContactPage::build(&ctx, &form, &errors, false, None, &departments, &faqs);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(page)?).into_response());
        }
    };

    match state.contact.send(&message).await {
        Ok(()) => {
            state.metrics.contact("sent");
            let page = ContactPage::build(&ctx, &form, &[], true, None, &departments, &faqs);
            Ok(render(page)?.into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Contact message not delivered");
            state.metrics.contact("failed");
            let notice = Some(ctx.tr.t("errors.unavailable"));
            let page = ContactPage::build(&ctx, &form, &[], false, notice, &departments, &faqs);
            Ok((StatusCode::SERVICE_UNAVAILABLE, render(page)?).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    pub lang: String,
    #[serde(default)]
    pub return_to: String,
}

pub async fn set_language(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<LanguageForm>,
) -> ApiResult<Redirect> {
    let language: Language = form
        .lang
        .parse()
        .map_err(|e: dc_core::i18n::UnsupportedLanguage| AppError::ValidationError(e.to_string()))?;
    state.sessions.with(session, |s| s.language = language);
    tracing::debug!(session = %session.0, %language, "Language changed");
    Ok(Redirect::to(local_path(&form.return_to).unwrap_or("/")))
}

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let entries = seo::sitemap_entries(&state.options.base_url, state.today());
    ([(CONTENT_TYPE, "application/xml; charset=utf-8")], seo::render_sitemap(&entries))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn metrics(State(state): State<AppState>) -> ApiResult<Response> {
    let body = state
        .metrics
        .render()
        .map_err(|e| AppError::Internal(format!("metrics encoding failed: {e}")))?;
    Ok((
        [(CONTENT_TYPE, "application/openmetrics-text; version=1.0.0; charset=utf-8")],
        body,
    )
        .into_response())
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError(AppError::NotFound("page".into(), uri.path().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn redirects_stay_on_site() {
        assert_eq!(local_path("/blog?q=acne"), Some("/blog?q=acne"));
        assert_eq!(local_path("//evil.example"), None);
        assert_eq!(local_path("https://evil.example"), None);
    }

    #[test]
    fn referer_is_reduced_to_its_path() {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("http://localhost:3000/gallery?category=hair"));
        let response = redirect_back(&headers, "/gallery").into_response();
        assert_eq!(response.headers()["location"], "/gallery?category=hair");

        let response = redirect_back(&HeaderMap::new(), "/blog/3").into_response();
        assert_eq!(response.headers()["location"], "/blog/3");
    }

    #[test]
    fn optional_patient_fields() {
        let form = BookingForm {
            first_name: " Jane ".into(),
            date_of_birth: "1990-04-02".into(),
            ..BookingForm::default()
        };
        let patient = form.patient().unwrap();
        assert_eq!(patient.first_name, "Jane");
        assert_eq!(patient.date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 2));
        assert_eq!(patient.notes, None);

        let bad = BookingForm { date_of_birth: "02/04/1990".into(), ..BookingForm::default() };
        assert!(bad.patient().is_err());
    }
}
