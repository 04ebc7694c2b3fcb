//! derm-centre/crates/dc-api/src/session.rs
//!
//! Anonymous, in-memory browsing sessions keyed by the `dc_session` cookie.
//! A session holds everything a visitor changes: language, likes and the
//! booking wizard. Nothing survives a restart.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use dashmap::DashMap;
use dc_core::i18n::Language;
use dc_core::likes::LikedSet;
use dc_core::wizard::BookingWizard;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::AppState;

pub const SESSION_COOKIE: &str = "dc_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub language: Language,
    pub blog_likes: LikedSet,
    pub gallery_likes: LikedSet,
    /// Created on the first visit to `/booking`.
    pub wizard: Option<BookingWizard>,
    last_seen: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            language: Language::default(),
            blog_likes: LikedSet::new(),
            gallery_likes: LikedSet::new(),
            wizard: None,
            last_seen: Instant::now(),
        }
    }
}

/// Identifies the caller's session; inserted into request extensions by [`session_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Refreshes a known session. Unknown or absent ids get a fresh session;
    /// the returned flag is `true` when one was created.
    pub fn resolve(&self, presented: Option<Uuid>) -> (SessionId, bool) {
        if let Some(id) = presented {
            if let Some(mut session) = self.inner.get_mut(&id) {
                session.last_seen = Instant::now();
                return (SessionId(id), false);
            }
        }
        let id = Uuid::new_v4();
        self.inner.insert(id, Session::new());
        tracing::debug!(session = %id, "Session created");
        (SessionId(id), true)
    }

    /// Runs `f` against the session, recreating it if it was swept meanwhile.
    /// Do not hold the result across an `.await` that re-enters the store.
    pub fn with<R>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut entry = self.inner.entry(id.0).or_insert_with(Session::new);
        f(entry.value_mut())
    }

    pub fn language(&self, id: SessionId) -> Language {
        self.inner.get(&id.0).map(|s| s.language).unwrap_or_default()
    }

    /// Drops sessions idle for longer than `idle`. Returns how many were removed.
    /// Sessions with a booking in flight are kept.
    pub fn sweep(&self, idle: Duration) -> usize {
        let before = self.inner.len();
        self.inner.retain(|_, session| {
            session.last_seen.elapsed() <= idle || session.wizard.as_ref().is_some_and(|w| w.is_submitting())
        });
        before.saturating_sub(self.inner.len())
    }

    pub fn spawn_sweeper(&self, idle: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.sweep(idle);
                if removed > 0 {
                    tracing::info!(removed, remaining = store.len(), "Idle sessions swept");
                }
            }
        })
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Resolves the session cookie and issues a new one when needed.
pub async fn session_middleware(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let (id, created) = state.sessions.resolve(session_cookie(req.headers()));
    req.extensions_mut().insert(id);

    let mut response = next.run(req).await;
    if created {
        let secure = if state.options.secure_cookie { "; Secure" } else { "" };
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax{secure}", id.0);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Session cookie not encodable"),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cookie_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}")).unwrap());
        assert_eq!(session_cookie(&headers), Some(id));

        let mut garbage = HeaderMap::new();
        garbage.insert(COOKIE, HeaderValue::from_static("dc_session=not-a-uuid"));
        assert_eq!(session_cookie(&garbage), None);
    }

    #[test]
    fn unknown_ids_get_a_new_session() {
        let store = SessionStore::new();
        let (first, created) = store.resolve(None);
        assert!(created);
        assert_eq!(store.resolve(Some(first.0)), (first, false));

        let (other, created) = store.resolve(Some(Uuid::new_v4()));
        assert!(created);
        assert_ne!(other, first);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        let (a, _) = store.resolve(None);
        let (b, _) = store.resolve(None);
        store.with(a, |s| s.language = Language::Fa);
        assert_eq!(store.language(a), Language::Fa);
        assert_eq!(store.language(b), Language::En);
    }

    #[test]
    fn sweep_drops_idle_sessions() {
        let store = SessionStore::new();
        store.resolve(None);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.sweep(Duration::from_secs(60)), 0);
        assert_eq!(store.sweep(Duration::ZERO), 1);
        assert!(store.is_empty());
    }
}
