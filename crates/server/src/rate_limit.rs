use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared_types::{AppError, RateLimitSettings};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::auth::jwt::Claims;

/// Sliding window rate limit state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<RateLimitInner>>,
}

struct RateLimitInner {
    /// Map from client key -> list of request timestamps.
    requests: HashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimitState {
    /// Create rate limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimitInner {
                requests: HashMap::new(),
                max_requests,
                window,
            })),
        }
    }

    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(settings.max_requests, Duration::from_secs(settings.window_secs))
    }

    /// Record a request from `key`. Returns false once the key has used up
    /// its budget for the current window.
    fn check(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let window = inner.window;
        let max = inner.max_requests;

        // Drop keys that have been idle for a whole window.
        inner
            .requests
            .retain(|_, stamps| stamps.last().is_some_and(|t| now.duration_since(*t) < window));

        let timestamps = inner.requests.entry(key.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() as u32 >= max {
            return false;
        }

        timestamps.push(now);
        true
    }
}

/// Client key for a request: the authenticated user, or one shared bucket
/// for every anonymous caller.
fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<Claims>()
        .map(|claims| format!("user:{}", claims.sub))
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Axum middleware that enforces rate limits per authenticated user.
///
/// Must run after the auth middleware so `Claims` are already in the
/// request extensions.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    if !state.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return AppError::rate_limited("Too Many Attempts.").into_response();
    }

    next.run(request).await
}
