//! Fixed-window request limiter keyed by client IP. Windows live in an
//! in-process map shared by clones of the limiter; counters reset when a
//! window expires.

use actix_web::body::EitherBody;
use actix_web::http::header::{HeaderName, HeaderValue, RETRY_AFTER};
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn limit_header() -> HeaderName {
    HeaderName::from_static("ratelimit-limit")
}

fn remaining_header() -> HeaderName {
    HeaderName::from_static("ratelimit-remaining")
}

fn reset_header() -> HeaderName {
    HeaderName::from_static("ratelimit-reset")
}

#[derive(Debug)]
struct Window {
    count: u32,
    started_at: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for RateLimiter {
    /// 100 requests per 15 minutes per client.
    fn default() -> Self {
        Self::new(100, Duration::from_secs(15 * 60))
    }
}

struct Decision {
    limited: bool,
    remaining: u32,
    reset_secs: u64,
}

impl RateLimiter {
    fn check(&self, client: &str) -> Decision {
        let mut windows = self.windows.lock().unwrap();
        let now = Instant::now();
        let window = windows.entry(client.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.count = 0;
            window.started_at = now;
        }

        window.count += 1;
        let elapsed = now.duration_since(window.started_at);
        Decision {
            limited: window.count > self.max_requests,
            remaining: self.max_requests.saturating_sub(window.count),
            reset_secs: self.window.saturating_sub(elapsed).as_secs(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterService {
            service,
            limiter: self.clone(),
        }))
    }
}

pub struct RateLimiterService<S> {
    service: S,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let decision = self.limiter.check(&client);
        let limit = self.limiter.max_requests;

        if decision.limited {
            log::warn!("Rate limit exceeded for {client}");
            let (req, _) = req.into_parts();
            let response = HttpResponse::TooManyRequests()
                .insert_header((limit_header(), limit))
                .insert_header((remaining_header(), 0u32))
                .insert_header((reset_header(), decision.reset_secs))
                .insert_header((RETRY_AFTER, decision.reset_secs))
                .json(json!({
                    "error": "Too many requests",
                    "message": "You have exceeded the 100 requests in 15 minutes limit!",
                    "retryAfter": "15 minutes",
                }));
            let res = ServiceResponse::new(req, response).map_into_right_body();
            return Box::pin(ready(Ok(res)));
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();
            headers.insert(limit_header(), HeaderValue::from(limit));
            headers.insert(remaining_header(), HeaderValue::from(decision.remaining));
            headers.insert(reset_header(), HeaderValue::from(decision.reset_secs));
            Ok(res.map_into_left_body())
        })
    }
}
