use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER}, Method},
    web, Error, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    errors::AppError,
    limiter::rate_limiter::RateDecision,
    utils::get_client_ip::get_client_ip,
    AppState,
};

pub const CONTACT_RATE_LIMIT_MESSAGE: &str = "Too many contact form submissions, please try again later.";

const RATELIMIT_LIMIT: &str = "ratelimit-limit";
const RATELIMIT_REMAINING: &str = "ratelimit-remaining";
const RATELIMIT_RESET: &str = "ratelimit-reset";

/// Throttles contact form submissions per client address. Mounted on the
/// submission resource only; of its methods, only `POST` is counted.
/// Rejection happens before the body is read.
pub struct ContactRateLimit;

impl<S> Transform<S, ServiceRequest> for ContactRateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ContactRateLimitService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ContactRateLimitService {
            service: Rc::new(service),
        })
    }
}

pub struct ContactRateLimitService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for ContactRateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if req.method() != Method::POST {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState missing in rate limit middleware");
                return Err(AppError::InternalError("Rate limiter unavailable".into()).into());
            };

            let client_ip = get_client_ip(req.request(), state.config.trust_proxy);
            let decision = state.contact_limiter.check(&client_ip);

            if !decision.allowed {
                tracing::warn!(
                    client_ip = %client_ip,
                    retry_after = decision.reset_after_secs(),
                    "Contact submission rate limit exceeded"
                );

                let mut response = AppError::RateLimited(CONTACT_RATE_LIMIT_MESSAGE.into()).error_response();
                let headers = response.headers_mut();
                insert_rate_headers(headers, &decision);
                headers.insert(RETRY_AFTER, HeaderValue::from(decision.reset_after_secs()));

                return Ok(req.into_response(response));
            }

            let mut res = service.call(req).await?;
            insert_rate_headers(res.headers_mut(), &decision);
            Ok(res)
        })
    }
}

fn insert_rate_headers(headers: &mut HeaderMap, decision: &RateDecision) {
    headers.insert(HeaderName::from_static(RATELIMIT_LIMIT), HeaderValue::from(decision.limit));
    headers.insert(HeaderName::from_static(RATELIMIT_REMAINING), HeaderValue::from(decision.remaining));
    headers.insert(HeaderName::from_static(RATELIMIT_RESET), HeaderValue::from(decision.reset_after_secs()));
}
