//! Rate limiting middleware.
//!
//! Counts state-changing requests (anything but GET/HEAD) per client address;
//! over the quota the request is answered with 429 without reaching the handler.

use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{Method, header},
};
use quill_shared::ErrorResponse;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use quill_core::ports::RateLimiter;

use crate::observability::RequestId;
use crate::templates;

/// Rate limiting middleware factory.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        if matches!(*req.method(), Method::GET | Method::HEAD) {
            return Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) });
        }

        let limiter = self.limiter.clone();
        let key = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        Box::pin(async move {
            match limiter.check(&key).await {
                Ok(result) if !result.allowed => {
                    let retry_after = result.reset_after.as_secs().max(1);
                    let request_id = req
                        .extensions()
                        .get::<RequestId>()
                        .map(|id| id.as_str().to_owned())
                        .unwrap_or_default();
                    tracing::warn!(client = %key, path = %req.path(), %request_id, "Rate limit exceeded");

                    let problem =
                        ErrorResponse::too_many_requests(retry_after).with_instance(req.path());
                    let mut response = templates::render_error(&problem);
                    response.headers_mut().insert(
                        header::RETRY_AFTER,
                        header::HeaderValue::from(retry_after),
                    );

                    let (http_req, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
                outcome => {
                    // Fail open when the limiter itself is broken.
                    if let Err(e) = outcome {
                        tracing::error!("Rate limiter error, failing open: {}", e);
                    }
                    Ok(service.call(req).await?.map_into_left_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use quill_infra::{InMemoryRateLimiter, RateLimitConfig};
    use std::time::Duration;

    #[actix_web::test]
    async fn limits_posts_but_not_gets() {
        let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        }));
        let app = test::init_service(
            App::new().service(
                web::resource("/login")
                    .wrap(RateLimitMiddleware::new(limiter))
                    .route(web::get().to(HttpResponse::Ok))
                    .route(web::post().to(HttpResponse::Ok)),
            ),
        )
        .await;

        for _ in 0..3 {
            let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let first = test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key(header::RETRY_AFTER));
    }
}
