// File: ./src/loader/middleware.rs
//! Tower middleware that marks every data request as "always fetch fresh".
use http::{HeaderValue, Request, header};
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug)]
pub struct FreshFetchLayer {
    user_agent: Option<HeaderValue>,
}

impl FreshFetchLayer {
    /// An unusable user agent string is dropped with a warning.
    pub fn new(user_agent: &str) -> Self {
        let user_agent = match HeaderValue::from_str(user_agent) {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("Ignoring invalid user agent {:?}", user_agent);
                None
            }
        };
        Self { user_agent }
    }
}

impl<S> Layer<S> for FreshFetchLayer {
    type Service = FreshFetchService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FreshFetchService {
            inner,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FreshFetchService<S> {
    inner: S,
    user_agent: Option<HeaderValue>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for FreshFetchService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let headers = req.headers_mut();
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        if let Some(ua) = &self.user_agent {
            headers.insert(header::USER_AGENT, ua.clone());
        }
        self.inner.call(req)
    }
}
