use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::LocalBoxFuture;
use log::debug;

/// Number of requests served by the static file server.
///
/// Owned by the HTTP layer and shared between the counting middleware and the
/// admin handlers.
#[derive(Clone, Default)]
pub struct FileserverHits(Arc<AtomicU64>);

impl FileserverHits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }

    fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Middleware counting every request that reaches the wrapped service
pub struct CountHits {
    hits: FileserverHits,
}

impl CountHits {
    pub fn new(hits: FileserverHits) -> Self {
        Self { hits }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CountHits
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CountHitsService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(CountHitsService {
            service: Rc::new(service),
            hits: self.hits.clone(),
        }))
    }
}

pub struct CountHitsService<S> {
    service: Rc<S>,
    hits: FileserverHits,
}

impl<S, B> Service<ServiceRequest> for CountHitsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let total = self.hits.increment();
        debug!("File server hit #{}: {}", total, req.path());

        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}
