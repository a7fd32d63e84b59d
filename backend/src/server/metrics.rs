//! Optional Prometheus middleware exposing `/metrics`.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use prometheus::Registry;
use std::sync::Arc;

const METRICS_NAMESPACE: &str = "colipass";
const METRICS_ENDPOINT: &str = "/metrics";

/// Request metrics middleware, or a pass-through when metrics are off.
#[derive(Clone)]
pub enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    /// Register request counters and histograms under the `colipass`
    /// namespace in a dedicated registry.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when metric registration fails.
    pub fn prometheus() -> std::io::Result<Self> {
        let metrics = PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .registry(Registry::new())
            .endpoint(METRICS_ENDPOINT)
            .build()
            .map_err(|error| {
                std::io::Error::other(format!("prometheus registration failed: {error}"))
            })?;
        Ok(Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(metrics) => {
                let pending = Compat::new(metrics.as_ref().clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::Disabled => {
                let passthrough = service.map(ServiceResponse::map_into_boxed_body);
                Box::pin(async move { Ok(boxed::service(passthrough)) })
            }
        }
    }
}
