use actix_web::HttpResponse;

/// Liveness probe used by the load balancer and the `ops` checks
#[tracing::instrument(name = "Health check handler")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
