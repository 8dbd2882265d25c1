use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_principal::create_principal;
use super::handlers::delete_principal::delete_principal;
use super::handlers::get_me::get_me;
use super::handlers::get_principal::get_principal;
use super::handlers::issue_token::issue_token;
use super::handlers::list_principals::list_principals;
use super::handlers::patients::create_patient::create_patient;
use super::handlers::patients::delete_patient::delete_patient;
use super::handlers::patients::get_patient::get_patient;
use super::handlers::patients::list_patients::list_patients;
use super::handlers::patients::update_patient::update_patient;
use super::handlers::register_doctor::register_doctor;
use super::handlers::update_principal::replace_principal;
use super::handlers::update_principal::update_principal;
use crate::domain::patient::service::PatientService;
use crate::domain::principal::service::PrincipalService;
use crate::outbound::repositories::patient::PostgresPatientRepository;
use crate::outbound::repositories::principal::PostgresPrincipalRepository;

#[derive(Clone)]
pub struct AppState {
    pub principal_service: Arc<PrincipalService<PostgresPrincipalRepository>>,
    pub patient_service: Arc<PatientService<PostgresPatientRepository>>,
}

pub fn create_router(
    principal_service: Arc<PrincipalService<PostgresPrincipalRepository>>,
    patient_service: Arc<PatientService<PostgresPatientRepository>>,
) -> Router {
    let state = AppState {
        principal_service,
        patient_service,
    };

    // Route protection happens in the handlers through the CurrentPrincipal
    // extractor; role gates are an equality check on top of it.
    let api_routes = Router::new()
        .route("/api/auth/token", post(issue_token))
        .route(
            "/api/principals",
            post(create_principal).get(list_principals),
        )
        .route("/api/principals/me", get(get_me))
        .route(
            "/api/principals/:principal_id",
            get(get_principal)
                .patch(update_principal)
                .put(replace_principal)
                .delete(delete_principal),
        )
        .route("/api/doctors", post(register_doctor))
        .route("/api/patients", post(create_patient).get(list_patients))
        .route(
            "/api/patients/:patient_id",
            get(get_patient).patch(update_patient).delete(delete_patient),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    api_routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
