use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::config::UnmatchedRoutes;
use crate::envelope::{BaseResponse, MultiRegistrationsResponse, RegistrationResponse};
use crate::health::HealthChecker;
use crate::registration::{AddRegistrationRequest, Registration};
use crate::routes::{Route, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
use crate::store::SharedStore;

/// State every request handler of one double shares.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub health: HealthChecker,
    pub body_limit: usize,
    pub unmatched_routes: UnmatchedRoutes,
}

/// Entry point for every request: classify, then run the matching operation.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let route = Route::classify(request.method(), request.uri().path());

    let Some(route) = route else {
        debug!("No route for {} {}", request.method(), request.uri().path());
        return unmatched(state.unmatched_routes);
    };

    debug!(
        "Dispatching {} {} to {}",
        request.method(),
        request.uri().path(),
        route.name()
    );

    match route {
        Route::Register => register(&state, request.into_body()).await,
        Route::Update => update(&state, request.into_body()).await,
        Route::ListAll => list_all(&state).await,
        Route::Get(service_id) => get_by_id(&state, &service_id).await,
        Route::Delete(service_id) => delete_by_id(&state, &service_id).await,
        Route::Ping => ping().await,
    }
}

/// Create with health check.
///
/// The store lock is taken before the body is read and held across the
/// outbound health check, so concurrent creates are applied one at a time.
pub async fn register(state: &AppState, body: Body) -> Response {
    let mut store = state.store.lock().await;

    let mut registration = read_registration(body, state.body_limit).await;
    let status = state.health.check(&registration).await;
    registration.status = Some(status.as_str().to_string());

    info!(
        "Registered service {:?} at {}:{} ({})",
        registration.service_id, registration.host, registration.port, status
    );
    store.insert(registration.service_id.clone(), registration);

    (StatusCode::CREATED, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)]).into_response()
}

/// Replace a record as sent, without a health check.
pub async fn update(state: &AppState, body: Body) -> Response {
    let mut store = state.store.lock().await;

    let registration = read_registration(body, state.body_limit).await;

    info!("Updated service {:?}", registration.service_id);
    store.insert(registration.service_id.clone(), registration);

    StatusCode::NO_CONTENT.into_response()
}

pub async fn list_all(state: &AppState) -> Response {
    let registrations = state.store.lock().await.snapshot();
    debug!("Listing {} registrations", registrations.len());

    MultiRegistrationsResponse::new(registrations).into_response()
}

/// Look up one record.
///
/// Takes the same lock `register` holds across its health check, so a
/// lookup issued during a create waits for that create to finish and never
/// sees a record without its status. A create against an endpoint that never
/// answers stalls lookups until the transport gives up.
pub async fn get_by_id(state: &AppState, service_id: &str) -> Response {
    let registration = state.store.lock().await.get(service_id).cloned();

    match registration {
        Some(registration) => RegistrationResponse::new(registration).into_response(),
        None => BaseResponse::not_found().into_response(),
    }
}

/// Always 204, whether or not the record existed.
pub async fn delete_by_id(state: &AppState, service_id: &str) -> Response {
    if state.store.lock().await.remove(service_id).is_some() {
        info!("Deregistered service {:?}", service_id);
    }

    StatusCode::NO_CONTENT.into_response()
}

pub async fn ping() -> Response {
    ([(header::CONTENT_TYPE, CONTENT_TYPE_TEXT)], "pong").into_response()
}

fn unmatched(policy: UnmatchedRoutes) -> Response {
    match policy {
        UnmatchedRoutes::Silent => StatusCode::OK.into_response(),
        UnmatchedRoutes::NotFound => BaseResponse::not_found().into_response(),
    }
}

/// Read and decode a create/update body.
///
/// Failures are logged and yield a zero-value record instead of rejecting
/// the request.
async fn read_registration(body: Body, limit: usize) -> Registration {
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Error reading request body: {}", e);
            Bytes::new()
        }
    };

    match serde_json::from_slice::<AddRegistrationRequest>(&bytes) {
        Ok(request) => request.registration,
        Err(e) => {
            warn!("Error decoding request body: {}", e);
            Registration::default()
        }
    }
}
