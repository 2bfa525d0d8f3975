//! Route templates of the emulated registry API and request classification.
//!
//! Templates are matched loosely against the request path: the collection
//! routes by suffix and the by-id and ping routes by substring, so the double
//! answers no matter what prefix a client puts in front of `/api/v3`.

use axum::http::Method;

pub const API_VERSION: &str = "v3";
pub const API_BASE: &str = "/api/v3";
pub const API_PING_ROUTE: &str = "/api/v3/ping";
pub const API_REGISTER_ROUTE: &str = "/api/v3/registry";
pub const API_ALL_REGISTRATION_ROUTE: &str = "/api/v3/registry/all";
pub const API_REGISTRATION_BY_SERVICE_ID_ROUTE: &str = "/api/v3/registry/serviceId/";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// A registry operation a request maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Register,
    Update,
    ListAll,
    Get(String),
    Delete(String),
    Ping,
}

impl Route {
    /// Classify a request by method and raw path.
    ///
    /// The first template the path matches decides the outcome; if that
    /// template does not serve `method`, the request is unmatched even when a
    /// later template would have accepted it.
    pub fn classify(method: &Method, path: &str) -> Option<Route> {
        if path.ends_with(API_REGISTER_ROUTE) {
            match *method {
                Method::POST => Some(Route::Register),
                Method::PUT => Some(Route::Update),
                _ => None,
            }
        } else if path.ends_with(API_ALL_REGISTRATION_ROUTE) {
            match *method {
                Method::GET => Some(Route::ListAll),
                _ => None,
            }
        } else if let Some(service_id) = service_id_from_path(path) {
            match *method {
                Method::GET => Some(Route::Get(service_id.to_string())),
                Method::DELETE => Some(Route::Delete(service_id.to_string())),
                _ => None,
            }
        } else if path.contains(API_PING_ROUTE) {
            match *method {
                Method::GET => Some(Route::Ping),
                _ => None,
            }
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Register => "register",
            Route::Update => "update",
            Route::ListAll => "list_all",
            Route::Get(_) => "get_by_id",
            Route::Delete(_) => "delete_by_id",
            Route::Ping => "ping",
        }
    }
}

/// Everything after the first by-service-id template in `path`, verbatim.
fn service_id_from_path(path: &str) -> Option<&str> {
    path.find(API_REGISTRATION_BY_SERVICE_ID_ROUTE)
        .map(|start| &path[start + API_REGISTRATION_BY_SERVICE_ID_ROUTE.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_routes() {
        assert_eq!(
            Route::classify(&Method::POST, "/api/v3/registry"),
            Some(Route::Register)
        );
        assert_eq!(
            Route::classify(&Method::PUT, "/api/v3/registry"),
            Some(Route::Update)
        );
        assert_eq!(Route::classify(&Method::GET, "/api/v3/registry"), None);
        assert_eq!(Route::classify(&Method::DELETE, "/api/v3/registry"), None);
    }

    #[test]
    fn test_suffix_match_allows_prefix() {
        assert_eq!(
            Route::classify(&Method::POST, "/proxy/api/v3/registry"),
            Some(Route::Register)
        );
        assert_eq!(
            Route::classify(&Method::GET, "/proxy/api/v3/registry/all"),
            Some(Route::ListAll)
        );
        assert_eq!(Route::classify(&Method::POST, "/api/v3/registry/"), None);
    }

    #[test]
    fn test_list_all_route() {
        assert_eq!(
            Route::classify(&Method::GET, "/api/v3/registry/all"),
            Some(Route::ListAll)
        );
        assert_eq!(Route::classify(&Method::POST, "/api/v3/registry/all"), None);
    }

    #[test]
    fn test_service_id_routes() {
        assert_eq!(
            Route::classify(&Method::GET, "/api/v3/registry/serviceId/svc1"),
            Some(Route::Get("svc1".to_string()))
        );
        assert_eq!(
            Route::classify(&Method::DELETE, "/api/v3/registry/serviceId/svc1"),
            Some(Route::Delete("svc1".to_string()))
        );
        assert_eq!(
            Route::classify(&Method::PUT, "/api/v3/registry/serviceId/svc1"),
            None
        );
    }

    #[test]
    fn test_service_id_is_not_decoded() {
        assert_eq!(
            Route::classify(&Method::GET, "/api/v3/registry/serviceId/a%20b/c"),
            Some(Route::Get("a%20b/c".to_string()))
        );
        assert_eq!(
            Route::classify(&Method::GET, "/api/v3/registry/serviceId/"),
            Some(Route::Get(String::new()))
        );
    }

    #[test]
    fn test_service_id_drops_text_before_template() {
        assert_eq!(
            Route::classify(&Method::GET, "/p/api/v3/registry/serviceId/x"),
            Some(Route::Get("x".to_string()))
        );
        assert_eq!(
            Route::classify(&Method::DELETE, "/gateway/core/api/v3/registry/serviceId/svc1"),
            Some(Route::Delete("svc1".to_string()))
        );
    }

    #[test]
    fn test_ping_route() {
        assert_eq!(Route::classify(&Method::GET, "/api/v3/ping"), Some(Route::Ping));
        assert_eq!(
            Route::classify(&Method::GET, "/api/v3/ping/extra"),
            Some(Route::Ping)
        );
        assert_eq!(Route::classify(&Method::POST, "/api/v3/ping"), None);
    }

    #[test]
    fn test_unmatched_paths() {
        assert_eq!(Route::classify(&Method::GET, "/"), None);
        assert_eq!(Route::classify(&Method::GET, "/api/v2/ping"), None);
        assert_eq!(Route::classify(&Method::GET, "/api/v3/registry/serviceid/x"), None);
    }
}
