//! Responses for requests that match no route.

use crate::errors::Error;
use axum::http::{Method, Uri};

/// No route matches the request path.
pub async fn not_found(uri: Uri) -> Error {
    Error::NotFound {
        message: format!("Endpoint {} not found", uri.path()),
    }
}

/// A route matches the path, but not with this method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Error {
    Error::MethodNotAllowed {
        message: format!("Method {method} not allowed for {}", uri.path()),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{assert_error, create_test_app};
    use axum::http::StatusCode;

    #[test_log::test(tokio::test)]
    async fn test_unknown_path_is_not_found() {
        let (server, _backend) = create_test_app().await;

        let response = server.get("/nonexistent/path").await;
        assert_error(&response, StatusCode::NOT_FOUND, "Endpoint /nonexistent/path not found");
    }

    #[test_log::test(tokio::test)]
    async fn test_query_string_is_not_part_of_the_path() {
        let (server, _backend) = create_test_app().await;

        let response = server.post("/fleet/unknown?page=2").await;
        assert_error(&response, StatusCode::NOT_FOUND, "Endpoint /fleet/unknown not found");
    }

    #[test_log::test(tokio::test)]
    async fn test_wrong_method_is_not_allowed() {
        let (server, _backend) = create_test_app().await;

        let response = server.get("/driver/create").await;
        assert_error(&response, StatusCode::METHOD_NOT_ALLOWED, "Method GET not allowed for /driver/create");

        let response = server.put("/vehicle/delete/1HGCM82633A004352").await;
        assert_error(
            &response,
            StatusCode::METHOD_NOT_ALLOWED,
            "Method PUT not allowed for /vehicle/delete/1HGCM82633A004352",
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_backend_is_not_called_for_unrouted_requests() {
        let (server, backend) = create_test_app().await;

        server.delete("/driver/getall").await;
        server.get("/unknown").await;

        assert!(backend.received_requests().await.unwrap_or_default().is_empty());
    }
}
