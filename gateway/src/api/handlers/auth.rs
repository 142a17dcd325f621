//! Login and registration. The authentication service's response is passed through whole so
//! its cookies and token headers reach the caller.

use crate::api::extract::JsonBody;
use crate::api::models::administrators::AdministratorRequest;
use crate::clients::ForwardedResponse;
use crate::errors::{ErrorResponse, OperationContext, Result};
use crate::AppState;
use axum::extract::State;

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    summary = "Log in",
    description = "Authenticates an administrator. The authentication service's status, headers and body are returned unchanged.",
    request_body = AdministratorRequest,
    responses(
        (status = 200, description = "Response of the authentication service"),
        (status = 400, description = "Rejected by the authentication service", body = ErrorResponse),
        (status = 500, description = "Authentication service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AdministratorRequest>,
) -> Result<ForwardedResponse> {
    state.clients.auth.login(&request).await.when("logging in")
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    summary = "Register",
    description = "Registers an administrator with an invitation code. The authentication service's status, headers and body are returned unchanged.",
    request_body = AdministratorRequest,
    responses(
        (status = 200, description = "Response of the authentication service"),
        (status = 400, description = "Rejected by the authentication service", body = ErrorResponse),
        (status = 500, description = "Authentication service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AdministratorRequest>,
) -> Result<ForwardedResponse> {
    state.clients.auth.register(&request).await.when("registering administrator")
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{assert_error, create_test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_login_response_is_forwarded_verbatim() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_partial_json(json!({"email": "ana@chiops.mx"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "JWT=eyJhbGciOi; Path=/; HttpOnly")
                    .insert_header("authorization", "Bearer eyJhbGciOi")
                    .set_body_json(json!({"username": "ana@chiops.mx", "access_token": "eyJhbGciOi"})),
            )
            .expect(1)
            .mount(&backend)
            .await;

        let response = server
            .post("/auth/login")
            .json(&json!({"email": "ana@chiops.mx", "password": "s3cr3t"}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("set-cookie"), "JWT=eyJhbGciOi; Path=/; HttpOnly");
        assert_eq!(response.header("authorization"), "Bearer eyJhbGciOi");
        response.assert_json(&json!({"username": "ana@chiops.mx", "access_token": "eyJhbGciOi"}));
    }

    #[tokio::test]
    async fn test_register_keeps_backend_success_status() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"email": "ana@chiops.mx"})))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server
            .post("/auth/register")
            .json(&json!({"email": "ana@chiops.mx", "password": "s3cr3t", "code": "7F3K9Q"}))
            .await;

        response.assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_auth_errors_are_reworded() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Credentials Do Not Match"})))
            .mount(&backend)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&backend)
            .await;

        let credentials = json!({"email": "ana@chiops.mx", "password": "wrong"});

        let response = server.post("/auth/login").json(&credentials).await;
        assert_error(
            &response,
            StatusCode::BAD_REQUEST,
            "Bad request when logging in: Credentials Do Not Match",
        );

        let response = server.post("/auth/register").json(&credentials).await;
        assert_error(
            &response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error when registering administrator: Bad Gateway",
        );
    }
}
