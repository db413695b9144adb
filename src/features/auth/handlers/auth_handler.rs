use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::features::users::dtos::UserResponseDto;
use crate::shared::types::ApiResponse;

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/User/Login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Login successful".to_string()),
    )))
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/User/Create",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("Account created successfully".to_string()),
        )),
    ))
}

/// Current user, role and permission table
#[utoipa::path(
    get,
    path = "/api/User/Me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<Json<ApiResponse<MeResponseDto>>> {
    Ok(Json(ApiResponse::success(Some(user.into()), None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::core::middleware;
    use crate::features::auth::services::TokenService;
    use crate::features::auth::{routes, JwtValidator};
    use crate::features::users::models::Role;
    use crate::features::users::UserService;
    use crate::shared::test_helpers::{lazy_pool, sample_user, test_auth_config};

    fn public_server() -> TestServer {
        let config = test_auth_config();
        let users = Arc::new(UserService::new(lazy_pool()));
        let tokens = Arc::new(TokenService::new(&config).unwrap());
        let service = Arc::new(AuthService::new(users, tokens));
        TestServer::new(routes::public_routes(service)).unwrap()
    }

    fn protected_server() -> TestServer {
        let validator = Arc::new(JwtValidator::new(&test_auth_config()));
        let app = routes::protected_routes().route_layer(axum::middleware::from_fn_with_state(
            validator,
            middleware::auth_middleware,
        ));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email() {
        let response = public_server()
            .post("/api/User/Login")
            .json(&json!({ "email": "not-an-email", "password": "whatever" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["status"], json!(false));
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Invalid email format"));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let response = public_server()
            .post("/api/User/Create")
            .json(&json!({
                "fullName": "Siti Rahma",
                "email": "siti@example.com",
                "password": "short"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Password must be at least 8 characters"));
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let response = protected_server().get("/api/User/Me").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Missing authorization header"));
    }

    #[tokio::test]
    async fn test_me_returns_claims_and_permissions() {
        let user = sample_user(Role::Admin);
        let token = TokenService::new(&test_auth_config())
            .unwrap()
            .issue(&user)
            .unwrap()
            .token;

        let response = protected_server()
            .get("/api/User/Me")
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["id"], json!(user.id.to_string()));
        assert_eq!(body["data"]["role"], json!(1));
        assert_eq!(body["data"]["permissions"]["canDeleteCategory"], json!(true));
    }

    #[tokio::test]
    async fn test_me_rejects_garbage_token() {
        let response = protected_server()
            .get("/api/User/Me")
            .authorization_bearer("not.a.jwt")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
