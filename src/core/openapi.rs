use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, policy};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::complaints::{dtos as complaints_dtos, handlers as complaints_handlers};
use crate::features::statuses::{dtos as statuses_dtos, handlers as statuses_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::register,
        auth_handlers::get_me,
        // Users (admin)
        users_handlers::list_users,
        users_handlers::update_user_role,
        // Complaints
        complaints_handlers::list_complaints,
        complaints_handlers::list_user_complaints,
        complaints_handlers::get_complaint,
        complaints_handlers::get_directions,
        complaints_handlers::submit_complaint,
        complaints_handlers::update_complaint_status,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Statuses
        statuses_handlers::list_statuses,
        statuses_handlers::create_status,
        statuses_handlers::update_status,
        statuses_handlers::delete_status,
    ),
    components(
        schemas(
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::RegisterRequestDto,
            auth_dtos::MeResponseDto,
            policy::Permissions,
            ApiResponse<auth_dtos::LoginResponseDto>,
            ApiResponse<auth_dtos::MeResponseDto>,
            // Users
            users_dtos::UserResponseDto,
            users_dtos::UpdateUserRoleDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Complaints
            complaints_dtos::ComplaintResponseDto,
            complaints_dtos::SubmitComplaintForm,
            complaints_dtos::UpdateComplaintStatusDto,
            complaints_dtos::DirectionsResponseDto,
            ApiResponse<complaints_dtos::ComplaintResponseDto>,
            ApiResponse<Vec<complaints_dtos::ComplaintResponseDto>>,
            ApiResponse<complaints_dtos::DirectionsResponseDto>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryRequestDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Statuses
            statuses_dtos::StatusResponseDto,
            statuses_dtos::StatusRequestDto,
            ApiResponse<statuses_dtos::StatusResponseDto>,
            ApiResponse<Vec<statuses_dtos::StatusResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Login, registration and current user"),
        (name = "users", description = "User administration (admin only)"),
        (name = "complaints", description = "Citizen complaints and status triage"),
        (name = "categories", description = "Complaint categories"),
        (name = "statuses", description = "Complaint statuses"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Complaint Desk API",
        version = "0.1.0",
        description = "API documentation for Complaint Desk",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/User/Login",
            "/api/User/Create",
            "/api/User/Me",
            "/api/User/GetAll",
            "/api/User/UpdateRole/{id}",
            "/api/Complaint/GetAll",
            "/api/Complaint/GetAllUserComplaints",
            "/api/Complaint/Get/{id}",
            "/api/Complaint/Directions/{id}",
            "/api/Complaint/Submit",
            "/api/Complaint/UpdateStatus/{id}",
            "/api/Category/GetAll",
            "/api/Category/Create",
            "/api/Category/Update/{id}",
            "/api/Category/Delete/{id}",
            "/api/Status/GetAll",
            "/api/Status/Create",
            "/api/Status/Update/{id}",
            "/api/Status/Delete/{id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "{}", expected);
        }
        assert!(doc
            .components
            .as_ref()
            .unwrap()
            .security_schemes
            .contains_key("bearer_auth"));
    }
}
