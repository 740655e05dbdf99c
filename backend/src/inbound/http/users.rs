//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users      {"firstName":"John","lastName":"Doe","email":"john@x.com","age":30}
//! PUT    /api/users/{id}
//! DELETE /api/users/{id}
//! ```
//!
//! Request bodies are validated here, before any port is called, so the
//! registry only ever sees well-formed drafts.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::{Age, EmailAddress, Error, PersonName, PhoneNumber, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional, parse_required};

/// Request body for creating or replacing a user.
///
/// Every field is optional at the JSON level so that missing values are
/// reported with field-level details rather than a generic parse failure.
/// `id` is accepted for compatibility and ignored; the path identifier (or
/// the registry, on create) always wins.
///
/// Example JSON:
/// `{"firstName":"John","lastName":"Doe","email":"john@x.com","age":30,"phoneNumber":"+15551234567"}`
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Ignored; identifiers are assigned by the registry.
    pub id: Option<i64>,
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "john@x.com")]
    pub email: Option<String>,
    #[schema(example = 30, minimum = 0, maximum = 150)]
    pub age: Option<i64>,
    #[schema(example = "+15551234567")]
    pub phone_number: Option<String>,
}

impl TryFrom<UserPayload> for UserDraft {
    type Error = Error;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        let first_name = parse_required(
            payload.first_name,
            FieldName::new("firstName"),
            PersonName::new,
        )?;
        let last_name = parse_required(
            payload.last_name,
            FieldName::new("lastName"),
            PersonName::new,
        )?;
        let email = parse_required(payload.email, FieldName::new("email"), EmailAddress::new)?;
        let age = parse_required(payload.age, FieldName::new("age"), Age::new)?;
        let phone_number = parse_optional(
            payload.phone_number,
            FieldName::new("phoneNumber"),
            PhoneNumber::new,
        )?;
        Ok(UserDraft::new(first_name, last_name, email, age, phone_number))
    }
}

/// Resolve a path identifier.
///
/// Negative values are well-formed integers that the registry never assigns,
/// so they resolve to `not_found` rather than `invalid_request`.
fn resolve_user_id(raw: i64) -> Result<UserId, Error> {
    u64::try_from(raw).map(UserId::new).map_err(|_| {
        Error::not_found(format!("user not found with id: {raw}")).with_details(json!({
            "id": raw,
            "code": "user_not_found",
        }))
    })
}

/// List all users in ascending identifier order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    debug!(count = users.len(), "listed users");
    Ok(web::Json(users))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id = resolve_user_id(path.into_inner())?;
    let user = state.users.find_user(id).await?;
    Ok(web::Json(user))
}

/// Register a new user. Any `id` in the body is ignored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Created user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Replace every field of an existing user, keeping its identifier.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let id = resolve_user_id(path.into_inner())?;
    let user = state.users_command.update_user(id, draft).await?;
    Ok(web::Json(user))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = resolve_user_id(path.into_inner())?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mount the user handlers under `/api/users`, with JSON and path
/// extraction failures mapped onto the shared error envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .app_data(web::JsonConfig::default().error_handler(super::error::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(super::error::path_error_handler))
            .service(list_users)
            .service(create_user)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    );
}
