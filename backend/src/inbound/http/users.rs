//! Authentication and session handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"admin@example.com","password":"password"}
//! POST /api/v1/signup {"email":"new@x.com","password":"s3cret","confirmPassword":"s3cret",...}
//! POST /api/v1/logout
//! GET /api/v1/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, Registration, RegistrationForm, RegistrationValidationError,
    SessionDto, SignupRole, UserDto,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(value: LoginRequest) -> Self {
        Self::new(value.email, value.password)
    }
}

/// Signup request body for `POST /api/v1/signup`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: SignupRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl TryFrom<SignupRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        let SignupRequest {
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            role,
            phone,
        } = value;
        Self::confirmed(
            RegistrationForm {
                email,
                password,
                first_name,
                last_name,
                role,
                phone,
            },
            &confirm_password,
        )
    }
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    match &err {
        RegistrationValidationError::PasswordMismatch => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "confirmPassword", "code": "password_mismatch" })),
        RegistrationValidationError::UnsupportedRole { role } => {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "role", "value": role, "code": "unsupported_role" }))
        }
    }
}

/// Check credentials and log the user in.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserDto,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Login failed", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    mut session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserDto>> {
    let credentials = LoginCredentials::from(payload.into_inner());
    let user = state.auth.login(session.store_mut(), &credentials).await?;
    Ok(web::Json(user.into()))
}

/// Create an account and log it in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserDto,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Signup failed", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    mut session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_error)?;
    let user = state.auth.signup(session.store_mut(), registration)?;
    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

/// Log out. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Logged out")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, mut session: SessionContext) -> HttpResponse {
    state.auth.logout(session.store_mut());
    HttpResponse::NoContent().finish()
}

/// Current session state.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses((status = 200, description = "Session state", body = SessionDto)),
    tags = ["auth"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> web::Json<SessionDto> {
    web::Json(session.store().session().clone().into())
}
