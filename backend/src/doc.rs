//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every handler under `inbound::http` together with the
//! domain types that appear in request and response bodies. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AccountStatus, AdminDashboard, AdminStats, Coordinates, DashboardMode, DashboardView, Error,
    ErrorCode, Locale, Location, MemberDashboard, Notification, NotificationKind, Package,
    PackageStatus, PackageSummary, PaymentStatus, Role, SenderStats, SessionDto, SignupRole,
    Travel, TravelActivity, TravelStatus, TravelSummary, TravelerStats, UpcomingTravel, UserDto,
    UserSummary,
};
use crate::inbound::http::translations::TranslationResponse;
use crate::inbound::http::users::{LoginRequest, SignupRequest};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie set by POST /api/v1/login and /api/v1/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Colipass backend API",
        description = "Cookie sessions, fixture credentials, translations and dashboards."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_session,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::translations::translation_table,
        crate::inbound::http::translations::translate,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        SignupRequest,
        SignupRole,
        Role,
        UserDto,
        SessionDto,
        Locale,
        TranslationResponse,
        DashboardView,
        AdminDashboard,
        MemberDashboard,
        DashboardMode,
        AccountStatus,
        UserSummary,
        TravelActivity,
        UpcomingTravel,
        TravelerStats,
        SenderStats,
        TravelSummary,
        PackageSummary,
        AdminStats,
        Coordinates,
        Location,
        Travel,
        TravelStatus,
        Package,
        PackageStatus,
        PaymentStatus,
        Notification,
        NotificationKind,
    )),
    tags(
        (name = "auth", description = "Login, signup, logout and session state"),
        (name = "dashboard", description = "Role-selected dashboards"),
        (name = "translations", description = "French and English interface text"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
