//! Domain primitives, aggregates, and use cases.
//!
//! Purpose: hold the transport-agnostic core. Types are immutable once built
//! and document their invariants and serialisation contracts in Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: failure payload shared by every adapter.
//! - `User`, `Role`, `RoleSet`: identity record held by a session.
//! - `SessionStore`: one client's session mirrored into a `ports::SessionSlot`.
//! - `AuthService`: login, signup, and logout over a `SessionStore`.
//! - `TranslationCatalogue` / `Translator`: interface copy lookup.
//! - `DashboardView` and `dashboard_for`: role-selected dashboard data.

pub mod auth;
pub mod auth_service;
pub mod dashboard;
pub mod error;
pub mod listings;
pub mod localization;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, Registration, RegistrationForm, RegistrationValidationError, SignupRole,
};
pub use self::auth_service::{AuthService, LOGIN_FAILED, SIGNUP_FAILED};
pub use self::dashboard::{
    AccountStatus, AdminDashboard, DashboardMode, DashboardView, LOGIN_REQUIRED, MemberDashboard,
    PackageSummary, SenderStats, TravelActivity, TravelSummary, TravelerStats, UpcomingTravel,
    UserSummary, dashboard_for,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listings::{
    AdminStats, Coordinates, Location, Notification, NotificationKind, Package, PackageStatus,
    PaymentStatus, Travel, TravelStatus,
};
pub use self::localization::{Locale, TranslationCatalogue, Translator, UnsupportedLocale};
pub use self::session::{Session, SessionDto, SessionStore, SessionStoreError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    RATING_MAX, Rating, Role, RoleSet, User, UserDto, UserId, UserProfile, UserStanding,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use colipass::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
