//! User data model.
//!
//! A [`User`] is the identity record held by the session slot. Its JSON form
//! matches the record the web client keeps in local storage, so a slot written
//! by one adapter can be restored by another.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Highest rating a user can hold.
pub const RATING_MAX: f64 = 5.0;

/// Validation errors returned by the [`User`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    PaddedId,
    EmptyRoles,
    UnknownRole { role: String },
    InvalidRating,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::PaddedId => write!(f, "user id must not carry surrounding whitespace"),
            Self::EmptyRoles => write!(f, "a user must hold at least one role"),
            Self::UnknownRole { role } => write!(f, "unknown role '{role}'"),
            Self::InvalidRating => {
                write!(f, "rating must be a finite number between 0 and {RATING_MAX}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier.
///
/// Fixture users carry short numeric ids (`"1"`); registered users carry the
/// millisecond timestamp of their creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Identifier for an account created at `millis` since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::PaddedId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Platform role held by a user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Offers to carry packages on a trip.
    Traveler,
    /// Pays to have a package carried.
    Sender,
    /// Operates the platform.
    Admin,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Traveler => "traveler",
            Self::Sender => "sender",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traveler" => Ok(Self::Traveler),
            "sender" => Ok(Self::Sender),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole {
                role: other.to_owned(),
            }),
        }
    }
}

/// Non-empty set of roles.
///
/// Iteration and serialisation follow the declaration order of [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Build a role set, rejecting an empty collection.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, UserValidationError> {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Err(UserValidationError::EmptyRoles);
        }
        Ok(Self(roles))
    }

    /// A set holding exactly one role.
    pub fn single(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }

    /// Whether the set contains `role`.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Roles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Number of roles held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn with(mut self, role: Role) -> Self {
        self.0.insert(role);
        self
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(value: RoleSet) -> Self {
        value.0.into_iter().collect()
    }
}

impl TryFrom<Vec<Role>> for RoleSet {
    type Error = UserValidationError;

    fn try_from(value: Vec<Role>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Average rating left by counterparties.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Rating held by users nobody has rated yet.
    pub const UNRATED: Self = Self(0.0);

    /// Validate a rating value.
    pub fn new(value: f64) -> Result<Self, UserValidationError> {
        if !value.is_finite() || !(0.0..=RATING_MAX).contains(&value) {
            return Err(UserValidationError::InvalidRating);
        }
        Ok(Self(value))
    }

    /// Raw rating value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Rating> for f64 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = UserValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Personal details shared by fixture users and registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
}

/// Reputation counters accumulated on the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserStanding {
    pub verified: bool,
    pub rating: Rating,
    pub total_deliveries: u32,
    pub total_travels: u32,
}

impl UserStanding {
    /// Standing of a freshly registered account.
    pub const NEWCOMER: Self = Self {
        verified: false,
        rating: Rating::UNRATED,
        total_deliveries: 0,
        total_travels: 0,
    };
}

/// Application user.
///
/// ## Invariants
/// - `id` is non-empty and unpadded.
/// - `roles` holds at least one role.
/// - `rating` is finite and within `0..=5`.
/// - Admin status is derived from `roles`; the serialised `isAdmin` flag is
///   an output of that membership and, on input, only ever adds the admin role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    profile: UserProfile,
    roles: RoleSet,
    standing: UserStanding,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, profile: UserProfile, roles: RoleSet, standing: UserStanding) -> Self {
        Self {
            id,
            profile,
            roles,
            standing,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login email; compared verbatim by credential checks.
    pub fn email(&self) -> &str {
        self.profile.email.as_str()
    }

    pub fn first_name(&self) -> &str {
        self.profile.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.profile.last_name.as_str()
    }

    pub fn phone(&self) -> Option<&str> {
        self.profile.phone.as_deref()
    }

    pub fn profile_picture(&self) -> Option<&str> {
        self.profile.profile_picture.as_deref()
    }

    /// Roles held by the user.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Whether the user holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    /// Admin status, derived from role membership.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_verified(&self) -> bool {
        self.standing.verified
    }

    pub fn rating(&self) -> Rating {
        self.standing.rating
    }

    pub fn total_deliveries(&self) -> u32 {
        self.standing.total_deliveries
    }

    pub fn total_travels(&self) -> u32 {
        self.standing.total_travels
    }

    /// "First Last" as shown in greetings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }
}

/// Wire shape of [`User`], identical to the client's persisted record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[schema(example = "1")]
    id: String,
    #[schema(example = "voyageur@example.com")]
    email: String,
    #[schema(example = "Jean")]
    first_name: String,
    #[schema(example = "Dupont")]
    last_name: String,
    roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    verified: bool,
    #[schema(example = 4.8)]
    rating: f64,
    total_deliveries: u32,
    total_travels: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_admin: Option<bool>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let is_admin = value.is_admin().then_some(true);
        let User {
            id,
            profile,
            roles,
            standing,
        } = value;
        Self {
            id: id.into(),
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            roles: roles.into(),
            profile_picture: profile.profile_picture,
            phone: profile.phone,
            verified: standing.verified,
            rating: standing.rating.into(),
            total_deliveries: standing.total_deliveries,
            total_travels: standing.total_travels,
            is_admin,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            email,
            first_name,
            last_name,
            roles,
            profile_picture,
            phone,
            verified,
            rating,
            total_deliveries,
            total_travels,
            is_admin,
        } = value;

        let mut roles = RoleSet::new(roles)?;
        if is_admin == Some(true) {
            roles = roles.with(Role::Admin);
        }

        Ok(User::new(
            UserId::try_from(id)?,
            UserProfile {
                email,
                first_name,
                last_name,
                phone,
                profile_picture,
            },
            roles,
            UserStanding {
                verified,
                rating: Rating::new(rating)?,
                total_deliveries,
                total_travels,
            },
        ))
    }
}

#[cfg(test)]
mod tests;
