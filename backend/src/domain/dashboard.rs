//! Dashboard views and the rule that picks one for the session user.
//!
//! Operators (users holding [`Role::Admin`]) see platform-wide statistics and
//! recent activity; everyone else sees the unified member dashboard with both
//! the traveler and the sender perspective. Anonymous callers see nothing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::DashboardQuery;
use crate::domain::{
    AdminStats, Error, Location, PackageStatus, Role, TravelStatus, User,
};

/// Message returned when no user is logged in.
pub const LOGIN_REQUIRED: &str = "login required";

/// Upcoming departure highlighted on the traveler panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpcomingTravel {
    /// Route label, for example `Paris → New York`.
    pub destination: String,
    pub date: NaiveDate,
    /// Packages booked on the trip.
    pub packages: u32,
}

/// Headline numbers for the traveler perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelerStats {
    pub total_travels: u32,
    pub active_travels: u32,
    pub completed_deliveries: u32,
    pub total_earnings: f64,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_travel: Option<UpcomingTravel>,
}

/// Headline numbers for the sender perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SenderStats {
    pub total_packages: u32,
    pub active_packages: u32,
    pub delivered_packages: u32,
    pub total_spent: f64,
    pub pending_payments: u32,
    /// Estimated saving against conventional couriers.
    pub saved_money: f64,
}

/// Trip row on the member dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelSummary {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    pub departure_date: DateTime<Utc>,
    pub status: TravelStatus,
    pub available_space: f64,
    pub max_weight: f64,
    pub price_per_kg: f64,
    pub bookings: u32,
}

/// Package row on the member dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub id: String,
    pub description: String,
    pub weight: f64,
    pub status: PackageStatus,
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    /// Display name of the carrying traveler.
    pub traveler: String,
    pub departure_date: NaiveDate,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Perspective the member dashboard opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardMode {
    Traveler,
    #[default]
    Sender,
}

/// Unified dashboard for travelers and senders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDashboard {
    pub traveler_stats: TravelerStats,
    pub sender_stats: SenderStats,
    pub travels: Vec<TravelSummary>,
    pub packages: Vec<PackageSummary>,
    #[serde(default)]
    pub active_mode: DashboardMode,
}

/// Moderation state of an account as shown to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Pending,
    Suspended,
}

/// Recently joined account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
    pub join_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_travels: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_packages: Option<u32>,
    pub rating: f64,
    pub status: AccountStatus,
}

/// Recently published trip with its booking revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TravelActivity {
    pub id: String,
    pub traveler: String,
    pub route: String,
    pub date: NaiveDate,
    pub status: TravelStatus,
    pub bookings: u32,
    pub revenue: f64,
}

/// Operator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub recent_users: Vec<UserSummary>,
    pub recent_travels: Vec<TravelActivity>,
}

/// Dashboard selected for a user, tagged with `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DashboardView {
    Admin(AdminDashboard),
    Member(MemberDashboard),
}

/// Pick and load the dashboard for the session user.
///
/// Admin membership is read from the role set; `None` fails with
/// [`crate::domain::ErrorCode::Unauthorized`].
pub async fn dashboard_for(
    query: &dyn DashboardQuery,
    user: Option<&User>,
) -> Result<DashboardView, Error> {
    let Some(user) = user else {
        return Err(Error::unauthorized(LOGIN_REQUIRED));
    };
    if user.is_admin() {
        query.admin_dashboard().await.map(DashboardView::Admin)
    } else {
        query.member_dashboard(user).await.map(DashboardView::Member)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{FixtureDashboardQuery, MockDashboardQuery, fixture_roster};
    use rstest::{fixture, rstest};

    #[fixture]
    fn roster() -> Vec<User> {
        fixture_roster().expect("fixture roster decodes")
    }

    #[fixture]
    fn query() -> FixtureDashboardQuery {
        FixtureDashboardQuery::from_fixtures().expect("dashboard fixtures decode")
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_callers_are_denied(query: FixtureDashboardQuery) {
        let err = dashboard_for(&query, None).await.expect_err("denied");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), LOGIN_REQUIRED);
    }

    #[rstest]
    #[tokio::test]
    async fn admins_get_platform_statistics(roster: Vec<User>, query: FixtureDashboardQuery) {
        let admin = roster.iter().find(|user| user.is_admin()).expect("admin");
        let DashboardView::Admin(view) = dashboard_for(&query, Some(admin)).await.expect("view")
        else {
            panic!("expected admin dashboard");
        };
        assert_eq!(view.stats.total_users, 2847);
        assert_eq!(view.stats.monthly_growth, 15.3);
        assert_eq!(view.recent_users.len(), 3);
        assert_eq!(view.recent_travels.len(), 2);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[tokio::test]
    async fn members_get_the_unified_dashboard(
        roster: Vec<User>,
        query: FixtureDashboardQuery,
        #[case] index: usize,
    ) {
        let member = &roster[index];
        let DashboardView::Member(view) = dashboard_for(&query, Some(member)).await.expect("view")
        else {
            panic!("expected member dashboard");
        };
        assert_eq!(view.active_mode, DashboardMode::Sender);
        assert_eq!(view.traveler_stats.total_travels, 12);
        assert_eq!(view.sender_stats.saved_money, 850.0);
        assert_eq!(view.packages[0].status, PackageStatus::InTransit);
    }

    #[rstest]
    #[tokio::test]
    async fn query_failures_propagate(roster: Vec<User>) {
        let mut query = MockDashboardQuery::new();
        query
            .expect_member_dashboard()
            .times(1)
            .return_once(|_| Err(Error::service_unavailable("dashboards offline")));

        let err = dashboard_for(&query, Some(&roster[0]))
            .await
            .expect_err("failure");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn views_are_tagged_by_kind(roster: Vec<User>, query: FixtureDashboardQuery) {
        let view = dashboard_for(&query, Some(&roster[2])).await.expect("view");
        let value = serde_json::to_value(view).expect("view serialises");
        assert_eq!(value["kind"], serde_json::json!("admin"));
        assert_eq!(value["stats"]["activeUsers"], serde_json::json!(1247));
    }
}
