//! Port for loading dashboard data.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{AdminDashboard, Error, MemberDashboard, User};

const DASHBOARD_FIXTURES_JSON: &str = include_str!("../../../fixtures/dashboards.json");

/// Read-side port for dashboard views.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Platform-wide operator view.
    async fn admin_dashboard(&self) -> Result<AdminDashboard, Error>;

    /// Traveler and sender view for `user`.
    async fn member_dashboard(&self, user: &User) -> Result<MemberDashboard, Error>;
}

#[derive(Deserialize)]
struct DashboardFixtures {
    admin: AdminDashboard,
    member: MemberDashboard,
}

/// Static sample dashboards. Every member sees the same figures.
#[derive(Debug, Clone)]
pub struct FixtureDashboardQuery {
    admin: AdminDashboard,
    member: MemberDashboard,
}

impl FixtureDashboardQuery {
    /// Decode the built-in sample dashboards.
    pub fn from_fixtures() -> Result<Self, serde_json::Error> {
        let DashboardFixtures { admin, member } = serde_json::from_str(DASHBOARD_FIXTURES_JSON)?;
        Ok(Self { admin, member })
    }
}

#[async_trait]
impl DashboardQuery for FixtureDashboardQuery {
    async fn admin_dashboard(&self) -> Result<AdminDashboard, Error> {
        Ok(self.admin.clone())
    }

    async fn member_dashboard(&self, _user: &User) -> Result<MemberDashboard, Error> {
        Ok(self.member.clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{AccountStatus, TravelStatus};
    use chrono::NaiveDate;

    #[test]
    fn fixtures_carry_the_sample_figures() {
        let query = FixtureDashboardQuery::from_fixtures().expect("fixtures decode");

        let stats = &query.admin.stats;
        assert_eq!(
            (stats.total_travelers, stats.total_senders, stats.total_travels),
            (1523, 1324, 4521)
        );
        assert_eq!(stats.total_packages, 8934);
        assert_eq!(stats.total_revenue, 125_430.0);

        let pending = &query.admin.recent_users[2];
        assert_eq!(pending.name, "Pierre Durand");
        assert_eq!(pending.status, AccountStatus::Pending);
        assert!(!pending.verified);

        let completed = &query.admin.recent_travels[1];
        assert_eq!(completed.route, "London → Tokyo");
        assert_eq!(completed.status, TravelStatus::Completed);

        let next = query
            .member
            .traveler_stats
            .next_travel
            .as_ref()
            .expect("next travel");
        assert_eq!(next.date, NaiveDate::from_ymd_opt(2024, 2, 15).expect("date"));
        assert_eq!(query.member.travels[1].price_per_kg, 20.0);
        assert_eq!(query.member.packages[1].rating, Some(5));
    }
}
