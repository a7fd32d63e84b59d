//! Marketplace record shapes: trips, packages, notifications, platform stats.
//!
//! Nothing in the backend creates, mutates, or persists these records. They
//! fix the vocabulary (statuses, locations, counters) that dashboard rows are
//! built from and serialise to the camelCase layout the web client renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// City and country of a trip endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[schema(example = "Paris")]
    pub city: String,
    #[schema(example = "France")]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// Location without airport or coordinates.
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            airport: None,
            coordinates: None,
        }
    }
}

/// Lifecycle of a published trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TravelStatus {
    Active,
    Full,
    Completed,
    Cancelled,
}

/// Trip offered by a traveler with spare luggage capacity.
///
/// Related records are referenced by id rather than embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    pub id: String,
    #[serde(rename = "travelerID")]
    pub traveler_id: String,
    pub origin: Location,
    pub destination: Location,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
    /// Kilograms offered in total.
    pub max_weight: f64,
    pub price_per_kg: f64,
    /// Kilograms still free.
    pub available_space: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TravelStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    pub passport_verified: bool,
    pub created_at: DateTime<Utc>,
    /// Ids of the packages booked on this trip.
    #[serde(default)]
    pub bookings: Vec<String>,
}

/// Lifecycle of a package from booking to hand-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Pending,
    Accepted,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
}

/// Escrow state of the sender's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Escrowed,
    Released,
    Refunded,
}

/// Parcel a sender booked on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    #[serde(rename = "senderID")]
    pub sender_id: String,
    #[serde(rename = "travelID")]
    pub travel_id: String,
    pub description: String,
    /// Kilograms.
    pub weight: f64,
    /// Declared value of the contents.
    pub value: f64,
    pub category: String,
    pub fragile: bool,
    pub urgent: bool,
    pub pickup_address: String,
    pub delivery_address: String,
    pub status: PackageStatus,
    pub total_price: f64,
    pub platform_fee: f64,
    pub traveler_payment: f64,
    pub payment_status: PaymentStatus,
    pub tracking_number: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

/// Severity of an in-app notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// In-app notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

/// Platform-wide counters shown to operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: u32,
    pub total_travelers: u32,
    pub total_senders: u32,
    pub total_travels: u32,
    pub total_packages: u32,
    pub total_revenue: f64,
    /// Percentage, month over month.
    pub monthly_growth: f64,
    pub active_users: u32,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(PackageStatus::PickedUp, "picked_up")]
    #[case(PackageStatus::InTransit, "in_transit")]
    #[case(PackageStatus::Delivered, "delivered")]
    fn package_status_uses_snake_case(#[case] status: PackageStatus, #[case] wire: &str) {
        assert_eq!(serde_json::to_value(status).expect("status"), json!(wire));
    }

    #[rstest]
    fn notification_kind_serialises_as_type() {
        let notification = Notification {
            id: "n1".to_owned(),
            user_id: "1".to_owned(),
            title: "Booked".to_owned(),
            message: "A sender booked your trip".to_owned(),
            kind: NotificationKind::Success,
            read: false,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            action_url: None,
        };
        let value = serde_json::to_value(notification).expect("notification");
        assert_eq!(value["type"], json!("success"));
        assert_eq!(value["userID"], json!("1"));
        assert!(value.get("actionUrl").is_none());
    }

    #[rstest]
    fn location_omits_missing_coordinates() {
        let value = serde_json::to_value(Location::new("Lyon", "France")).expect("location");
        assert_eq!(value, json!({"city": "Lyon", "country": "France"}));
    }
}
