//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn traveler_record() -> serde_json::Value {
    json!({
        "id": "1",
        "email": "voyageur@example.com",
        "firstName": "Jean",
        "lastName": "Dupont",
        "roles": ["traveler", "sender"],
        "verified": true,
        "rating": 4.8,
        "totalDeliveries": 15,
        "totalTravels": 12,
        "phone": "+33123456789"
    })
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("   ", UserValidationError::EmptyId)]
#[case(" 42", UserValidationError::PaddedId)]
fn user_id_rejects_blank_or_padded(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
#[case("1")]
#[case("1718900000000")]
fn user_id_accepts_plain_strings(#[case] raw: &str) {
    assert_eq!(UserId::new(raw).expect("valid id").as_ref(), raw);
}

#[rstest]
#[case(-0.1)]
#[case(5.01)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn rating_rejects_out_of_range(#[case] value: f64) {
    assert_eq!(
        Rating::new(value).expect_err("invalid rating"),
        UserValidationError::InvalidRating
    );
}

#[rstest]
fn role_set_rejects_empty() {
    assert_eq!(
        RoleSet::new([]).expect_err("empty roles"),
        UserValidationError::EmptyRoles
    );
}

#[rstest]
fn role_set_orders_and_deduplicates() {
    let roles = RoleSet::new([Role::Sender, Role::Traveler, Role::Sender]).expect("roles");
    assert_eq!(roles.iter().collect::<Vec<_>>(), vec![Role::Traveler, Role::Sender]);
    assert_eq!(roles.len(), 2);
}

#[rstest]
#[case("traveler", Role::Traveler)]
#[case("sender", Role::Sender)]
#[case("admin", Role::Admin)]
fn role_parses_wire_names(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>().expect("known role"), expected);
    assert_eq!(expected.to_string(), raw);
}

#[rstest]
fn role_rejects_unknown_names() {
    assert!(matches!(
        "Traveler".parse::<Role>(),
        Err(UserValidationError::UnknownRole { .. })
    ));
}

#[rstest]
fn decodes_persisted_record(traveler_record: serde_json::Value) {
    let user: User = serde_json::from_value(traveler_record).expect("valid record");
    assert_eq!(user.id().as_ref(), "1");
    assert_eq!(user.email(), "voyageur@example.com");
    assert_eq!(user.full_name(), "Jean Dupont");
    assert!(user.has_role(Role::Traveler));
    assert!(user.has_role(Role::Sender));
    assert!(!user.is_admin());
    assert!(user.is_verified());
    assert_eq!(user.rating().value(), 4.8);
    assert_eq!(user.total_deliveries(), 15);
    assert_eq!(user.total_travels(), 12);
    assert_eq!(user.phone(), Some("+33123456789"));
    assert_eq!(user.profile_picture(), None);
}

#[rstest]
fn encoding_round_trips_the_persisted_layout(traveler_record: serde_json::Value) {
    let user: User = serde_json::from_value(traveler_record.clone()).expect("valid record");
    let encoded = serde_json::to_value(&user).expect("user serialises");
    assert_eq!(encoded, traveler_record);
}

#[rstest]
fn admin_flag_is_derived_from_roles() {
    let user: User = serde_json::from_value(json!({
        "id": "3",
        "email": "admin@example.com",
        "firstName": "Admin",
        "lastName": "System",
        "roles": ["admin"],
        "verified": true,
        "rating": 5.0,
        "totalDeliveries": 0,
        "totalTravels": 0
    }))
    .expect("valid record");

    assert!(user.is_admin());
    let encoded = serde_json::to_value(&user).expect("user serialises");
    assert_eq!(encoded.get("isAdmin"), Some(&json!(true)));
}

#[rstest]
fn admin_flag_lifts_admin_role_on_decode(mut traveler_record: serde_json::Value) {
    traveler_record["isAdmin"] = json!(true);
    let user: User = serde_json::from_value(traveler_record).expect("valid record");
    assert!(user.is_admin());
    assert_eq!(
        user.roles().iter().collect::<Vec<_>>(),
        vec![Role::Traveler, Role::Sender, Role::Admin]
    );
}

#[rstest]
fn false_admin_flag_is_not_written_back(mut traveler_record: serde_json::Value) {
    traveler_record["isAdmin"] = json!(false);
    let user: User = serde_json::from_value(traveler_record).expect("valid record");
    let encoded = serde_json::to_value(&user).expect("user serialises");
    assert!(encoded.get("isAdmin").is_none());
}

#[rstest]
#[case("roles", json!([]))]
#[case("roles", json!(["pilot"]))]
#[case("id", json!(""))]
#[case("rating", json!(7.5))]
fn decoding_rejects_invalid_fields(
    mut traveler_record: serde_json::Value,
    #[case] field: &str,
    #[case] value: serde_json::Value,
) {
    traveler_record[field] = value;
    assert!(serde_json::from_value::<User>(traveler_record).is_err());
}
