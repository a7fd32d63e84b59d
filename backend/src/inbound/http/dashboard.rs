//! Dashboard handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```

use actix_web::{get, web};

use crate::domain::{DashboardView, Error, dashboard_for};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Dashboard for the logged-in user: the operator view for admins, the
/// unified member view for everyone else.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard for the session user", body = DashboardView),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardView>> {
    let view = dashboard_for(state.dashboards.as_ref(), session.user()).await?;
    Ok(web::Json(view))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};
    use crate::inbound::http::users::{LoginRequest, login};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    async fn dashboard_as(email: Option<&str>) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").service(login).service(dashboard)),
        )
        .await;

        let mut request = actix_test::TestRequest::get().uri("/api/v1/dashboard");
        if let Some(email) = email {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/login")
                    .set_json(LoginRequest {
                        email: email.into(),
                        password: "password".into(),
                    })
                    .to_request(),
            )
            .await;
            let cookie = response
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .expect("session cookie")
                .into_owned();
            request = request.cookie(cookie);
        }

        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_callers_get_401() {
        let (status, body) = dashboard_as(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "login required");
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_gets_the_operator_view() {
        let (status, body) = dashboard_as(Some("admin@example.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "admin");
        assert_eq!(body["stats"]["totalRevenue"], 125_430.0);
    }

    #[rstest]
    #[case("voyageur@example.com")]
    #[case("expediteur@example.com")]
    #[actix_web::test]
    async fn members_get_the_unified_view(#[case] email: &str) {
        let (status, body) = dashboard_as(Some(email)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "member");
        assert_eq!(body["activeMode"], "sender");
        assert_eq!(body["packages"][0]["trackingNumber"], "PT2024001");
    }
}
