//! Assembles the actix application and binds the listener.
//!
//! Routes under `/api/v1` sit behind the cookie session middleware; health
//! probes and Swagger UI (debug builds only) do not.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub use metrics::MetricsLayer;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use colipass::Trace;
use colipass::inbound::http::health::{HealthState, live, ready};
use colipass::inbound::http::session_config::SessionSettings;
use colipass::inbound::http::state::HttpState;
use colipass::inbound::http::{dashboard, json_config, translations, users};
use state_builders::build_http_state;

/// Name of the cookie carrying the encrypted `user` slot.
const SESSION_COOKIE_NAME: &str = "session";

/// Inactivity window after which the browser drops the session cookie.
const SESSION_TTL: Duration = Duration::days(7);

fn cookie_sessions(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_http_only(true)
        .cookie_secure(settings.cookie_secure)
        .cookie_same_site(settings.same_site)
        .cookie_content_security(CookieContentSecurity::Private)
        .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
        .build()
}

/// Every `/api/v1` route.
fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::signup)
        .service(users::logout)
        .service(users::current_session)
        .service(dashboard::dashboard)
        .service(translations::translation_table)
        .service(translations::translate);
}

#[cfg(debug_assertions)]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use utoipa::OpenApi as _;
    utoipa_swagger_ui::SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", colipass::ApiDoc::openapi())
}

fn build_app(
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health)
        .app_data(state)
        .app_data(json_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(cookie_sessions(&session))
                .configure(api_routes),
        )
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(swagger_ui());

    app
}

/// Bind `config.bind_addr` and return the running server.
///
/// `health` turns ready once the socket is bound.
///
/// # Errors
/// Fails when the roster or the embedded fixtures cannot be decoded, or the
/// address cannot be bound.
pub fn create_server(
    health: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let state = build_http_state(&config)?;
    let ServerConfig {
        session,
        bind_addr,
        #[cfg(feature = "metrics")]
        metrics,
        ..
    } = config;

    let worker_health = health.clone();
    let server = HttpServer::new(move || {
        let app = build_app(worker_health.clone(), state.clone(), session.clone());
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());
        app
    })
    .bind(bind_addr)?
    .run();

    health.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use colipass::domain::TRACE_ID_HEADER;
    use colipass::inbound::http::session_config::key_fingerprint;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn config() -> ServerConfig {
        let key = Key::generate();
        let session = SessionSettings {
            fingerprint: key_fingerprint(&key),
            key,
            cookie_secure: false,
            same_site: SameSite::Lax,
        };
        ServerConfig::new(session, "127.0.0.1:0".parse().expect("loopback address"))
    }

    fn app_for(
        config: ServerConfig,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let state = build_http_state(&config).expect("fixture state builds");
        build_app(health, state, config.session)
    }

    #[rstest]
    #[actix_web::test]
    async fn login_cookie_unlocks_the_dashboard(config: ServerConfig) {
        let app = actix_test::init_service(app_for(config)).await;

        let logged_in = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({"email": "expediteur@example.com", "password": "password"}))
                .to_request(),
        )
        .await;
        assert_eq!(logged_in.status(), StatusCode::OK);
        assert!(logged_in.headers().contains_key(TRACE_ID_HEADER));
        let cookie = logged_in
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie")
            .into_owned();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(SESSION_TTL));

        let board = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(board.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(board).await;
        assert_eq!(body["kind"], "member");
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[case("/api/v1/translations/en/nav.login")]
    #[case("/api/v1/session")]
    #[actix_web::test]
    async fn anonymous_routes_answer(config: ServerConfig, #[case] uri: &str) {
        let app = actix_test::init_service(app_for(config)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_bodies_get_an_error_payload(config: ServerConfig) {
        let app = actix_test::init_service(app_for(config)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .insert_header(("content-type", "application/json"))
                .set_payload("{\"email\":")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    fn missing_roster_files_fail_startup(config: ServerConfig) {
        let config = config.with_roster_path(Some("/nonexistent/roster.json".into()));
        assert!(build_http_state(&config).is_err());
    }
}
