//! Translation table handlers.
//!
//! ```text
//! GET /api/v1/translations/en
//! GET /api/v1/translations/fr/package.status.in_transit?default=En%20cours
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Locale};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Resolved translation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslationResponse {
    pub locale: Locale,
    #[schema(example = "nav.dashboard")]
    pub key: String,
    #[schema(example = "Tableau de bord")]
    pub value: String,
}

/// Optional fallback for a missing key.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TranslationQuery {
    /// Returned when the key has no text, if non-empty.
    pub default: Option<String>,
}

fn parse_locale(raw: &str) -> Result<Locale, Error> {
    raw.parse::<Locale>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "locale",
            "value": raw,
            "code": "unsupported_locale",
        }))
    })
}

/// Whole translation table for one locale.
#[utoipa::path(
    get,
    path = "/api/v1/translations/{locale}",
    params(("locale" = String, Path, description = "`fr` or `en`")),
    responses(
        (status = 200, description = "Nested translation table", body = Object),
        (status = 400, description = "Unsupported locale", body = Error)
    ),
    tags = ["translations"],
    operation_id = "translationTable",
    security([])
)]
#[get("/translations/{locale}")]
pub async fn translation_table(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    let locale = parse_locale(&path)?;
    Ok(web::Json(state.translations.table(locale).clone()))
}

/// Resolve one dotted key, falling back to `default` and then the key.
#[utoipa::path(
    get,
    path = "/api/v1/translations/{locale}/{key}",
    params(
        ("locale" = String, Path, description = "`fr` or `en`"),
        ("key" = String, Path, description = "Dotted key such as `nav.login`"),
        TranslationQuery
    ),
    responses(
        (status = 200, description = "Resolved text", body = TranslationResponse),
        (status = 400, description = "Unsupported locale", body = Error)
    ),
    tags = ["translations"],
    operation_id = "translate",
    security([])
)]
#[get("/translations/{locale}/{key}")]
pub async fn translate(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    query: web::Query<TranslationQuery>,
) -> ApiResult<web::Json<TranslationResponse>> {
    let (raw_locale, key) = path.into_inner();
    let locale = parse_locale(&raw_locale)?;
    let value = state
        .translations
        .translate(locale, &key, query.default.as_deref())
        .to_owned();
    Ok(web::Json(TranslationResponse { locale, key, value }))
}
