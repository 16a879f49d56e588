use axum::{
    Router,
    extract::{Json, Path, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::adapter::{Calculation, CalculatorForm, PRESETS, Preset, find_preset};
use crate::core::{Field, normalize, sanitize};
use crate::error::AppError;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Field text as typed; numbers are accepted too and treated as their text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            RawValue::Number(v) => v.to_string(),
            RawValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    #[serde(alias = "goal")]
    goal_amount: Option<RawValue>,
    #[serde(alias = "years", alias = "timeHorizon")]
    time_horizon_years: Option<RawValue>,
    #[serde(alias = "rate", alias = "annualReturn")]
    annual_return_percent: Option<RawValue>,
    #[serde(alias = "savings")]
    current_savings: Option<RawValue>,
}

impl ProjectPayload {
    fn into_fields(self) -> [(Field, Option<RawValue>); 4] {
        [
            (Field::GoalAmount, self.goal_amount),
            (Field::TimeHorizonYears, self.time_horizon_years),
            (Field::AnnualReturnPercent, self.annual_return_percent),
            (Field::CurrentSavings, self.current_savings),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct ValidatePayload {
    field: String,
    #[serde(default)]
    value: Option<RawValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldState {
    field: Field,
    text: String,
    /// Absent on live recalculations, which never validate; `null` clears.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Option<String>>,
}

/// Whether a form response carries field error state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ErrorState {
    Live,
    Committed,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormResponse {
    fields: Vec<FieldState>,
    #[serde(flatten)]
    calculation: Calculation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    field: Field,
    text: String,
    value: f64,
    valid: bool,
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetsResponse {
    presets: &'static [Preset],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/validate", post(validate_handler))
        .route("/api/presets", get(presets_handler))
        .route("/api/presets/:key", get(preset_handler))
        .route("/api/reset", get(reset_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "savings goal API listening");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let form = form_from_payload(payload);
    let calculation = form.calculate();
    debug!(domain = ?calculation.domain, result = ?calculation.result, "projected");
    json_response(
        StatusCode::OK,
        form_response(&form, calculation, ErrorState::Live),
    )
}

async fn validate_handler(Json(payload): Json<ValidatePayload>) -> Response {
    match validate_field(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => app_error_response(&e),
    }
}

async fn presets_handler() -> Response {
    json_response(StatusCode::OK, PresetsResponse { presets: &PRESETS })
}

async fn preset_handler(Path(key): Path<String>) -> Response {
    let preset = match find_preset(&key) {
        Ok(preset) => preset,
        Err(e) => return app_error_response(&e),
    };
    let mut form = CalculatorForm::new();
    let calculation = form.apply_preset(preset);
    json_response(
        StatusCode::OK,
        form_response(&form, calculation, ErrorState::Committed),
    )
}

async fn reset_handler() -> Response {
    let mut form = CalculatorForm::new();
    let calculation = form.reset();
    json_response(
        StatusCode::OK,
        form_response(&form, calculation, ErrorState::Committed),
    )
}

fn form_from_payload(payload: ProjectPayload) -> CalculatorForm {
    let mut form = CalculatorForm::new();
    for (field, value) in payload.into_fields() {
        if let Some(value) = value {
            form.input(field, &value.into_text());
        }
    }
    form
}

fn validate_field(payload: ValidatePayload) -> Result<ValidateResponse, AppError> {
    let field =
        Field::from_name(&payload.field).ok_or_else(|| AppError::UnknownField(payload.field))?;
    let raw = payload.value.map(RawValue::into_text).unwrap_or_default();
    let text = sanitize(field, &raw);
    let normalized = normalize(field, &text);
    Ok(ValidateResponse {
        field,
        text,
        value: normalized.value,
        valid: normalized.valid,
        message: normalized.message,
    })
}

fn form_response(
    form: &CalculatorForm,
    calculation: Calculation,
    errors: ErrorState,
) -> FormResponse {
    let fields = Field::ALL
        .into_iter()
        .map(|field| FieldState {
            field,
            text: form.text(field).to_string(),
            error: match errors {
                ErrorState::Live => None,
                ErrorState::Committed => Some(form.error(field).map(str::to_string)),
            },
        })
        .collect();
    FormResponse {
        fields,
        calculation,
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn app_error_response(err: &AppError) -> Response {
    let status = match err {
        AppError::UnknownPreset(_) => StatusCode::NOT_FOUND,
        AppError::UnknownField(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::Io(_) | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &err.to_string())
}
