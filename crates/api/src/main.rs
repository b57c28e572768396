use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use replyrate_core::domain::forecast::{ForecastInputs, ForecastResults};
use replyrate_core::input::{PercentBounds, RawInputs};
use replyrate_core::report::{ForecastReport, ResultCard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = replyrate_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let state = AppState {
        currency_symbol: settings.currency_symbol.clone(),
        percent_bounds: settings.percent_bounds,
    };

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!(%addr, "api listening");

    if let Err(e) = serve(addr, app(state)).await {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "api server stopped");
        return Err(e);
    }
    Ok(())
}

async fn serve(addr: std::net::SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/forecast/defaults", get(get_defaults))
        .route("/forecast", post(post_forecast))
        .route("/forecast/form", post(post_forecast_form))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    currency_symbol: String,
    percent_bounds: PercentBounds,
}

/// Previous results travel with the request; the server keeps no history.
#[derive(Debug, Deserialize)]
struct ForecastRequest<I> {
    inputs: I,
    #[serde(default)]
    previous: Option<ForecastResults>,
}

#[derive(Debug, Serialize)]
struct ApiForecast {
    calculated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: ForecastReport,
    cards: Vec<ResultCard>,
}

impl ApiForecast {
    fn build(state: &AppState, inputs: ForecastInputs, previous: Option<ForecastResults>) -> Self {
        let report = ForecastReport::new(inputs, previous);
        tracing::debug!(
            roi = report.results.projected_roi,
            has_previous = previous.is_some(),
            "forecast served"
        );
        Self {
            calculated_at: Utc::now(),
            cards: report.cards(&state.currency_symbol),
            report,
        }
    }
}

async fn get_defaults() -> Json<ForecastInputs> {
    Json(ForecastInputs::default())
}

async fn post_forecast(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest<ForecastInputs>>,
) -> Json<ApiForecast> {
    Json(ApiForecast::build(&state, req.inputs, req.previous))
}

async fn post_forecast_form(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest<RawInputs>>,
) -> Json<ApiForecast> {
    let inputs = req.inputs.normalize(&state.percent_bounds);
    Json(ApiForecast::build(&state, inputs, req.previous))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &replyrate_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use replyrate_core::trend::Trend;
    use serde_json::json;

    fn state() -> AppState {
        AppState {
            currency_symbol: "$".to_string(),
            percent_bounds: PercentBounds::default(),
        }
    }

    #[tokio::test]
    async fn defaults_endpoint_returns_initial_inputs() {
        let Json(inputs) = get_defaults().await;
        assert_eq!(inputs, ForecastInputs::default());
    }

    #[tokio::test]
    async fn forecast_without_previous_is_neutral() {
        let req: ForecastRequest<ForecastInputs> = serde_json::from_value(json!({
            "inputs": {
                "total_prospects": 10000,
                "open_rate": 50,
                "reply_rate": 10,
                "meeting_conversion": 20,
                "avg_deal_value": 500
            }
        }))
        .unwrap();

        let Json(body) = post_forecast(State(state()), Json(req)).await;
        assert_eq!(body.report.results.estimated_meetings, 100.0);
        assert_eq!(body.report.trends.projected_roi, Trend::Neutral);
        assert_eq!(body.cards[3].value, "$50,000");
    }

    #[tokio::test]
    async fn forecast_compares_against_previous() {
        let req: ForecastRequest<ForecastInputs> = serde_json::from_value(json!({
            "inputs": {
                "total_prospects": 12000,
                "open_rate": 50,
                "reply_rate": 10,
                "meeting_conversion": 20,
                "avg_deal_value": 500
            },
            "previous": {
                "estimated_opens": 5000,
                "estimated_replies": 500,
                "estimated_meetings": 100,
                "projected_roi": 50000
            }
        }))
        .unwrap();

        let Json(body) = post_forecast(State(state()), Json(req)).await;
        assert_eq!(body.report.results.estimated_opens, 6_000.0);
        assert_eq!(body.report.trends.estimated_opens, Trend::Up);
        assert_eq!(body.cards[0].trend, Trend::Up);
    }

    #[tokio::test]
    async fn form_endpoint_normalizes_text() {
        let req: ForecastRequest<RawInputs> = serde_json::from_value(json!({
            "inputs": {
                "total_prospects": "1000abc",
                "open_rate": "250",
                "reply_rate": "",
                "meeting_conversion": "20"
            }
        }))
        .unwrap();

        let Json(body) = post_forecast_form(State(state()), Json(req)).await;
        assert_eq!(body.report.inputs.total_prospects, 1_000.0);
        assert_eq!(body.report.inputs.open_rate, 100.0);
        assert_eq!(body.report.inputs.avg_deal_value, 0.0);
        assert_eq!(body.report.results.estimated_opens, 1_000.0);
        assert_eq!(body.report.results.estimated_replies, 0.0);
        assert_eq!(body.cards[3].value, "$0");
    }

    #[test]
    fn response_flattens_report_fields() {
        let body = ApiForecast::build(&state(), ForecastInputs::default(), None);
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("calculated_at").is_some());
        assert_eq!(value["results"]["projected_roi"], json!(50000.0));
        assert_eq!(value["trends"]["estimated_opens"], json!("neutral"));
        assert!(value["previous"].is_null());
        assert_eq!(value["cards"].as_array().map(Vec::len), Some(4));
    }
}
