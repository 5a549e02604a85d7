use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use best_time::config::AppConfig;
use best_time::{predict, AppContext, PredictError, PredictionResult};

use crate::api::{ApiPredictRequest, HealthResponse};

type SharedContext = Arc<AppContext>;

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let (config, config_path) =
        AppConfig::load(args.config.clone()).map_err(|err| err.to_string())?;
    if let Some(path) = config_path.as_ref() {
        if path.exists() {
            info!("configuration loaded from {}", path.display());
        }
    }

    let context: SharedContext = Arc::new(AppContext::load(&config));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/predict", post(predict_handler))
        .with_state(context);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!("listening on {addr}");
    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health(State(context): State<SharedContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        nlp_mode: context
            .extractor
            .as_ref()
            .map(|extractor| extractor.mode().label()),
        regressor_loaded: context.regressor.is_some(),
    })
}

async fn predict_handler(
    State(context): State<SharedContext>,
    Json(request): Json<ApiPredictRequest>,
) -> Result<Json<PredictionResult>, (StatusCode, String)> {
    let request = request
        .into_request()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let result = predict(&context, &request)
        .await
        .map_err(|err| (status_for(&err), err.to_string()))?;

    if let Some(audit) = context.audit.clone() {
        let platform = request.platform.clone();
        let caption = request.caption.clone();
        let engagement = result.predicted_engagement;
        tokio::task::spawn_blocking(move || {
            if let Err(err) = audit.record(&platform, &caption, engagement) {
                warn!("failed to record prediction: {err}");
            }
        });
    }

    Ok(Json(result))
}

fn status_for(err: &PredictError) -> StatusCode {
    match err {
        PredictError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        PredictError::Scoring(_) | PredictError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
