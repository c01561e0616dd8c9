use crate::analyzer::SentimentRelay;
use reqwest::StatusCode;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use texta_primitives::schemas::api_schemas::{APIError, AnalyzeRequest, BatchAnalyzeRequest};
use texta_primitives::texta_utils::texta_logging::{texta_log, TextaLogLevel, TextaLogOption};
use warp::Filter;

const MAX_BODY_BYTES: u64 = 1024 * 1024 * 4; // 4MB

fn with_relay(relay: Arc<SentimentRelay>) -> impl Filter<Extract = (Arc<SentimentRelay>,), Error = Infallible> + Clone {
    warp::any().map(move || relay.clone())
}

/// All relay endpoints with rejection recovery, without logging or CORS.
pub fn api_routes(
    relay: Arc<SentimentRelay>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    // GET /
    let root = warp::path::end()
        .and(warp::get())
        .and(with_relay(relay.clone()))
        .and_then(root_handler);

    // GET /health
    let health = warp::path!("health")
        .and(warp::get())
        .and(with_relay(relay.clone()))
        .and_then(health_handler);

    // GET /models
    let models = warp::path!("models")
        .and(warp::get())
        .and(with_relay(relay.clone()))
        .and_then(models_handler);

    // POST /analyze
    let analyze = warp::path!("analyze")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<AnalyzeRequest>())
        .and(with_relay(relay.clone()))
        .and_then(analyze_handler);

    // POST /analyze-batch
    let analyze_batch = warp::path!("analyze-batch")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<BatchAnalyzeRequest>())
        .and(with_relay(relay))
        .and_then(analyze_batch_handler);

    root.or(health)
        .or(models)
        .or(analyze)
        .or(analyze_batch)
        .recover(handle_rejection)
}

pub async fn run_api(relay: Arc<SentimentRelay>, address: SocketAddr) {
    texta_log(
        TextaLogOption::API,
        TextaLogLevel::Info,
        &format!("Starting sentiment relay API at: {}", &address),
    );

    let log = warp::log::custom(|info| {
        texta_log(
            TextaLogOption::API,
            TextaLogLevel::Info,
            &format!(
                "ip: {:?}, method: {:?}, path: {:?}, status: {:?}, elapsed: {:?}",
                info.remote_addr(),
                info.method(),
                info.path(),
                info.status(),
                info.elapsed(),
            ),
        );
    });

    let cors = warp::cors()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["Content-Type", "Authorization"]);
    let env = relay.environment();
    let cors = if env.allows_any_origin() {
        cors.allow_any_origin()
    } else {
        cors.allow_origins(env.cors_allowed_origins.iter().map(String::as_str))
    };

    let routes = api_routes(relay.clone()).with(log).with(cors);

    warp::serve(routes).run(address).await;
}

async fn root_handler(relay: Arc<SentimentRelay>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&relay.root()))
}

async fn health_handler(relay: Arc<SentimentRelay>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&relay.health()))
}

async fn models_handler(relay: Arc<SentimentRelay>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&relay.models()))
}

async fn analyze_handler(
    request: AnalyzeRequest,
    relay: Arc<SentimentRelay>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match relay.analyze(&request.text, &request.model_name).await {
        Ok(result) => Ok(warp::reply::with_status(warp::reply::json(&result), StatusCode::OK)),
        Err(error) => {
            texta_log(
                TextaLogOption::API,
                TextaLogLevel::Error,
                &format!("Analyze with {} failed: {}", request.model_name, error),
            );
            Ok(warp::reply::with_status(
                warp::reply::json(&error.to_api_error()),
                error.status_code(),
            ))
        }
    }
}

async fn analyze_batch_handler(
    request: BatchAnalyzeRequest,
    relay: Arc<SentimentRelay>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match relay.analyze_batch(&request.texts, &request.model_name).await {
        Ok(outcomes) => Ok(warp::reply::with_status(warp::reply::json(&outcomes), StatusCode::OK)),
        Err(error) => Ok(warp::reply::with_status(
            warp::reply::json(&error.to_api_error()),
            error.status_code(),
        )),
    }
}

fn rejection_reply(status: StatusCode, error: &str, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    let json = warp::reply::json(&APIError::new(status.as_u16(), error, message));
    warp::reply::with_status(json, status)
}

async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    if err.is_not_found() {
        Ok(rejection_reply(StatusCode::NOT_FOUND, "Not Found", "Please check your URL."))
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        Ok(rejection_reply(
            StatusCode::BAD_REQUEST,
            "Invalid Body",
            &format!("Please check your JSON body: {}", e),
        ))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        Ok(rejection_reply(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed",
            "Please check your request method.",
        ))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        Ok(rejection_reply(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload Too Large",
            "The request payload is too large.",
        ))
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        Ok(rejection_reply(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type",
            "Requests must be sent as application/json.",
        ))
    } else {
        // Unexpected error, we don't want to expose anything to the user.
        Ok(rejection_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "An unexpected error occurred. Please try again.",
        ))
    }
}
