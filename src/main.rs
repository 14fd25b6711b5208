use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

mod config;
mod extract;
mod llm;
mod models;
mod prompt;

use config::Config;
use llm::AgentError;
use models::{AnalyzeResponse, UploadedFile};

struct AppState {
    config: Config,
    client: reqwest::Client,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("configuration error: {}", e);
        std::process::exit(1);
    });

    // The LLM call is the long pole; the request timeout covers the full
    // round trip to the completion endpoint.
    let client = reqwest::ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(180))
        .build()
        .unwrap();

    let port = config.port;
    let state = Arc::new(AppState { config, client });

    let app = Router::new()
        .route("/", get(root))
        .route("/api/", post(analyze_endpoint).get(method_not_allowed))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await.unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn root() -> impl IntoResponse {
    Json(json!({"message": "Data Analyst Agent API is running!"}))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"error": "Method Not Allowed. Use POST with files."})),
    )
}

async fn analyze_endpoint(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match analyze(&state, multipart).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            let status = match &e {
                AgentError::MissingQuestionsFile
                | AgentError::InvalidTaskEncoding
                | AgentError::Multipart(_) => StatusCode::BAD_REQUEST,
                AgentError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                AgentError::Request(_) | AgentError::MalformedCompletion => StatusCode::BAD_GATEWAY,
            };
            tracing::warn!("request failed: {}", e);
            (status, Json(json!({"error": e.to_string()}))).into_response()
        }
    }
}

async fn analyze(state: &AppState, multipart: Multipart) -> Result<AnalyzeResponse, AgentError> {
    let (task, files) = read_upload(multipart).await?;

    let prompt = prompt::build_prompt(&task, &files);
    tracing::info!(
        files = files.len(),
        prompt_chars = prompt.len(),
        "forwarding task to LLM"
    );

    let answer = llm::complete(&state.client, &state.config, &prompt).await?;

    let references = extract::extract_references(&answer);
    let chart_base64 = extract::extract_chart(&answer);
    let other_files_received = files.into_iter().map(|f| f.name).collect();

    Ok(AnalyzeResponse {
        answer,
        references,
        chart_base64,
        other_files_received,
    })
}

/// Reads the multipart form: the required `questions_file` field is decoded
/// as strict UTF-8; every `files` field is decoded lossily, in upload order.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<UploadedFile>), AgentError> {
    let mut task: Option<String> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AgentError::Multipart(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "questions_file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AgentError::Multipart(e.to_string()))?;
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|_| AgentError::InvalidTaskEncoding)?;
                task = Some(text);
            }
            "files" => {
                let name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AgentError::Multipart(e.to_string()))?;
                files.push(UploadedFile {
                    name,
                    content: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }
            _ => {}
        }
    }

    let task = task.ok_or(AgentError::MissingQuestionsFile)?;
    Ok((task, files))
}
