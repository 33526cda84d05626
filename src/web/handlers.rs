use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;

use crate::llm::CompletionError;
use crate::web::models::{ChatRequest, ChatResponse};
use crate::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API endpoint
pub async fn chat(data: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let req: ChatRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!("Rejected malformed chat request: {}", e);
            return HttpResponse::BadRequest().json(json!({
                "error": "Invalid request body",
                "details": e.to_string(),
            }));
        }
    };

    info!(
        "Chat request with {} history turns: {}",
        req.chat_history.len(),
        req.question
    );

    let messages = req.to_messages(&data.config.system_prompt);

    match data.backend.complete(&messages).await {
        Ok(answer) => HttpResponse::Ok().json(ChatResponse { answer }),
        Err(CompletionError::Upstream { status, details }) => {
            // Relay the provider's status code to the caller.
            let status = StatusCode::from_u16(status.as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status).json(json!({
                "error": "Failed to get response from LLM",
                "details": details,
            }))
        }
        Err(err @ CompletionError::Timeout) => {
            error!("Chat request failed: {}", err);
            HttpResponse::GatewayTimeout().json(json!({
                "error": "LLM request timed out",
                "details": err.to_string(),
            }))
        }
        Err(err) => {
            error!("Chat request failed: {}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to process request",
                "details": err.to_string(),
            }))
        }
    }
}
