use actix_web::{HttpResponse, get, post, web};
use common::{AppError, validate};
use serde_json::json;
use validator::Validate;

use crate::error::HttpApiError;
use crate::extractors::AdminSession;
use crate::schemas::MessageInput;
use crate::state::AppState;

#[post("/api/v1/message/send")]
pub async fn send_message(
    data: web::Data<AppState>,
    payload: web::Json<MessageInput>,
) -> Result<HttpResponse, HttpApiError> {
    let payload = payload.into_inner();
    payload
        .validate()
        .map_err(|e| AppError::Validation(validate::error_message(&e)))?;

    db::insert_message(
        &data.db,
        db::NewMessage {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            message: payload.message,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Message Sent!",
    })))
}

#[get("/api/v1/message/getall")]
pub async fn get_all_messages(
    _session: AdminSession,
    data: web::Data<AppState>,
) -> Result<HttpResponse, HttpApiError> {
    let messages = db::list_messages(&data.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "messages": messages,
    })))
}
