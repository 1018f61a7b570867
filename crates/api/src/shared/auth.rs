use crate::error::ApiError;
use actix_web::HttpRequest;
use campus_scheduler_infra::Context;
use tracing::info;

const ADMIN_API_KEY_HEADER: &str = "campus-admin-api-key";
const ACTOR_HEADER: &str = "campus-actor";

fn header_value<'a>(http_req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    http_req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Guards the operational endpoints behind the admin API key and logs
/// the caller identity for audit.
pub fn protect_admin_route(http_req: &HttpRequest, ctx: &Context) -> Result<(), ApiError> {
    let api_key = match header_value(http_req, ADMIN_API_KEY_HEADER) {
        Some(key) if !key.is_empty() => key,
        _ => {
            return Err(ApiError::Unauthorized(format!(
                "Missing or empty `{}` header",
                ADMIN_API_KEY_HEADER
            )))
        }
    };
    if api_key != ctx.config.admin_api_key {
        return Err(ApiError::Unauthorized(format!(
            "Invalid `{}` header provided",
            ADMIN_API_KEY_HEADER
        )));
    }

    let actor = header_value(http_req, ACTOR_HEADER).unwrap_or("unknown");
    info!("Admin route invoked by actor: {}", actor);
    Ok(())
}
