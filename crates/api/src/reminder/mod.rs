mod dispatch;
mod match_due_assignments;
mod send_reminders;

pub use match_due_assignments::MatchDueAssignmentsUseCase;
pub use send_reminders::SendAssignmentRemindersUseCase;

use crate::error::ApiError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::execute;
use actix_web::{web, HttpRequest, HttpResponse};
use campus_scheduler_infra::Context;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/trigger",
        web::post().to(trigger_reminders_controller),
    );
}

/// Operational escape hatch: runs the exact same scan pipeline as the
/// daily timer, on demand.
async fn trigger_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, ApiError> {
    protect_admin_route(&http_req, &ctx)?;

    match execute(SendAssignmentRemindersUseCase, &ctx).await {
        Ok(reports) => Ok(HttpResponse::Ok().json(reports)),
        Err(e) => match e {},
    }
}
