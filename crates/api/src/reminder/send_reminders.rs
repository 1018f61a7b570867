use super::dispatch::dispatch;
use super::match_due_assignments::MatchDueAssignmentsUseCase;
use crate::shared::usecase::{execute, UseCase};
use campus_scheduler_domain::DeliveryReport;
use campus_scheduler_infra::Context;
use tracing::{info, warn};

/// One full reminder scan: runs the matcher once per configured
/// lead-time value (sequentially, so log output and store load stay
/// predictable), consults the sent-reminders ledger, and dispatches one
/// notification per remaining triple. Per-recipient failures never
/// abort the scan.
#[derive(Debug)]
pub struct SendAssignmentRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for SendAssignmentRemindersUseCase {
    type Response = Vec<DeliveryReport>;

    type Error = UseCaseError;

    const NAME: &'static str = "SendAssignmentReminders";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let mut reports = Vec::with_capacity(ctx.config.reminder_lead_times.len());

        for &lead_time_days in &ctx.config.reminder_lead_times {
            let outcome = match execute(MatchDueAssignmentsUseCase { lead_time_days }, ctx).await {
                Ok(outcome) => outcome,
                Err(e) => match e {},
            };

            let mut report = DeliveryReport::new(lead_time_days, outcome.degraded);
            report.matched = outcome.triples.len();

            for triple in &outcome.triples {
                let event = triple.event(lead_time_days);

                // Synthetic degraded triples are never recorded in the
                // primary ledger
                if !outcome.degraded {
                    match ctx.repos.sent_reminders.contains(&event).await {
                        Ok(true) => {
                            report.skipped_duplicates += 1;
                            continue;
                        }
                        Ok(false) => {}
                        Err(e) => {
                            warn!("Could not consult the sent-reminders ledger: {:?}", e);
                        }
                    }
                }

                if dispatch(ctx.mailer.as_ref(), triple, lead_time_days).await {
                    report.sent += 1;
                    if !outcome.degraded {
                        if let Err(e) = ctx.repos.sent_reminders.insert(&event).await {
                            warn!(
                                "Could not record reminder {:?} in the sent-reminders ledger: {:?}",
                                event, e
                            );
                        }
                    }
                } else {
                    report.failed += 1;
                }
            }

            info!(
                "Reminder scan for lead time {}: {} matched, {} sent, {} failed, {} duplicates skipped{}",
                lead_time_days,
                report.matched,
                report.sent,
                report.failed,
                report.skipped_duplicates,
                if report.degraded { " (degraded mode)" } else { "" }
            );
            reports.push(report);
        }

        Ok(reports)
    }
}
