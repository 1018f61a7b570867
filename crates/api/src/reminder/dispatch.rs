use campus_scheduler_domain::ReminderTriple;
use campus_scheduler_infra::IMailer;
use tracing::error;

pub fn render_subject(lead_time_days: u32, title: &str) -> String {
    if lead_time_days == 1 {
        format!("Assignment Due Tomorrow: {}", title)
    } else {
        format!("Assignment Due in {} Days: {}", lead_time_days, title)
    }
}

pub fn render_body(triple: &ReminderTriple, lead_time_days: u32) -> String {
    let urgency = if lead_time_days == 1 {
        "due tomorrow".to_string()
    } else {
        format!("due in {} days", lead_time_days)
    };
    format!(
        "<html><body>\
         <p>Hi {},</p>\
         <p>The assignment <strong>{}</strong> in <strong>{}</strong> is {}.</p>\
         <ul>\
         <li>Due: {}</li>\
         <li>Worth: {} points</li>\
         </ul>\
         <p>Good luck!</p>\
         </body></html>",
        triple.user.full_name,
        triple.assignment.title,
        triple.course.name,
        urgency,
        triple.assignment.due_at.format("%Y-%m-%d %H:%M UTC"),
        triple.assignment.max_score,
    )
}

/// Sends one notification for the triple. A transport failure is logged
/// with recipient and assignment identifiers and reported as `false`,
/// never raised, so the caller can continue with the remaining triples.
pub async fn dispatch(mailer: &dyn IMailer, triple: &ReminderTriple, lead_time_days: u32) -> bool {
    let subject = render_subject(lead_time_days, &triple.assignment.title);
    let body = render_body(triple, lead_time_days);
    match mailer.send(&triple.user.email, &subject, &body).await {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Failed to deliver reminder to {} for assignment {}: {:?}",
                triple.user.email, triple.assignment.id, e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_scheduler_domain::{Assignment, AssignmentKind, Course, User};
    use chrono::{TimeZone, Utc};

    fn triple_factory() -> ReminderTriple {
        let course = Course::new("Rust Programming");
        let assignment = Assignment {
            id: Default::default(),
            course_id: course.id.clone(),
            title: "Ownership Quiz".into(),
            kind: AssignmentKind::Quiz,
            max_score: 25.0,
            due_at: Utc.with_ymd_and_hms(2026, 9, 14, 17, 0, 0).unwrap(),
            active: true,
        };
        ReminderTriple {
            user: User::new("ada@campus.test", "Ada Lovelace"),
            course,
            assignment,
        }
    }

    #[test]
    fn subject_for_one_day_lead_time() {
        assert_eq!(
            render_subject(1, "Ownership Quiz"),
            "Assignment Due Tomorrow: Ownership Quiz"
        );
    }

    #[test]
    fn subject_for_longer_lead_times() {
        assert_eq!(
            render_subject(3, "Ownership Quiz"),
            "Assignment Due in 3 Days: Ownership Quiz"
        );
        assert_eq!(
            render_subject(7, "Final Project"),
            "Assignment Due in 7 Days: Final Project"
        );
    }

    #[test]
    fn body_references_assignment_course_due_and_points() {
        let triple = triple_factory();
        let body = render_body(&triple, 3);
        assert!(body.contains("Ownership Quiz"));
        assert!(body.contains("Rust Programming"));
        assert!(body.contains("2026-09-14 17:00 UTC"));
        assert!(body.contains("25 points"));
        assert!(body.contains("due in 3 days"));
    }
}
