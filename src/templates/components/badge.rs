use crate::domain::{DueReport, DueStatus};
use maud::{html, Markup};

fn badge_class(status: &DueStatus) -> &'static str {
    match status {
        DueStatus::Upcoming { .. } => "badge upcoming",
        DueStatus::AheadOfSchedule { .. } => "badge completed",
        DueStatus::DueToday => "badge due-today",
        DueStatus::Overdue { .. } => "badge overdue",
    }
}

pub fn status_badge(report: &DueReport) -> Markup {
    html! {
        span class=(badge_class(&report.status)) { (report.status.label()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upcoming_and_ahead_render_differently() {
        let upcoming = status_badge(&DueReport {
            days_overdue: -1,
            status: DueStatus::Upcoming { starts_in: 2 },
        })
        .into_string();
        let ahead = status_badge(&DueReport {
            days_overdue: -1,
            status: DueStatus::AheadOfSchedule { days_ahead: 1 },
        })
        .into_string();

        assert_eq!(upcoming, r#"<span class="badge upcoming">Upcoming</span>"#);
        assert_eq!(ahead, r#"<span class="badge completed">Completed</span>"#);
    }
}
