// templates/emails.rs
use crate::digest::DigestItem;
use crate::domain::DueStatus;
use chrono::NaiveDate;
use maud::{html, Markup, DOCTYPE};

const CARD_STYLE: &str = "background: white; border-radius: 24px; padding: 24px; margin-bottom: 16px; border: 1px solid rgba(0,0,0,0.05);";
const BUTTON_STYLE: &str = "background: #059669; color: white; padding: 12px 20px; border-radius: 12px; text-decoration: none; font-weight: bold; font-size: 14px;";

fn email_shell(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            body style="margin: 0;" {
                div style="font-family: sans-serif; background-color: #f5f5f5; padding: 40px 20px;" {
                    div style="max-width: 600px; margin: 0 auto;" {
                        (body)
                    }
                }
            }
        }
    }
}

fn status_color(status: &DueStatus) -> &'static str {
    match status {
        DueStatus::Overdue { .. } => "#dc2626",
        DueStatus::DueToday => "#059669",
        DueStatus::AheadOfSchedule { .. } | DueStatus::Upcoming { .. } => "#6b7280",
    }
}

pub fn daily_digest_email(
    user_name: &str,
    today: NaiveDate,
    items: &[DigestItem<'_>],
    app_url: &str,
) -> Markup {
    email_shell(html! {
        h2 style="color: #1a1a1a; font-size: 24px; margin-bottom: 8px;" {
            "Good Morning, " (user_name) "!"
        }
        p style="color: #666; margin-bottom: 32px;" {
            "Here are your action items for " (today.format("%A, %B %-d").to_string()) ":"
        }

        @for item in items {
            div style=(CARD_STYLE) {
                table width="100%" cellspacing="0" cellpadding="0" {
                    tr {
                        td {
                            div style={ "font-size: 12px; font-weight: bold; text-transform: uppercase; letter-spacing: 1px; margin-bottom: 4px; color: " (status_color(&item.report.status)) ";" } {
                                (item.report.status.label())
                            }
                            div style="font-size: 18px; font-weight: bold; color: #1a1a1a;" { (item.chore.name) }
                            div style="font-size: 14px; color: #666; margin-top: 4px;" {
                                (item.chore.duration) " · " (item.chore.frequency.as_str())
                            }
                        }
                        td align="right" {
                            a href=(app_url) style=(BUTTON_STYLE) { "Check Off" }
                        }
                    }
                }
            }
        }

        p style="text-align: center; margin-top: 32px;" {
            a href=(app_url) style="color: #666; text-decoration: underline; font-size: 12px;" {
                "View Full Leaderboard"
            }
        }
    })
}

fn due_in_words(days: i64) -> String {
    match days {
        d if d <= 0 => "due now".to_string(),
        1 => "due tomorrow".to_string(),
        d => format!("due in {d} days"),
    }
}

pub fn weekly_preview_email(
    user_name: &str,
    today: NaiveDate,
    items: &[DigestItem<'_>],
    app_url: &str,
) -> Markup {
    email_shell(html! {
        h1 style="color: #1a1a1a; font-size: 24px;" { "Happy Sunday, " (user_name) "!" }
        p style="color: #666;" {
            "Here's the household outlook for the week of " (today.format("%B %-d").to_string()) ":"
        }

        @if items.is_empty() {
            p style="color: #059669; font-style: italic;" { "Nothing coming due this week." }
        } @else {
            ul style="padding-left: 20px; color: #1a1a1a;" {
                @for item in items {
                    li style="margin-bottom: 8px;" {
                        strong { (item.chore.name) }
                        " - " (item.chore.duration)
                        span style="color: #666;" { " (" (due_in_words(item.report.days_until_due())) ")" }
                    }
                }
            }
        }

        p { a href=(app_url) style="color: #059669;" { "View Dashboard" } }
    })
}
