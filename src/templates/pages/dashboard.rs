use crate::digest::PREVIEW_WINDOW_DAYS;
use crate::domain::{Chore, DueReport, DueStatus, Stat, User};
use crate::templates::components::{card, progress_bar, status_badge};
use crate::templates::desktop_layout;
use chrono::NaiveDate;
use maud::{html, Markup};

pub struct ChoreRow {
    pub chore: Chore,
    pub report: DueReport,
}

pub struct DashboardVm {
    pub today: NaiveDate,
    pub users: Vec<User>,
    /// Who "Complete" is recorded for; chosen with `?user=`.
    pub current_user: Option<User>,
    pub chores: Vec<ChoreRow>,
    pub stats: Vec<Stat>,
    pub feed_version: u64,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        vm.feed_version,
        html! {
            nav class="tabs" {
                @for user in &vm.users {
                    @let active = vm.current_user.as_ref().map(|u| u.id) == Some(user.id);
                    a href=(format!("/?user={}", user.id)) class=[active.then_some("active")] { (user.name) }
                }
            }

            main {
                div {
                    h2 { "Household Chores" }
                    p class="today" { (vm.today.format("%A, %B %-d").to_string()) }
                    @for row in &vm.chores {
                        (chore_item(row, vm.current_user.as_ref()))
                    }
                    @if vm.chores.is_empty() {
                        div class="card" {
                            p { "No chores added yet." }
                        }
                    }
                }

                aside {
                    (card("Progress Tracking", None, leaderboard(vm)))
                    (notifications(vm))
                }
            }
        },
    )
}

fn chore_item(row: &ChoreRow, current_user: Option<&User>) -> Markup {
    let chore = &row.chore;
    let due = row.report.is_due();

    html! {
        div class=(if due { "card chore" } else { "card chore not-due" }) id=(format!("chore-{}", chore.id)) {
            div {
                h3 { (chore.name) }
                p {
                    @if !chore.duration.is_empty() {
                        span { (chore.duration) " · " }
                    }
                    span { (chore.frequency.as_str()) }
                    @if let (Some(start), None) = (chore.start_date, chore.last_completed_at) {
                        span { " · Starts: " (start.format("%b %-d, %Y").to_string()) }
                    }
                }
            }
            div {
                (status_badge(&row.report))
                @if let Some(user) = current_user {
                    form method="post" action=(format!("/chores/{}/complete", chore.id)) {
                        input type="hidden" name="user_id" value=(user.id);
                        button type="submit" title=(if due { "Mark as complete" } else { "Complete early" }) {
                            "Complete"
                        }
                    }
                }
            }
        }
    }
}

fn leaderboard(vm: &DashboardVm) -> Markup {
    html! {
        @for stat in &vm.stats {
            div class="stat" {
                p { span { (stat.name) } " " strong { (stat.completion_count) } }
                (progress_bar(stat.completion_count, vm.chores.len()))
            }
        }
    }
}

fn notifications(vm: &DashboardVm) -> Markup {
    let due_now: Vec<&ChoreRow> = vm.chores.iter().filter(|r| r.report.is_due()).collect();
    let coming_up: Vec<&ChoreRow> = vm
        .chores
        .iter()
        .filter(|r| !r.report.is_due() && r.report.days_until_due() <= PREVIEW_WINDOW_DAYS)
        .collect();

    let body = html! {
        p { strong { "Daily Digest" } }
        @for row in due_now.iter().take(2) {
            div {
                p { strong { (row.chore.name) } }
                p { (row.chore.frequency.as_str()) " · " (row.chore.duration) }
            }
        }
        @if due_now.is_empty() {
            p { em { "No chores due today!" } }
        }

        p { strong { "Coming up this week" } }
        @for row in &coming_up {
            div {
                p {
                    (row.chore.name) " · "
                    @match row.report.status {
                        DueStatus::Upcoming { starts_in } => { "starts in " (starts_in) "d" }
                        _ => { "due in " (row.report.days_until_due()) "d" }
                    }
                }
            }
        }
        @if coming_up.is_empty() {
            p { em { "Nothing else this week." } }
        }
    };

    card("Smart Notifications", Some("notifications"), body)
}
