mod chores_tests;
mod dashboard_tests;
mod events_tests;
mod users_tests;
