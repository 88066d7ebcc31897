pub mod admin;
pub mod dashboard;
pub mod grid;
pub mod history;
pub mod log_cardio;
pub mod log_weights;
