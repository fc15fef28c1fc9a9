pub mod check;
pub mod run_id;
