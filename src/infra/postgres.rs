pub mod email_job_repo;
pub mod event_repo;
pub mod order_repo;
