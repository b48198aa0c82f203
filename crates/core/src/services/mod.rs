pub mod progress_service;
pub mod scheduler;
