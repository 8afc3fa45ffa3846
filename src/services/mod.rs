pub mod analytics_service;
pub mod candidate_service;
pub mod role_service;
pub mod user_service;
