pub mod analytics_dto;
pub mod candidate_dto;
pub mod role_dto;
pub mod session_dto;
