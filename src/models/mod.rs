pub mod candidate;
pub mod organization;
pub mod role;
pub mod stage;
pub mod stage_event;
pub mod user;
