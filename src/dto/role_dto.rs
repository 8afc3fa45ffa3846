use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1))]
    pub role_name: String,
    pub department: Option<String>,
    pub seniority: Option<String>,
}
