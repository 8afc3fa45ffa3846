use serde::{Deserialize, Serialize};

use crate::models::organization::Organization;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,
    pub organization: Organization,
}
