use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::BuyerProfile;

/// Partial update; omitted fields keep their cached value, empty strings
/// clear them.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Remote,
    Local,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileView {
    pub profile: BuyerProfile,
    pub source: ProfileSource,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HelperState {
    pub helper: String,
    pub seen: bool,
}
