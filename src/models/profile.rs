use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The single profile record shown on the public page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub profile_image: Option<String>,
    pub updated_at: OffsetDateTime,
}
