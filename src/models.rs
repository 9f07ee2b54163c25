use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub image: Option<String>, // path relative to the static root, e.g. "uploads/x.png"
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customization {
    pub header_image: Option<String>,
    #[serde(default = "default_bg_style")]
    pub bg_style: String,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            header_image: None,
            bg_style: default_bg_style(),
        }
    }
}

fn default_bg_style() -> String {
    "gradient1".to_string()
}

// Local -> FixedOffset using the current system offset
pub fn now_fixed_offset() -> DateTime<FixedOffset> {
    let local = chrono::Local::now();
    let offset_seconds = local.offset().local_minus_utc();
    let fixed = FixedOffset::east_opt(offset_seconds).unwrap();
    local.with_timezone(&fixed)
}
