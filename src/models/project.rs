use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Fallback visual used by the public page when a project has no image or video
pub const DEFAULT_COLOR: &str = "linear-gradient(135deg, #ff8c00 0%, #ff6b35 100%)";

pub const TITLE_MAX_LEN: usize = 255;
pub const CATEGORY_MAX_LEN: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub video: Option<String>,
    pub color: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Project {
    /// Cover image for a YouTube `video`, if it is one
    pub fn video_thumbnail(&self) -> Option<String> {
        self.video
            .as_deref()
            .and_then(youtube_video_id)
            .map(|id| format!("https://img.youtube.com/vi/{}/sddefault.jpg", id))
    }
}

/// Validated input for a new project
#[derive(Debug, Clone, Default)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub video: Option<String>,
    pub color: Option<String>,
}

/// Coalesce update: `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub video: Option<String>,
    pub color: Option<String>,
}

/// Tags arrive either as a list or as one comma-separated string
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => normalize_list(tags),
            TagsInput::Csv(raw) => normalize_list(raw.split(',')),
        }
    }
}

/// Trim every entry and drop the empty ones, keeping order
pub fn normalize_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Blank strings count as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Extract the video id from youtu.be, /embed/ and watch?v= URLs
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let rest = if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split(['?', '&', '#']).next()
    } else if let Some((_, rest)) = url.split_once("youtube.com/embed/") {
        rest.split(['?', '&', '#', '/']).next()
    } else if let Some((_, query)) = url.split_once("youtube.com/watch?") {
        query
            .split('#')
            .next()
            .and_then(|query| query.split('&').find_map(|pair| pair.strip_prefix("v=")))
    } else {
        None
    };

    rest.filter(|id| !id.is_empty())
}
