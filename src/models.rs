//! anilist models
//!
//! dto subset for the endpoints this crate exposes. fields mirror the query
//! catalog documents; anything the api may omit is optional.

use serde::{Deserialize, Serialize};

/// image url pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub large: Option<String>,
    pub medium: Option<String>,
}

/// media title in its available languages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

/// anime or manga
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Anime,
    Manga,
}

/// a media entry (anime or manga)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub title: Option<MediaTitle>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub format: Option<String>,
    pub status: Option<String>,
    pub episodes: Option<i32>,
    pub chapters: Option<i32>,
    pub average_score: Option<i32>,
    pub cover_image: Option<Image>,
    pub site_url: Option<String>,
}

/// an anilist user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<Image>,
    pub banner_image: Option<String>,
    pub site_url: Option<String>,
    pub donator_tier: Option<i32>,
    pub unread_notification_count: Option<i32>,
    pub updated_at: Option<i64>,
}

/// character name parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterName {
    pub full: Option<String>,
    pub native: Option<String>,
}

/// a character entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: Option<CharacterName>,
    pub image: Option<Image>,
    pub site_url: Option<String>,
}

/// a feed activity entry
///
/// activities are a graphql union (text, list, message); the catalog query
/// selects inline fragments, so every field is optional and entries of
/// unselected variants deserialize as empty objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub reply_count: Option<i32>,
    pub text: Option<String>,
    pub status: Option<String>,
    pub progress: Option<String>,
    pub created_at: Option<i64>,
    pub user: Option<User>,
    pub media: Option<Media>,
}

impl Activity {
    /// true if the query's inline fragments selected this entry
    pub fn is_known_variant(&self) -> bool {
        self.id.is_some()
    }
}

/// what a like toggle targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikeableType {
    Thread,
    ThreadComment,
    Activity,
    ActivityReply,
}

/// a notification feed entry
///
/// notifications are a graphql union (airing, following, activity mention,
/// activity like, ...); the catalog query selects inline fragments, so every
/// field is optional and entries of unselected variants deserialize as empty
/// objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub context: Option<String>,
    pub contexts: Option<Vec<String>>,
    pub created_at: Option<i64>,
    pub episode: Option<i32>,
    pub activity_id: Option<i64>,
    pub user: Option<User>,
    pub media: Option<Media>,
}

impl Notification {
    /// true if the query's inline fragments selected this entry
    pub fn is_known_variant(&self) -> bool {
        self.id.is_some()
    }
}
