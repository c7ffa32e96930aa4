use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// === Stored records ===

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Original,
    Repost,
    Quote,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Post {
    pub id: String,
    pub kind: PostKind,
    pub user_id: String,
    /// None for reposts, Some for originals and quotes.
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Lowercased, deduplicated, first-occurrence order.
    pub hashtags: Vec<String>,
    /// Case preserved, deduplicated, first-occurrence order.
    pub mentions: Vec<String>,
    /// Set for reposts and quotes; may dangle once the origin is deleted.
    pub origin_id: Option<String>,
    /// Process-local insertion counter; the newest-first tiebreak.
    #[serde(skip)]
    pub seq: u64,
}

// === Assembled read views ===

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub followers_count: usize,
    pub following_count: usize,
    pub post_count: usize,
}

/// Rendering of a referenced origin post. Carries no origin field of its
/// own, so a repost of a repost can never nest past one level.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OriginView {
    pub id: String,
    pub kind: PostKind,
    pub author: UserView,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub like_count: usize,
    pub repost_count: usize,
    pub quote_count: usize,
    pub origin_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostView {
    pub id: String,
    pub kind: PostKind,
    pub author: UserView,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub like_count: usize,
    pub repost_count: usize,
    pub quote_count: usize,
    pub origin_id: Option<String>,
    /// One level deep; None for originals and for dangling origins.
    pub origin: Option<OriginView>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct TrendingTag {
    pub hashtag: String,
    pub count: usize,
}

// === Request bodies and query parameters ===

#[derive(Deserialize)]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct NewPost {
    pub user_id: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct RepostBody {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct QuoteBody {
    pub user_id: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct FollowBody {
    pub target_user_id: String,
}

#[derive(Deserialize)]
pub struct UnfollowQuery {
    pub target_user_id: String,
}

#[derive(Deserialize)]
pub struct LikeBody {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct UnlikeQuery {
    pub user_id: String,
}
