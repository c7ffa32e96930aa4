use std::collections::{HashMap, HashSet};

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::config::{MAX_POST_CHARS, TRENDING_LIMIT};
use crate::core::errors::StoreError;
use crate::core::helpers::{extract_hashtags, extract_mentions};
use crate::models::models::{
    OriginView, Post, PostKind, PostView, TrendingTag, User, UserView,
};

/// The whole social graph behind one lock. Reads take the shared side,
/// every mutation holds the exclusive side for its full critical section,
/// so no caller can observe one index updated and its pair not.
pub struct Store {
    inner: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: HashMap<String, User>,
    /// lowercase username -> user id; uniqueness checks and mention lookups.
    usernames: HashMap<String, String>,
    posts: HashMap<String, Post>,
    /// user id -> ids of users who follow them, insertion order.
    followers: HashMap<String, Vec<String>>,
    /// user id -> ids of users they follow, insertion order.
    following: HashMap<String, Vec<String>>,
    /// post id -> ids of users who liked it.
    likes: HashMap<String, HashSet<String>>,
    /// lowercase hashtag -> post ids in creation order. Entries may outlive
    /// their last post; lookups filter on the post table.
    hashtags: HashMap<String, Vec<String>>,
    next_seq: u64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State::default()),
        }
    }

    /// Clear every table and index in one atomic step.
    pub fn reset(&self) {
        let mut state = self.inner.write();
        *state = State::default();
    }

    // === User operations ===

    pub fn create_user(
        &self,
        username: &str,
        display_name: &str,
        bio: Option<String>,
    ) -> Result<UserView, StoreError> {
        let username = username.trim();
        let display_name = display_name.trim();
        if username.is_empty() {
            return Err(StoreError::Validation("username must not be empty".into()));
        }
        if display_name.is_empty() {
            return Err(StoreError::Validation(
                "display_name must not be empty".into(),
            ));
        }

        let mut state = self.inner.write();
        let normalized = username.to_lowercase();
        if state.usernames.contains_key(&normalized) {
            return Err(StoreError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            bio,
            created_at: Utc::now(),
        };
        let id = user.id.clone();

        state.usernames.insert(normalized, id.clone());
        state.followers.insert(id.clone(), Vec::new());
        state.following.insert(id.clone(), Vec::new());
        state.users.insert(id.clone(), user);

        let user = &state.users[&id];
        Ok(assemble_user(&state, user))
    }

    pub fn get_user(&self, id: &str) -> Result<UserView, StoreError> {
        let state = self.inner.read();
        let user = user_or_not_found(&state, id)?;
        Ok(assemble_user(&state, user))
    }

    pub fn update_user(
        &self,
        id: &str,
        display_name: Option<String>,
        bio: Option<String>,
    ) -> Result<UserView, StoreError> {
        let mut state = self.inner.write();
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| user_not_found(id))?;

        if let Some(display_name) = display_name {
            user.display_name = display_name;
        }
        if let Some(bio) = bio {
            user.bio = Some(bio);
        }

        let user = &state.users[id];
        Ok(assemble_user(&state, user))
    }

    /// All posts owned by the user, newest first.
    pub fn user_posts(&self, id: &str) -> Result<Vec<PostView>, StoreError> {
        let state = self.inner.read();
        user_or_not_found(&state, id)?;

        let mut posts: Vec<&Post> = state
            .posts
            .values()
            .filter(|p| p.user_id == id)
            .collect();
        sort_newest_first(&mut posts);
        Ok(assemble_all(&state, &posts))
    }

    // === Post operations ===

    pub fn create_post(&self, user_id: &str, content: &str) -> Result<PostView, StoreError> {
        let mut state = self.inner.write();
        user_or_not_found(&state, user_id)?;
        validate_content(content)?;

        let post = new_post(
            &mut state,
            PostKind::Original,
            user_id,
            Some(content.to_string()),
            None,
        );
        let id = post.id.clone();
        insert_post(&mut state, post);

        assemble_by_id(&state, &id)
    }

    pub fn get_post(&self, id: &str) -> Result<PostView, StoreError> {
        let state = self.inner.read();
        assemble_by_id(&state, id)
    }

    /// Remove the post, its hashtag index entries, and its like-set.
    /// Reposts and quotes that reference it are left with a dangling
    /// origin id, which readers render as an absent origin.
    pub fn delete_post(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.inner.write();
        let post = state.posts.remove(id).ok_or_else(|| post_not_found(id))?;

        for tag in &post.hashtags {
            if let Some(ids) = state.hashtags.get_mut(tag) {
                ids.retain(|pid| pid != id);
            }
        }
        state.likes.remove(id);
        Ok(())
    }

    pub fn repost(&self, origin_id: &str, user_id: &str) -> Result<PostView, StoreError> {
        let mut state = self.inner.write();
        if !state.posts.contains_key(origin_id) {
            return Err(post_not_found(origin_id));
        }
        user_or_not_found(&state, user_id)?;

        let post = new_post(
            &mut state,
            PostKind::Repost,
            user_id,
            None,
            Some(origin_id.to_string()),
        );
        let id = post.id.clone();
        insert_post(&mut state, post);

        assemble_by_id(&state, &id)
    }

    pub fn quote(
        &self,
        origin_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<PostView, StoreError> {
        let mut state = self.inner.write();
        if !state.posts.contains_key(origin_id) {
            return Err(post_not_found(origin_id));
        }
        user_or_not_found(&state, user_id)?;
        validate_content(content)?;

        let post = new_post(
            &mut state,
            PostKind::Quote,
            user_id,
            Some(content.to_string()),
            Some(origin_id.to_string()),
        );
        let id = post.id.clone();
        insert_post(&mut state, post);

        assemble_by_id(&state, &id)
    }

    // === Follow operations ===

    pub fn follow(&self, user_id: &str, target_id: &str) -> Result<(), StoreError> {
        let mut state = self.inner.write();
        user_or_not_found(&state, user_id)?;
        user_or_not_found(&state, target_id)?;
        if user_id == target_id {
            return Err(StoreError::Validation("Cannot follow yourself".into()));
        }

        let following = state.following.entry(user_id.to_string()).or_default();
        if following.iter().any(|id| id == target_id) {
            return Err(StoreError::Conflict(format!(
                "Already following user '{}'",
                target_id
            )));
        }
        following.push(target_id.to_string());
        state
            .followers
            .entry(target_id.to_string())
            .or_default()
            .push(user_id.to_string());
        Ok(())
    }

    /// Idempotent: removing an edge that does not exist is a no-op.
    pub fn unfollow(&self, user_id: &str, target_id: &str) -> Result<(), StoreError> {
        let mut state = self.inner.write();
        user_or_not_found(&state, user_id)?;
        user_or_not_found(&state, target_id)?;

        if let Some(following) = state.following.get_mut(user_id) {
            following.retain(|id| id != target_id);
        }
        if let Some(followers) = state.followers.get_mut(target_id) {
            followers.retain(|id| id != user_id);
        }
        Ok(())
    }

    /// Users who follow `id`, in the order the edges were created.
    pub fn followers(&self, id: &str) -> Result<Vec<UserView>, StoreError> {
        let state = self.inner.read();
        user_or_not_found(&state, id)?;
        Ok(assemble_users(&state, state.followers.get(id)))
    }

    /// Users `id` follows, in the order the edges were created.
    pub fn following(&self, id: &str) -> Result<Vec<UserView>, StoreError> {
        let state = self.inner.read();
        user_or_not_found(&state, id)?;
        Ok(assemble_users(&state, state.following.get(id)))
    }

    // === Like operations ===

    /// The liking user id is taken as-is; likes are plain set membership.
    /// Returns the new like count.
    pub fn like(&self, post_id: &str, user_id: &str) -> Result<usize, StoreError> {
        let mut state = self.inner.write();
        if !state.posts.contains_key(post_id) {
            return Err(post_not_found(post_id));
        }

        let likers = state.likes.entry(post_id.to_string()).or_default();
        if !likers.insert(user_id.to_string()) {
            return Err(StoreError::Conflict(format!(
                "User '{}' has already liked post '{}'",
                user_id, post_id
            )));
        }
        Ok(likers.len())
    }

    /// Idempotent: unliking a post the user never liked is a no-op.
    /// Returns the remaining like count.
    pub fn unlike(&self, post_id: &str, user_id: &str) -> Result<usize, StoreError> {
        let mut state = self.inner.write();
        if !state.posts.contains_key(post_id) {
            return Err(post_not_found(post_id));
        }

        let likers = state.likes.entry(post_id.to_string()).or_default();
        likers.remove(user_id);
        Ok(likers.len())
    }

    // === Query layer ===

    /// Posts from every user `user_id` follows, newest first.
    pub fn timeline(&self, user_id: &str) -> Result<Vec<PostView>, StoreError> {
        let state = self.inner.read();
        user_or_not_found(&state, user_id)?;

        let followed = match state.following.get(user_id) {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Ok(Vec::new()),
        };

        let mut posts: Vec<&Post> = state
            .posts
            .values()
            .filter(|p| followed.iter().any(|id| *id == p.user_id))
            .collect();
        sort_newest_first(&mut posts);
        Ok(assemble_all(&state, &posts))
    }

    /// Posts carrying the tag (matched case-insensitively), newest first.
    /// An unknown tag yields an empty feed, not an error.
    pub fn hashtag_feed(&self, tag: &str) -> Vec<PostView> {
        let state = self.inner.read();
        let normalized = tag.to_lowercase();

        let mut posts: Vec<&Post> = state
            .hashtags
            .get(&normalized)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.posts.get(id))
                    .collect()
            })
            .unwrap_or_default();
        sort_newest_first(&mut posts);
        assemble_all(&state, &posts)
    }

    /// Top hashtags by live post count, descending; ties break by
    /// lexicographic tag order. Tags whose posts were all deleted are
    /// omitted.
    pub fn trending(&self) -> Vec<TrendingTag> {
        let state = self.inner.read();

        let mut ranked: Vec<TrendingTag> = state
            .hashtags
            .iter()
            .filter_map(|(tag, ids)| {
                let count = ids
                    .iter()
                    .filter(|id| state.posts.contains_key(*id))
                    .count();
                (count > 0).then(|| TrendingTag {
                    hashtag: tag.clone(),
                    count,
                })
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.hashtag.cmp(&b.hashtag))
        });
        ranked.truncate(TRENDING_LIMIT);
        ranked
    }

    /// Posts mentioning the user's username (case-insensitive), newest first.
    pub fn mentions(&self, user_id: &str) -> Result<Vec<PostView>, StoreError> {
        let state = self.inner.read();
        let user = user_or_not_found(&state, user_id)?;
        let username = user.username.to_lowercase();

        let mut posts: Vec<&Post> = state
            .posts
            .values()
            .filter(|p| p.mentions.iter().any(|m| m.to_lowercase() == username))
            .collect();
        sort_newest_first(&mut posts);
        Ok(assemble_all(&state, &posts))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

// === Internals ===

fn user_not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("User '{}' not found", id))
}

fn post_not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("Post '{}' not found", id))
}

fn user_or_not_found<'a>(state: &'a State, id: &str) -> Result<&'a User, StoreError> {
    state.users.get(id).ok_or_else(|| user_not_found(id))
}

fn validate_content(content: &str) -> Result<(), StoreError> {
    if content.is_empty() {
        return Err(StoreError::Validation("content must not be empty".into()));
    }
    if content.chars().count() > MAX_POST_CHARS {
        return Err(StoreError::Validation(format!(
            "content must not exceed {} characters",
            MAX_POST_CHARS
        )));
    }
    Ok(())
}

/// Build an unstored post record, extracting hashtags and mentions from the
/// content and allocating the next insertion sequence number.
fn new_post(
    state: &mut State,
    kind: PostKind,
    user_id: &str,
    content: Option<String>,
    origin_id: Option<String>,
) -> Post {
    let (hashtags, mentions) = match content.as_deref() {
        Some(text) => (extract_hashtags(text), extract_mentions(text)),
        None => (Vec::new(), Vec::new()),
    };
    state.next_seq += 1;
    Post {
        id: Uuid::new_v4().to_string(),
        kind,
        user_id: user_id.to_string(),
        content,
        created_at: Utc::now(),
        hashtags,
        mentions,
        origin_id,
        seq: state.next_seq,
    }
}

/// Single entry point for post insertion: the post table, its like-set, and
/// every hashtag index entry are updated before the lock is released.
fn insert_post(state: &mut State, post: Post) {
    for tag in &post.hashtags {
        state
            .hashtags
            .entry(tag.clone())
            .or_default()
            .push(post.id.clone());
    }
    state.likes.insert(post.id.clone(), HashSet::new());
    state.posts.insert(post.id.clone(), post);
}

fn sort_newest_first(posts: &mut [&Post]) {
    posts.sort_by(|a, b| (b.created_at, b.seq).cmp(&(a.created_at, a.seq)));
}

fn assemble_user(state: &State, user: &User) -> UserView {
    let post_count = state
        .posts
        .values()
        .filter(|p| p.user_id == user.id)
        .count();
    UserView {
        id: user.id.clone(),
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        bio: user.bio.clone(),
        created_at: user.created_at,
        followers_count: state.followers.get(&user.id).map_or(0, Vec::len),
        following_count: state.following.get(&user.id).map_or(0, Vec::len),
        post_count,
    }
}

fn assemble_users(state: &State, ids: Option<&Vec<String>>) -> Vec<UserView> {
    ids.into_iter()
        .flatten()
        .filter_map(|id| state.users.get(id))
        .map(|user| assemble_user(state, user))
        .collect()
}

fn like_count(state: &State, post_id: &str) -> usize {
    state.likes.get(post_id).map_or(0, HashSet::len)
}

fn repost_count(state: &State, post_id: &str) -> usize {
    state
        .posts
        .values()
        .filter(|p| p.kind == PostKind::Repost && p.origin_id.as_deref() == Some(post_id))
        .count()
}

fn quote_count(state: &State, post_id: &str) -> usize {
    state
        .posts
        .values()
        .filter(|p| p.kind == PostKind::Quote && p.origin_id.as_deref() == Some(post_id))
        .count()
}

/// One-level rendering of a referenced post; the returned view has no
/// origin field, which is what bounds repost chains structurally.
fn assemble_origin(state: &State, post: &Post) -> Option<OriginView> {
    let author = state.users.get(&post.user_id)?;
    Some(OriginView {
        id: post.id.clone(),
        kind: post.kind,
        author: assemble_user(state, author),
        content: post.content.clone(),
        created_at: post.created_at,
        hashtags: post.hashtags.clone(),
        mentions: post.mentions.clone(),
        like_count: like_count(state, &post.id),
        repost_count: repost_count(state, &post.id),
        quote_count: quote_count(state, &post.id),
        origin_id: post.origin_id.clone(),
    })
}

/// Full rendering with derived counts and, for reposts/quotes, the origin
/// embedded one level deep. A deleted origin renders as absent.
fn assemble_post(state: &State, post: &Post) -> Option<PostView> {
    let author = state.users.get(&post.user_id)?;
    let origin = post
        .origin_id
        .as_deref()
        .and_then(|id| state.posts.get(id))
        .and_then(|origin| assemble_origin(state, origin));
    Some(PostView {
        id: post.id.clone(),
        kind: post.kind,
        author: assemble_user(state, author),
        content: post.content.clone(),
        created_at: post.created_at,
        hashtags: post.hashtags.clone(),
        mentions: post.mentions.clone(),
        like_count: like_count(state, &post.id),
        repost_count: repost_count(state, &post.id),
        quote_count: quote_count(state, &post.id),
        origin_id: post.origin_id.clone(),
        origin,
    })
}

fn assemble_all(state: &State, posts: &[&Post]) -> Vec<PostView> {
    posts
        .iter()
        .filter_map(|post| assemble_post(state, post))
        .collect()
}

fn assemble_by_id(state: &State, id: &str) -> Result<PostView, StoreError> {
    state
        .posts
        .get(id)
        .and_then(|post| assemble_post(state, post))
        .ok_or_else(|| post_not_found(id))
}
