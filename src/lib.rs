pub mod admin;
pub mod config;
pub mod core;
pub mod feeds;
pub mod follow;
pub mod likes;
pub mod models;
pub mod posts;
pub mod users;

use actix_web::web;

pub use crate::core::errors::StoreError;
pub use crate::core::store::Store;

/// Route table, shared by the server binary and the API tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(users::create_user))
        .route("/users/{user_id}", web::get().to(users::get_user))
        .route("/users/{user_id}", web::put().to(users::update_user))
        .route("/users/{user_id}/posts", web::get().to(users::list_user_posts))
        .route("/users/{user_id}/follow", web::post().to(follow::follow))
        .route("/users/{user_id}/follow", web::delete().to(follow::unfollow))
        .route("/users/{user_id}/followers", web::get().to(follow::followers))
        .route("/users/{user_id}/following", web::get().to(follow::following))
        .route("/users/{user_id}/timeline", web::get().to(feeds::timeline))
        .route("/users/{user_id}/mentions", web::get().to(feeds::mentions))
        .route("/posts", web::post().to(posts::create_post))
        .route("/posts/{post_id}", web::get().to(posts::get_post))
        .route("/posts/{post_id}", web::delete().to(posts::delete_post))
        .route("/posts/{post_id}/repost", web::post().to(posts::repost))
        .route("/posts/{post_id}/quote", web::post().to(posts::quote))
        .route("/posts/{post_id}/like", web::post().to(likes::like))
        .route("/posts/{post_id}/like", web::delete().to(likes::unlike))
        .route("/hashtags/{tag}/posts", web::get().to(feeds::hashtag_feed))
        .route("/trending", web::get().to(feeds::trending))
        .route("/admin/reset", web::post().to(admin::reset));
}
