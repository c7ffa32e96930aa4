use actix_web::{web, HttpResponse};

use crate::core::errors::StoreError;
use crate::core::store::Store;
use crate::models::models::{FollowBody, UnfollowQuery};

pub async fn follow(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<FollowBody>,
) -> Result<HttpResponse, StoreError> {
    store.follow(&path, &body.target_user_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": format!("Now following '{}'", body.target_user_id)
    })))
}

pub async fn unfollow(
    store: web::Data<Store>,
    path: web::Path<String>,
    query: web::Query<UnfollowQuery>,
) -> Result<HttpResponse, StoreError> {
    store.unfollow(&path, &query.target_user_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": format!("Unfollowed '{}'", query.target_user_id)
    })))
}

pub async fn followers(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    let users = store.followers(&path)?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn following(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    let users = store.following(&path)?;
    Ok(HttpResponse::Ok().json(users))
}
