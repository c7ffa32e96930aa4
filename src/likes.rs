use actix_web::{web, HttpResponse};

use crate::core::errors::StoreError;
use crate::core::store::Store;
use crate::models::models::{LikeBody, UnlikeQuery};

pub async fn like(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<LikeBody>,
) -> Result<HttpResponse, StoreError> {
    let like_count = store.like(&path, &body.user_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": "Post liked",
        "like_count": like_count
    })))
}

pub async fn unlike(
    store: web::Data<Store>,
    path: web::Path<String>,
    query: web::Query<UnlikeQuery>,
) -> Result<HttpResponse, StoreError> {
    let like_count = store.unlike(&path, &query.user_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": "Post unliked",
        "like_count": like_count
    })))
}
