use actix_web::{web, HttpResponse};

use crate::core::errors::StoreError;
use crate::core::store::Store;

pub async fn timeline(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    let posts = store.timeline(&path)?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn mentions(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    let posts = store.mentions(&path)?;
    Ok(HttpResponse::Ok().json(posts))
}

/// An unknown tag is an empty feed, never an error.
pub async fn hashtag_feed(store: web::Data<Store>, path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(store.hashtag_feed(&path))
}

pub async fn trending(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(store.trending())
}
