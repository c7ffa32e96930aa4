use actix_web::{web, HttpResponse};

use crate::core::errors::StoreError;
use crate::core::store::Store;
use crate::models::models::{NewPost, QuoteBody, RepostBody};

pub async fn create_post(
    store: web::Data<Store>,
    body: web::Json<NewPost>,
) -> Result<HttpResponse, StoreError> {
    let post = store.create_post(&body.user_id, &body.content)?;
    Ok(HttpResponse::Created().json(post))
}

pub async fn get_post(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    let post = store.get_post(&path)?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    store.delete_post(&path)?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn repost(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<RepostBody>,
) -> Result<HttpResponse, StoreError> {
    let post = store.repost(&path, &body.user_id)?;
    Ok(HttpResponse::Created().json(post))
}

pub async fn quote(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<QuoteBody>,
) -> Result<HttpResponse, StoreError> {
    let post = store.quote(&path, &body.user_id, &body.content)?;
    Ok(HttpResponse::Created().json(post))
}
