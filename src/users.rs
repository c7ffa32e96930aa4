use actix_web::{web, HttpResponse};

use crate::core::errors::StoreError;
use crate::core::store::Store;
use crate::models::models::{NewUser, UserUpdate};

pub async fn create_user(
    store: web::Data<Store>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, StoreError> {
    let body = body.into_inner();
    let user = store.create_user(&body.username, &body.display_name, body.bio)?;
    Ok(HttpResponse::Created().json(user))
}

pub async fn get_user(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    let user = store.get_user(&path)?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_user(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UserUpdate>,
) -> Result<HttpResponse, StoreError> {
    let body = body.into_inner();
    let user = store.update_user(&path, body.display_name, body.bio)?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn list_user_posts(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, StoreError> {
    let posts = store.user_posts(&path)?;
    Ok(HttpResponse::Ok().json(posts))
}
