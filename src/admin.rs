use actix_web::{web, HttpResponse};
use tracing::debug;

use crate::core::store::Store;

/// Wipe every table and index; test isolation hook.
pub async fn reset(store: web::Data<Store>) -> HttpResponse {
    store.reset();
    debug!("store reset");
    HttpResponse::NoContent().finish()
}
