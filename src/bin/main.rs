use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let addr = roost::config::bind_addr();
    let store = web::Data::new(roost::Store::new());

    info!(%addr, "starting roost");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(roost::configure)
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run()
    .await?;

    Ok(())
}
