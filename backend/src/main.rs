mod db;
mod handlers;
mod models;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::init_db;
use handlers::products::{
    delete_product, get_categories, get_featured_products, get_product, get_products, post_product,
    update_product,
};
use handlers::reviews::{add_product_review, get_product_reviews};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:storefront.db".to_string());
    let bind = std::env::var("BIND").unwrap_or_else(|_| "127.0.0.1:2001".to_string());

    let pool = init_db(&database_url).await.map_err(std::io::Error::other)?;

    info!("product api listening on {bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            // fixed paths before the {id} routes
            .service(get_featured_products)
            .service(get_categories)
            .service(get_products)
            .service(post_product)
            .service(get_product_reviews)
            .service(add_product_review)
            .service(get_product)
            .service(update_product)
            .service(delete_product)
    })
    .bind(bind)?
    .run()
    .await
}
