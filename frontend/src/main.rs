mod catalog;
mod handlers;
mod models;

use actix_web::{App, HttpResponse, HttpServer, web};
use dotenvy::dotenv;
use tera::{Context, Tera};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catalog::{CatalogState, FilterUpdate, SortKey};
use handlers::products::ApiClient;
use models::{CatalogQuery, Product};

/// Landing page with the featured selection. The featured endpoint answers
/// with a bare array, so it goes through the same normalizer as the listing.
pub async fn get_home(tmpl: web::Data<Tera>, api: web::Data<ApiClient>) -> HttpResponse {
    let mut context = Context::new();

    match api.fetch_featured(8).await {
        Ok(response) => {
            let normalized = catalog::normalize(&response);
            context.insert("featured", &catalog::decode_products(&normalized.products));
        }
        Err(err) => {
            error!("featured fetch failed: {err:#}");
            context.insert("error", &err.to_string());
        }
    }

    render(&tmpl, "home.html", &context)
}

/// Storefront listing page: query string → filter state → fetch → normalize →
/// refine → paginate → template.
pub async fn get_products(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    query: web::Query<CatalogQuery>,
) -> HttpResponse {
    let query = query.into_inner();

    let mut state = CatalogState::default();
    state.apply_filter(FilterUpdate {
        category: query.category,
        search_term: query.search,
        min_price: query.min_price,
        max_price: query.max_price,
        sort_by: query.sort_by.as_deref().map(SortKey::parse),
    });
    // Page comes after the filter: applying the filter resets it to 1.
    state.set_current_page(query.page.unwrap_or(1).max(1));

    let mut context = Context::new();
    context.insert("filter", &state.filter);
    context.insert("sort_by", state.filter.sort_by.as_str());

    match api.fetch_products(&state.request_params()).await {
        Ok(response) => {
            state.apply_response(&response);
            context.insert("products", &state.visible_products());
            context.insert("pagination", &state.pagination);
        }
        Err(err) => {
            error!("product fetch failed: {err:#}");
            context.insert("error", &err.to_string());
        }
    }

    match api.fetch_categories().await {
        Ok(categories) => context.insert("categories", &categories),
        Err(err) => {
            error!("category fetch failed: {err:#}");
            context.insert("category_error", &err.to_string());
        }
    }

    render(&tmpl, "products.html", &context)
}

pub async fn get_product(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    let mut context = Context::new();

    match api.fetch_product(&id).await {
        Ok(value) => context.insert("product", &Product::from_value(&value)),
        Err(err) => {
            error!("product {id} fetch failed: {err:#}");
            context.insert("error", &err.to_string());
        }
    }

    render(&tmpl, "product.html", &context)
}

fn render(tmpl: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tmpl.render(name, context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(err) => {
            error!("template render failed: {err:?}");
            HttpResponse::InternalServerError().body("Template render error")
        }
    }
}


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let api_base = std::env::var("API").unwrap_or_else(|_| "http://localhost:2001".to_string());
    let api_token = std::env::var("API_TOKEN").ok();
    let bind = std::env::var("BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let tera = Tera::new("public/**/*.html").map_err(std::io::Error::other)?;
    let api = ApiClient::new(api_base, api_token);

    info!("storefront listening on {bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(api.clone()))
            .route("/", web::get().to(get_home))
            .route("/products", web::get().to(get_products))
            .route("/products/{id}", web::get().to(get_product))
    })
    .bind(bind)?
    .run()
    .await
}
