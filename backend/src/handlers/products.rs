use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::{
    Category, CategoryList, FeaturedQuery, NewProduct, PaginatedProducts, PaginationInfo, Product,
    ProductQuery,
};

#[get("/api/products")]
pub async fn get_products(
    db: web::Data<SqlitePool>,
    query: web::Query<ProductQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let (page, limit, offset) = query.page_window();

    let mut where_sql = String::from(" WHERE is_active = 1");
    if query.category().is_some() {
        where_sql.push_str(" AND category = ?");
    }
    if query.search().is_some() {
        where_sql.push_str(" AND (name LIKE '%' || ? || '%' OR description LIKE '%' || ? || '%')");
    }
    if query.min_price.is_some() {
        where_sql.push_str(" AND price >= ?");
    }
    if query.max_price.is_some() {
        where_sql.push_str(" AND price <= ?");
    }

    let count_sql = format!("SELECT COUNT(*) FROM products{where_sql}");
    let select_sql = format!(
        "SELECT * FROM products{where_sql} ORDER BY {} LIMIT ? OFFSET ?",
        query.sort_clause()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut rows_query = sqlx::query_as::<_, Product>(&select_sql);
    if let Some(category) = query.category() {
        count_query = count_query.bind(category.to_owned());
        rows_query = rows_query.bind(category.to_owned());
    }
    if let Some(search) = query.search() {
        count_query = count_query.bind(search.to_owned()).bind(search.to_owned());
        rows_query = rows_query.bind(search.to_owned()).bind(search.to_owned());
    }
    if let Some(min_price) = query.min_price {
        count_query = count_query.bind(min_price);
        rows_query = rows_query.bind(min_price);
    }
    if let Some(max_price) = query.max_price {
        count_query = count_query.bind(max_price);
        rows_query = rows_query.bind(max_price);
    }
    rows_query = rows_query.bind(limit).bind(offset);

    let total = count_query.fetch_one(db.get_ref()).await;
    let rows = rows_query.fetch_all(db.get_ref()).await;

    match (total, rows) {
        (Ok(total_items), Ok(products)) => HttpResponse::Ok().json(PaginatedProducts {
            products,
            pagination: PaginationInfo::new(page, limit, total_items),
        }),
        (Err(err), _) | (_, Err(err)) => {
            error!("product listing query failed: {err}");
            HttpResponse::InternalServerError().body("Database query failed")
        }
    }
}

#[get("/api/products/featured")]
pub async fn get_featured_products(
    db: web::Data<SqlitePool>,
    query: web::Query<FeaturedQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(8).clamp(1, 20);

    let rows = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE is_active = 1 AND is_featured = 1 ORDER BY name LIMIT ?",
    )
    .bind(limit)
    .fetch_all(db.get_ref())
    .await;

    match rows {
        // A bare array, as this endpoint has always answered.
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => {
            error!("featured products query failed: {err}");
            HttpResponse::InternalServerError().body("Database query failed")
        }
    }
}

#[get("/api/products/categories")]
pub async fn get_categories(db: web::Data<SqlitePool>) -> impl Responder {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT category AS name, COUNT(*) AS count FROM products
         WHERE is_active = 1 AND category <> ''
         GROUP BY category ORDER BY category",
    )
    .fetch_all(db.get_ref())
    .await;

    match rows {
        Ok(categories) => HttpResponse::Ok().json(CategoryList { categories }),
        Err(err) => {
            error!("category query failed: {err}");
            HttpResponse::InternalServerError().body("Database query failed")
        }
    }
}

#[get("/api/products/{id}")]
pub async fn get_product(db: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    let row = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ? AND is_active = 1")
        .bind(&id)
        .fetch_optional(db.get_ref())
        .await;

    match row {
        Ok(Some(product)) => HttpResponse::Ok().json(product),
        Ok(None) => HttpResponse::NotFound().body("Product not found"),
        Err(err) => {
            error!("product {id} query failed: {err}");
            HttpResponse::InternalServerError().body("Database query failed")
        }
    }
}

#[post("/api/products")]
pub async fn post_product(
    db: web::Data<SqlitePool>,
    json: web::Json<NewProduct>,
) -> impl Responder {
    let product = json.into_inner();
    let id = Uuid::new_v4().to_string();

    let result = sqlx::query(
        "INSERT INTO products
         (id, name, description, category, price, original_price, stock_quantity, image_url, is_featured, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&product.name)
    .bind(product.description.unwrap_or_default())
    .bind(&product.category)
    .bind(product.price)
    .bind(product.original_price)
    .bind(product.stock_quantity.unwrap_or(0))
    .bind(product.image_url)
    .bind(product.is_featured.unwrap_or(false))
    .bind(Utc::now())
    .execute(db.get_ref())
    .await;

    match result {
        Ok(_) => {
            info!("created product {id} ({})", product.name);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Product created successfully",
                "id": id,
            }))
        }
        Err(err) => {
            error!("product insert failed: {err}");
            HttpResponse::InternalServerError().body("Insert failed")
        }
    }
}

#[put("/api/products/{id}")]
pub async fn update_product(
    db: web::Data<SqlitePool>,
    path: web::Path<String>,
    json: web::Json<NewProduct>,
) -> impl Responder {
    let id = path.into_inner();
    let product = json.into_inner();

    let result = sqlx::query(
        "UPDATE products
         SET name = ?, description = ?, category = ?, price = ?, original_price = ?,
             stock_quantity = ?, image_url = ?, is_featured = ?
         WHERE id = ?",
    )
    .bind(&product.name)
    .bind(product.description.unwrap_or_default())
    .bind(&product.category)
    .bind(product.price)
    .bind(product.original_price)
    .bind(product.stock_quantity.unwrap_or(0))
    .bind(product.image_url)
    .bind(product.is_featured.unwrap_or(false))
    .bind(&id)
    .execute(db.get_ref())
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => HttpResponse::NotFound().body("Product not found"),
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Product updated successfully",
            "id": id,
        })),
        Err(err) => {
            error!("product {id} update failed: {err}");
            HttpResponse::InternalServerError().body("Update failed")
        }
    }
}

/// Soft delete: the product drops out of every listing but its rows stay.
#[delete("/api/products/{id}")]
pub async fn delete_product(db: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    let result = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?")
        .bind(&id)
        .execute(db.get_ref())
        .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => HttpResponse::NotFound().body("Product not found"),
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Product deleted successfully",
            "id": id,
        })),
        Err(err) => {
            error!("product {id} delete failed: {err}");
            HttpResponse::InternalServerError().body("Delete failed")
        }
    }
}
