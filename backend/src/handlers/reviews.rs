use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::error;
use uuid::Uuid;

use crate::models::{NewReview, PaginatedReviews, PaginationInfo, Review, ReviewQuery};

#[get("/api/products/{id}/reviews")]
pub async fn get_product_reviews(
    db: web::Data<SqlitePool>,
    path: web::Path<String>,
    query: web::Query<ReviewQuery>,
) -> impl Responder {
    let product_id = path.into_inner();
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 50);
    let offset = (page - 1).saturating_mul(limit);

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE product_id = ?")
        .bind(&product_id)
        .fetch_one(db.get_ref())
        .await;

    let rows = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE product_id = ?
         ORDER BY created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(&product_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db.get_ref())
    .await;

    match (total, rows) {
        (Ok(total_items), Ok(reviews)) => HttpResponse::Ok().json(PaginatedReviews {
            reviews,
            pagination: PaginationInfo::new(page, limit, total_items),
        }),
        (Err(err), _) | (_, Err(err)) => {
            error!("review listing for {product_id} failed: {err}");
            HttpResponse::InternalServerError().body("Database query failed")
        }
    }
}

#[post("/api/products/{id}/reviews")]
pub async fn add_product_review(
    db: web::Data<SqlitePool>,
    path: web::Path<String>,
    json: web::Json<NewReview>,
) -> impl Responder {
    let product_id = path.into_inner();
    let review = json.into_inner();

    if !(1..=5).contains(&review.rating) {
        return HttpResponse::BadRequest().body("Rating must be between 1 and 5");
    }

    let exists = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM products WHERE id = ? AND is_active = 1",
    )
    .bind(&product_id)
    .fetch_one(db.get_ref())
    .await;

    match exists {
        Ok(0) => return HttpResponse::NotFound().body("Product not found"),
        Ok(_) => {}
        Err(err) => {
            error!("product lookup for review failed: {err}");
            return HttpResponse::InternalServerError().body("Database query failed");
        }
    }

    // Insert and rating recompute commit together.
    let mut tx = match db.begin().await {
        Ok(tx) => tx,
        Err(err) => {
            error!("failed to begin review transaction: {err}");
            return HttpResponse::InternalServerError().body("Failed to begin transaction");
        }
    };

    let review_id = Uuid::new_v4().to_string();
    let inserted = sqlx::query(
        "INSERT INTO reviews (id, product_id, user_name, rating, comment, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&review_id)
    .bind(&product_id)
    .bind(&review.user_name)
    .bind(review.rating)
    .bind(review.comment.unwrap_or_default())
    .bind(Utc::now())
    .execute(&mut *tx)
    .await;

    if let Err(err) = inserted {
        error!("review insert failed: {err}");
        return HttpResponse::InternalServerError().body("Insert failed");
    }

    let stats = sqlx::query_as::<_, (Option<f64>, i64)>(
        "SELECT AVG(rating), COUNT(*) FROM reviews WHERE product_id = ?",
    )
    .bind(&product_id)
    .fetch_one(&mut *tx)
    .await;

    let (average, count) = match stats {
        Ok((average, count)) => (average.unwrap_or(0.0), count),
        Err(err) => {
            error!("rating recompute failed: {err}");
            return HttpResponse::InternalServerError().body("Database query failed");
        }
    };

    let updated = sqlx::query("UPDATE products SET rating = ?, review_count = ? WHERE id = ?")
        .bind((average * 10.0).round() / 10.0)
        .bind(count)
        .bind(&product_id)
        .execute(&mut *tx)
        .await;

    if let Err(err) = updated {
        error!("product rating update failed: {err}");
        return HttpResponse::InternalServerError().body("Update failed");
    }

    if let Err(err) = tx.commit().await {
        error!("review transaction commit failed: {err}");
        return HttpResponse::InternalServerError().body("Transaction commit failed");
    }

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Review added successfully",
        "id": review_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::Value;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    async fn pool_with_product(id: &str) -> SqlitePool {
        let opt = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opt)
            .await
            .unwrap();
        crate::db::migrate(&pool).await.unwrap();
        sqlx::query(
            "INSERT INTO products (id, name, category, price, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind("Mug")
        .bind("Kitchen")
        .bind(5.0)
        .bind(Utc::now())
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    #[actix_web::test]
    async fn review_updates_product_rating() {
        let pool = pool_with_product("p1").await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool.clone()))
                .service(get_product_reviews)
                .service(add_product_review),
        )
        .await;

        for (user, rating) in [("ann", 5), ("ben", 4)] {
            let req = test::TestRequest::post()
                .uri("/api/products/p1/reviews")
                .set_json(serde_json::json!({
                    "user_name": user,
                    "rating": rating,
                    "comment": "fine mug"
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let (rating, count): (Option<f64>, i64) =
            sqlx::query_as("SELECT rating, review_count FROM products WHERE id = 'p1'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(rating, Some(4.5));
        assert_eq!(count, 2);

        let req = test::TestRequest::get()
            .uri("/api/products/p1/reviews")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["reviews"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["total_items"], 2);
    }

    #[actix_web::test]
    async fn review_validation_and_missing_product() {
        let pool = pool_with_product("p1").await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .service(add_product_review),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/products/p1/reviews")
            .set_json(serde_json::json!({"user_name": "ann", "rating": 9}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = test::TestRequest::post()
            .uri("/api/products/ghost/reviews")
            .set_json(serde_json::json!({"user_name": "ann", "rating": 3}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
