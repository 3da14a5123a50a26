use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use menurec_core::{Error, Recommendation};
use menurec_storage::ModelManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Shown to the user when a lookup produces nothing
pub const NO_RESULTS_MESSAGE: &str = "No recommendations found. Try another item!";

#[derive(Deserialize)]
struct PopularQuery {
    limit: Option<usize>,
    category: Option<String>,
}

#[derive(Deserialize)]
struct RecommendQuery {
    count: Option<usize>,
    #[serde(default)]
    strict: bool,
}

#[derive(Deserialize)]
struct RecommendRequest {
    item: String,
    count: Option<usize>,
    #[serde(default)]
    strict: bool,
}

#[derive(Serialize)]
struct ItemsResponse<'a> {
    item_count: usize,
    items: Vec<&'a str>,
}

#[derive(Serialize)]
struct RecommendResponse {
    item: String,
    result: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(models: Arc<ModelManager>, port: u16) -> std::io::Result<()> {
        info!("HTTP API listening on 0.0.0.0:{}", port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(models.clone()))
                .configure(Self::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register every route; shared by the server and the handler tests.
    ///
    /// `GET /items/{name}/recommendations` reads the name from a single path
    /// segment, so names containing `/` have to go through `POST /recommend`.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/items", web::get().to(list_items))
            .route("/items/{name}/recommendations", web::get().to(item_recommendations))
            .route("/recommend", web::post().to(recommend))
            .route("/popular", web::get().to(popular))
            .route("/categories", web::get().to(categories))
            .route("/model", web::get().to(model_info))
            .route("/model/reload", web::post().to(reload_model));
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn list_items(models: web::Data<Arc<ModelManager>>) -> ActixResult<HttpResponse> {
    let catalog = models.catalog();
    Ok(HttpResponse::Ok().json(ItemsResponse {
        item_count: catalog.item_count(),
        items: catalog.index().sorted_keys(),
    }))
}

async fn item_recommendations(
    models: web::Data<Arc<ModelManager>>,
    path: web::Path<String>,
    query: web::Query<RecommendQuery>,
) -> ActixResult<HttpResponse> {
    let item = path.into_inner();
    Ok(recommendation_response(&models, item, query.count, query.strict))
}

async fn recommend(
    models: web::Data<Arc<ModelManager>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    Ok(recommendation_response(&models, req.item, req.count, req.strict))
}

/// Fail soft by default: an unknown item yields an empty result and the
/// neutral message. With `strict`, unknown items are reported as 404.
fn recommendation_response(
    models: &ModelManager,
    item: String,
    count: Option<usize>,
    strict: bool,
) -> HttpResponse {
    let catalog = models.catalog();

    let result = match catalog.recommend(&item, count) {
        Ok(result) => result,
        Err(Error::InvalidCount(n)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("count must be positive, got {}", n)
            }));
        }
        Err(e @ Error::ItemNotFound(_)) if strict => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
        Err(e) => {
            warn!(item = %item, error = %e, "recommendation lookup failed");
            Vec::new()
        }
    };

    let message = if result.is_empty() { Some(NO_RESULTS_MESSAGE) } else { None };
    HttpResponse::Ok().json(RecommendResponse { item, result, message })
}

async fn popular(
    models: web::Data<Arc<ModelManager>>,
    query: web::Query<PopularQuery>,
) -> ActixResult<HttpResponse> {
    let catalog = models.catalog();
    let items = catalog.top_popular(query.limit, query.category.as_deref());
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": items
    })))
}

async fn categories(models: web::Data<Arc<ModelManager>>) -> ActixResult<HttpResponse> {
    let catalog = models.catalog();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": catalog.browse_by_category()
    })))
}

async fn model_info(models: web::Data<Arc<ModelManager>>) -> ActixResult<HttpResponse> {
    match models.info() {
        Ok(info) => Ok(HttpResponse::Ok().json(info)),
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}

async fn reload_model(models: web::Data<Arc<ModelManager>>) -> ActixResult<HttpResponse> {
    match models.reload() {
        Ok(catalog) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": true,
            "item_count": catalog.item_count()
        }))),
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}
