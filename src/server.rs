/// HTTP server for the listing page and its JSON API
use actix_web::http::header::ContentType;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::loader::{CsvLoader, TableLoader};
use crate::messages::{ListingQuery, ServerMessage};
use crate::query::{ListingPage, ListingRequest, ListingService, DATASET_FIELD};
use crate::registry::DatasetRegistry;
use crate::render;

/// Shared, read-only state for all requests
pub struct AppState {
    pub registry: DatasetRegistry,
    pub loader: Arc<dyn TableLoader>,
    pub row_limit: usize,
}

impl AppState {
    pub fn new(registry: DatasetRegistry, loader: Arc<dyn TableLoader>, row_limit: usize) -> Self {
        Self {
            registry,
            loader,
            row_limit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.registry(), Arc::new(CsvLoader), config.row_limit)
    }

    fn service(&self) -> ListingService<'_> {
        ListingService::new(&self.registry, self.loader.as_ref()).with_row_limit(self.row_limit)
    }
}

/// Run a listing request on the blocking pool; loading reads from disk.
async fn run_listing(
    state: web::Data<AppState>,
    request: ListingRequest,
) -> Result<ListingPage, Error> {
    let state = state.into_inner();
    web::block(move || state.service().run(&request))
        .await
        .map_err(|e| Error::Internal(e.to_string()))?
}

fn html(page: &ListingPage) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(render::render_page(page))
}

/// `GET /`: the form over an unfiltered dataset, `?dataset=` selects one
async fn index(
    query: web::Query<HashMap<String, String>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let dataset = query.get(DATASET_FIELD).cloned();
    let page = run_listing(state, ListingRequest::show(dataset)).await?;
    Ok(html(&page))
}

/// `POST /`: apply the submitted filters
async fn submit(
    form: web::Form<HashMap<String, String>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let page = run_listing(state, ListingRequest::submit(form.into_inner())).await?;
    Ok(html(&page))
}

/// `POST /api/listings`: same query, JSON in and out
async fn api_listings(
    body: web::Json<ListingQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let ListingQuery { dataset, filters } = body.into_inner();
    let request = match filters {
        Some(mut fields) => {
            if let Some(dataset) = dataset {
                fields.insert(DATASET_FIELD.to_string(), dataset);
            }
            ListingRequest::submit(fields)
        }
        None => ListingRequest::show(dataset),
    };

    match run_listing(state, request).await {
        Ok(page) => HttpResponse::Ok().json(ServerMessage::Listings(page)),
        Err(e) => HttpResponse::build(e.status_code()).json(ServerMessage::Error {
            message: e.to_string(),
        }),
    }
}

/// `GET /api/datasets`
async fn api_datasets(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ServerMessage::Datasets {
        datasets: state.registry.keys().into_iter().map(String::from).collect(),
        default: state.registry.default_key().to_string(),
    })
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "carlist server is running"
    }))
}

/// Register all routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/", web::post().to(submit))
        .route("/api/listings", web::post().to(api_listings))
        .route("/api/datasets", web::get().to(api_datasets))
        .route("/health", web::get().to(health_check));
}

/// Start the HTTP server
pub async fn run_server(config: Config) -> std::io::Result<()> {
    let state = web::Data::new(AppState::from_config(&config));

    log::info!("carlist listing server");
    log::info!("listings: http://{}:{}/", config.host, config.port);
    log::info!("health check: http://{}:{}/health", config.host, config.port);
    log::info!(
        "datasets from {}: {}",
        config.datasets_dir.display(),
        state.registry.keys().join(", ")
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
