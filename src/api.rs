//! Web API Module
//!
//! Exposes RESTful endpoints for the learning path frontend.
//! All endpoints return JSON and require no authentication; student records
//! are keyed by the user id in the path.

use crate::config::ServerConfig;
use crate::planner::{
    catalog::{list_course_sessions, CatalogError, CurriculumCatalog, SqliteCatalog},
    generator::{GeneratorConfig, PathError, PathGenerator},
    student::{StudentData, StudentDataPatch, StudentStore, StudentStoreError},
    types::PathRequest,
};
use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

// ============================================================
// APPLICATION STATE
// ============================================================

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to open curriculum catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to open student store: {0}")]
    Students(#[from] StudentStoreError),
}

/// Shared application state
pub struct AppState {
    pub catalog: SqliteCatalog,
    pub students: StudentStore,
    pub generator: PathGenerator,
}

impl AppState {
    pub fn new(catalog: SqliteCatalog, students: StudentStore, generator: PathGenerator) -> Self {
        Self {
            catalog,
            students,
            generator,
        }
    }

    /// Empty in-memory stores with the default generator
    pub fn in_memory() -> Result<Self, StateError> {
        Ok(Self::new(
            SqliteCatalog::in_memory()?,
            StudentStore::in_memory()?,
            PathGenerator::default(),
        ))
    }

    /// Open the stores named by the config and import the seed, if any
    pub fn from_config(config: &ServerConfig) -> Result<Self, StateError> {
        let (catalog, students) = if config.is_in_memory() {
            (SqliteCatalog::in_memory()?, StudentStore::in_memory()?)
        } else {
            (
                SqliteCatalog::open(&config.database_path)?,
                StudentStore::open(&config.database_path)?,
            )
        };

        if let Some(seed) = &config.catalog_seed {
            let imported = catalog.import_json(seed)?;
            log::info!("Imported {} curriculum items from {}", imported, seed.display());
        }

        let items = catalog.item_count()?;
        if items == 0 {
            log::warn!("Curriculum catalog is empty; path generation will return 404");
        } else {
            log::info!("Curriculum catalog holds {} items", items);
        }

        let generator = PathGenerator::new(GeneratorConfig {
            portal_base_url: config.portal_base_url.clone(),
        });
        Ok(Self::new(catalog, students, generator))
    }
}

// ============================================================
// API RESPONSE ENVELOPE
// ============================================================

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

fn internal_error(err: error::BlockingError) -> HttpResponse {
    log::error!("Blocking task failed: {}", err);
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Internal server error"))
}

fn path_error_response(err: PathError) -> HttpResponse {
    let message = err.to_string();
    match err {
        PathError::NotFound => HttpResponse::NotFound().json(ApiResponse::<()>::error(&message)),
        PathError::InvalidRequest(_) => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(&message))
        }
        PathError::Catalog(_) => {
            log::error!("Curriculum fetch failed: {}", message);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(&format!(
                "Failed to generate learning path: {}",
                message
            )))
        }
    }
}

fn student_error_response(err: StudentStoreError) -> HttpResponse {
    let message = err.to_string();
    match err {
        StudentStoreError::NotFound => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(&message))
        }
        StudentStoreError::AlreadyExists => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(&message))
        }
        _ => {
            log::error!("Student store failure: {}", message);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(&format!("Database error: {}", message)))
        }
    }
}

fn catalog_error_response(err: CatalogError) -> HttpResponse {
    log::error!("Curriculum catalog failure: {}", err);
    HttpResponse::InternalServerError()
        .json(ApiResponse::<()>::error(&format!("Database error: {}", err)))
}

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Learning Path API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Generate a weekly learning path
async fn generate_path(
    data: web::Data<Arc<AppState>>,
    req: web::Json<PathRequest>,
) -> impl Responder {
    let state = Arc::clone(data.get_ref());
    let request = req.into_inner();

    match web::block(move || state.generator.generate(&state.catalog, &request)).await {
        Ok(Ok(path)) => HttpResponse::Ok().json(ApiResponse::success(path)),
        Ok(Err(e)) => path_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// Get stored student data
async fn get_student(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let state = Arc::clone(data.get_ref());
    let user_id = path.into_inner();

    match web::block(move || state.students.get(&user_id)).await {
        Ok(Ok(record)) => HttpResponse::Ok().json(ApiResponse::success(record)),
        Ok(Err(e)) => student_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// Save student data for the first time
async fn create_student(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<StudentData>,
) -> impl Responder {
    let state = Arc::clone(data.get_ref());
    let user_id = path.into_inner();
    let student = req.into_inner();

    match web::block(move || state.students.create(&user_id, student)).await {
        Ok(Ok(record)) => {
            log::info!("Stored student data for {}", record.user_id);
            HttpResponse::Created().json(ApiResponse::success(record))
        }
        Ok(Err(e)) => student_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// Replace any supplied sections of the stored student data
async fn update_student(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<StudentDataPatch>,
) -> impl Responder {
    let state = Arc::clone(data.get_ref());
    let user_id = path.into_inner();
    let patch = req.into_inner();

    match web::block(move || state.students.update(&user_id, patch)).await {
        Ok(Ok(record)) => HttpResponse::Ok().json(ApiResponse::success(record)),
        Ok(Err(e)) => student_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// List every course in the catalog
async fn list_courses(data: web::Data<Arc<AppState>>) -> impl Responder {
    let state = Arc::clone(data.get_ref());

    match web::block(move || state.catalog.course_names()).await {
        Ok(Ok(courses)) => HttpResponse::Ok().json(ApiResponse::success(courses)),
        Ok(Err(e)) => catalog_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// List the sessions of one course in sequence order
async fn list_sessions(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let state = Arc::clone(data.get_ref());
    let course_name = path.into_inner();

    match web::block(move || list_course_sessions(&state.catalog, &course_name)).await {
        Ok(Ok(sessions)) => HttpResponse::Ok().json(ApiResponse::success(sessions)),
        Ok(Err(e)) => catalog_error_response(e),
        Err(e) => internal_error(e),
    }
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Register all routes. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {}", err);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(&message)),
        )
        .into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health_check))
        // registered before the {user_id} routes so it is not taken as a user id
        .route("/api/student/generate-path", web::post().to(generate_path))
        .route("/api/student/{user_id}", web::get().to(get_student))
        .route("/api/student/{user_id}", web::post().to(create_student))
        .route("/api/student/{user_id}", web::put().to(update_student))
        .route("/api/curriculum/courses", web::get().to(list_courses))
        .route(
            "/api/curriculum/courses/{course_name}/sessions",
            web::get().to(list_sessions),
        );
}

/// Configure and run the API server
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = AppState::from_config(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let state = Arc::new(state);

    log::info!("Learning Path API starting at http://{}:{}", config.host, config.port);
    log::info!("API Endpoints:");
    log::info!("   GET  /health");
    log::info!("   POST /api/student/generate-path              - Generate learning path");
    log::info!("   GET  /api/student/:user_id                   - Get student data");
    log::info!("   POST /api/student/:user_id                   - Save student data");
    log::info!("   PUT  /api/student/:user_id                   - Update student data");
    log::info!("   GET  /api/curriculum/courses                 - List courses");
    log::info!("   GET  /api/curriculum/courses/:name/sessions  - List course sessions");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
