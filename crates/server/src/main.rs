//! Farmtrack server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use farmtrack_api::{
    guard::role_guard,
    middleware::{AppState, auth_middleware},
    router as api_router,
};
use farmtrack_common::Config;
use farmtrack_core::{
    AuthService, CropService, FarmService, FieldService, GrowingCropPeriodService, MachineService,
    ProcessingService, ProcessingTypeService, ReportService, SoilService,
};
use farmtrack_db::repositories::{
    CropRepository, FarmRepository, FieldRepository, GrowingCropPeriodRepository,
    MachineRepository, ProcessingRepository, ProcessingTypeRepository, ReportRepository,
    SoilRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmtrack=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting farmtrack server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = Arc::new(farmtrack_db::init(&config).await?);
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    farmtrack_db::migrate(&db).await?;
    info!("Migrations completed");

    // Repositories
    let user_repo = UserRepository::new(db.clone());
    let farm_repo = FarmRepository::new(db.clone());
    let field_repo = FieldRepository::new(db.clone());
    let soil_repo = SoilRepository::new(db.clone());
    let crop_repo = CropRepository::new(db.clone());
    let machine_repo = MachineRepository::new(db.clone());
    let type_repo = ProcessingTypeRepository::new(db.clone());
    let period_repo = GrowingCropPeriodRepository::new(db.clone());
    let processing_repo = ProcessingRepository::new(db.clone());
    let report_repo = ReportRepository::new(db.clone());

    // Services
    let state = AppState {
        auth_service: AuthService::new(user_repo, &config),
        farm_service: FarmService::new(
            farm_repo.clone(),
            field_repo.clone(),
            machine_repo.clone(),
        ),
        field_service: FieldService::new(
            field_repo.clone(),
            farm_repo.clone(),
            soil_repo.clone(),
            period_repo.clone(),
        ),
        soil_service: SoilService::new(soil_repo, field_repo.clone()),
        crop_service: CropService::new(crop_repo.clone(), period_repo.clone()),
        machine_service: MachineService::new(
            machine_repo.clone(),
            farm_repo,
            processing_repo.clone(),
        ),
        processing_type_service: ProcessingTypeService::new(
            type_repo.clone(),
            processing_repo.clone(),
        ),
        growing_crop_period_service: GrowingCropPeriodService::new(
            period_repo.clone(),
            field_repo.clone(),
            crop_repo,
            processing_repo.clone(),
        ),
        processing_service: ProcessingService::new(
            processing_repo,
            period_repo,
            field_repo,
            type_repo,
            machine_repo,
        ),
        report_service: ReportService::new(report_repo),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth middleware decodes the bearer token; the role guard checks the
    // policy table against the matched route.
    let app = api_router()
        .layer(middleware::from_fn(role_guard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
