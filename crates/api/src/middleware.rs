//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use farmtrack_core::{
    AuthService, CropService, FarmService, FieldService, GrowingCropPeriodService, MachineService,
    ProcessingService, ProcessingTypeService, ReportService, SoilService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub farm_service: FarmService,
    pub field_service: FieldService,
    pub soil_service: SoilService,
    pub crop_service: CropService,
    pub machine_service: MachineService,
    pub processing_type_service: ProcessingTypeService,
    pub growing_crop_period_service: GrowingCropPeriodService,
    pub processing_service: ProcessingService,
    pub report_service: ReportService,
}

/// Authentication middleware.
///
/// Decodes the bearer token when present and attaches the verified claims
/// to request extensions. Rejection of unauthenticated requests happens in
/// the [`crate::extractors::AuthUser`] extractor, so public routes stay
/// reachable.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(claims) = state.auth_service.verify_token(token)
    {
        req.extensions_mut().insert(claims);
    }

    next.run(req).await
}
