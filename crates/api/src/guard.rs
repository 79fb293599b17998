//! Role-based access guard.
//!
//! Mutating routes are listed in an explicit policy table mapping
//! (method, matched route path) to the roles allowed to call it. Routes
//! absent from the table skip the role check; authentication is still
//! enforced by the [`crate::extractors::AuthUser`] extractor.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use farmtrack_common::AppError;
use farmtrack_core::Claims;
use farmtrack_db::entities::user::UserRole;

/// Roles allowed to call one route.
pub struct RoutePolicy {
    /// HTTP method.
    pub method: Method,
    /// Matched route path, axum syntax (`/farm/{id}`).
    pub path: &'static str,
    /// Roles permitted on the route.
    pub allowed: &'static [UserRole],
}

const MUTATE: &[UserRole] = &[UserRole::Owner, UserRole::Operator];
const OWNER_ONLY: &[UserRole] = &[UserRole::Owner];

/// The route policy table.
///
/// Reads are open to every authenticated user and are deliberately not
/// listed here.
pub static ROUTE_POLICIES: &[RoutePolicy] = &[
    // Auth
    RoutePolicy { method: Method::PATCH, path: "/auth/role", allowed: OWNER_ONLY },
    // Farm
    RoutePolicy { method: Method::POST, path: "/farm", allowed: MUTATE },
    RoutePolicy { method: Method::PATCH, path: "/farm/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/farm/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/farm/{id}/permanent", allowed: OWNER_ONLY },
    // Field
    RoutePolicy { method: Method::POST, path: "/field", allowed: MUTATE },
    RoutePolicy { method: Method::PATCH, path: "/field/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/field/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/field/{id}/permanent", allowed: OWNER_ONLY },
    // Soil
    RoutePolicy { method: Method::POST, path: "/soil", allowed: MUTATE },
    RoutePolicy { method: Method::PATCH, path: "/soil/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/soil/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/soil/{id}/permanent", allowed: OWNER_ONLY },
    // Crop
    RoutePolicy { method: Method::POST, path: "/crop", allowed: MUTATE },
    RoutePolicy { method: Method::PATCH, path: "/crop/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/crop/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/crop/{id}/permanent", allowed: OWNER_ONLY },
    // Machine
    RoutePolicy { method: Method::POST, path: "/machine", allowed: MUTATE },
    RoutePolicy { method: Method::PATCH, path: "/machine/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/machine/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/machine/{id}/permanent", allowed: OWNER_ONLY },
    // Processing type
    RoutePolicy { method: Method::POST, path: "/processingType", allowed: MUTATE },
    RoutePolicy { method: Method::PATCH, path: "/processingType/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/processingType/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/processingType/{id}/permanent", allowed: OWNER_ONLY },
    // Growing crop period
    RoutePolicy { method: Method::POST, path: "/growingCropPeriods", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/growingCropPeriods/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/growingCropPeriods/{id}/permanent", allowed: OWNER_ONLY },
    // Processing
    RoutePolicy { method: Method::POST, path: "/processing", allowed: MUTATE },
    RoutePolicy { method: Method::PATCH, path: "/processing/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/processing/{id}", allowed: MUTATE },
    RoutePolicy { method: Method::DELETE, path: "/processing/{id}/permanent", allowed: OWNER_ONLY },
];

/// Look up the policy for a method and matched route path.
#[must_use]
pub fn find_policy(method: &Method, path: &str) -> Option<&'static RoutePolicy> {
    ROUTE_POLICIES
        .iter()
        .find(|policy| policy.method == *method && policy.path == path)
}

/// Role-guard middleware.
///
/// Denies listed routes unless the authenticated role is allowed. Claims
/// are read from request extensions, populated by
/// [`crate::middleware::auth_middleware`].
pub async fn role_guard(req: Request<Body>, next: Next) -> Response {
    let Some(matched) = req.extensions().get::<MatchedPath>() else {
        return next.run(req).await;
    };

    let Some(policy) = find_policy(req.method(), matched.as_str()) else {
        return next.run(req).await;
    };

    let Some(claims) = req.extensions().get::<Claims>() else {
        return AppError::Unauthorized.into_response();
    };

    if !policy.allowed.contains(&claims.role) {
        return AppError::Forbidden(format!(
            "Role {:?} is not allowed to call this route",
            claims.role
        ))
        .into_response();
    }

    next.run(req).await
}
