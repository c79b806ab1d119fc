//! Route definitions for the Provincial Agriculture Management Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - locations
        .nest("/municipalities", location_routes())
        // Protected routes - farmer registry
        .nest("/farmers", farmer_routes())
        // Protected routes - associations
        .nest("/associations", association_routes())
        // Protected routes - plantings
        .nest("/plantings", planting_routes())
        // Protected routes - harvests
        .nest("/harvests", harvest_routes())
        // Protected routes - inspections
        .nest("/inspections", inspection_routes())
        // Protected routes - reports
        .nest("/reports", report_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Location routes (protected)
fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_municipalities).post(handlers::create_municipality),
        )
        .route(
            "/:municipality_id/barangays",
            get(handlers::list_barangays).post(handlers::create_barangay),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Farmer registry routes (protected)
fn farmer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farmers).post(handlers::create_farmer))
        .route(
            "/:farmer_id",
            get(handlers::get_farmer)
                .put(handlers::update_farmer)
                .delete(handlers::delete_farmer),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Association routes (protected)
fn association_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_associations).post(handlers::create_association),
        )
        .route(
            "/:association_id",
            get(handlers::get_association)
                .put(handlers::update_association)
                .delete(handlers::delete_association),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Planting routes (protected)
fn planting_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_plantings).post(handlers::record_planting),
        )
        .route(
            "/:planting_id",
            get(handlers::get_planting)
                .put(handlers::update_planting)
                .delete(handlers::delete_planting),
        )
        .route(
            "/:planting_id/growth-stage",
            put(handlers::update_growth_stage),
        )
        .route(
            "/:planting_id/harvests",
            get(handlers::get_harvests_by_planting),
        )
        .route(
            "/:planting_id/inspections",
            get(handlers::get_inspections_by_planting),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Harvest routes (protected)
fn harvest_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_harvests).post(handlers::record_harvest),
        )
        .route(
            "/:harvest_id",
            get(handlers::get_harvest)
                .put(handlers::update_harvest)
                .delete(handlers::delete_harvest),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Inspection routes (protected)
fn inspection_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::record_inspection))
        .route(
            "/:inspection_id",
            get(handlers::get_inspection).delete(handlers::delete_inspection),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Report routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/corn/standing-crop/:municipality_id",
            get(handlers::corn_standing_crop_report),
        )
        .route(
            "/rice/planting/:municipality_id",
            get(handlers::rice_planting_report),
        )
        .route(
            "/rice/harvesting/:municipality_id",
            get(handlers::rice_harvesting_report),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
