pub mod auth_service;
pub mod holdings_service;
pub mod list_projector;
pub mod price_service;
pub mod refresh_service;
pub mod series_service;
