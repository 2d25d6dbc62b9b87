// Route exports
pub mod errors;
pub mod next_stop;

pub use errors::{ApiError, handle_json_payload_error};
pub use next_stop::AppState;

use actix_web::web;

/// Mount the routes at the root and again under `/api/v1`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(next_stop::configure).service(
        web::scope("/api/v1")
            .configure(next_stop::configure),
    );
}
