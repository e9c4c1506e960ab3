use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, SaveThemeRequest, ThemeResponse};
use crate::routes::{not_saved, run_blocking, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/preferences/theme", web::get().to(get_theme))
        .route("/preferences/theme", web::put().to(save_theme));
}

/// GET /api/v1/preferences/theme
async fn get_theme(state: web::Data<AppState>) -> impl Responder {
    let preferences = state.preferences.clone();
    match run_blocking(move || preferences.load()).await {
        Ok(preference) => HttpResponse::Ok().json(ThemeResponse::from(preference)),
        Err(e) => {
            tracing::error!(error = %e, "failed to read theme preference");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "storage_error".to_string(),
                message: e.to_string(),
                status_code: 500,
                retryable: true,
            })
        }
    }
}

/// PUT /api/v1/preferences/theme
///
/// Request body:
/// ```json
/// { "theme": "light|dark|system" }
/// ```
async fn save_theme(
    state: web::Data<AppState>,
    req: web::Json<SaveThemeRequest>,
) -> impl Responder {
    let preferences = state.preferences.clone();
    let theme = req.theme;
    match run_blocking(move || preferences.save(theme)).await {
        Ok(preference) => HttpResponse::Ok().json(ThemeResponse::from(Some(preference))),
        Err(e) => {
            tracing::error!(error = %e, "failed to save theme preference");
            not_saved(&e)
        }
    }
}
