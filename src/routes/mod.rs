use actix_cors::Cors;
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use log::error;
use tera::{Context, Tera};

use crate::dto::ErrorDto;
use crate::services::ServiceError;

pub mod api;
pub mod main;

lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_template(
            "main/index.html",
            include_str!("../../templates/main/index.html"),
        ) {
            println!("Parsing error(s): {}", e);
            ::std::process::exit(1);
        }
        tera
    };
}

fn render_template(template: &str, context: &Context) -> HttpResponse {
    match TEMPLATES.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Failed to render template {}: {}", template, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// JSON `{"error": ...}` response with a status matching the error's origin.
fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorDto::new(err.to_string());
    if err.is_client_error() {
        HttpResponse::BadRequest().json(body)
    } else {
        error!("Request failed: {err}");
        HttpResponse::InternalServerError().json(body)
    }
}

/// CORS policy for the API: any origin unless one origin is configured.
///
/// `"*"` is treated as unset, `Cors::allowed_origin` refuses the wildcard.
pub fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin.map(str::trim) {
        Some(origin) if !origin.is_empty() && origin != "*" => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header(),
        _ => Cors::permissive(),
    }
}
