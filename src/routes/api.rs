use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::{
    HttpResponse, Responder, error, error::BlockingError, get, post, web,
};
use log::error;
use serde::Serialize;

use crate::dto::{ErrorDto, UploadResponseDto};
use crate::forms::main::{PrintForm, UploadPdfForm};
use crate::routes::error_response;
use crate::services::ServiceResult;
use crate::services::printing::PrintService;
use crate::services::uploads::UploadService;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[get("/api/printers")]
pub async fn list_printers(print_service: web::Data<PrintService>) -> impl Responder {
    let service = print_service.clone();
    respond(web::block(move || service.list_printers()).await)
}

#[post("/api/upload")]
pub async fn upload_file(
    upload_service: web::Data<UploadService>,
    MultipartForm(form): MultipartForm<UploadPdfForm>,
) -> impl Responder {
    let service = upload_service.clone();
    respond(
        web::block(move || {
            service
                .persist_upload(form.file)
                .map(UploadResponseDto::from)
        })
        .await,
    )
}

#[post("/api/print")]
pub async fn print_file(
    print_service: web::Data<PrintService>,
    web::Json(form): web::Json<PrintForm>,
) -> impl Responder {
    let service = print_service.clone();
    respond(web::block(move || service.print(&form)).await)
}

fn respond<T: Serialize>(result: Result<ServiceResult<T>, BlockingError>) -> HttpResponse {
    match result {
        Ok(Ok(body)) => HttpResponse::Ok().json(body),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            error!("Blocking task failed: {err}");
            HttpResponse::InternalServerError().json(ErrorDto::new("Internal server error"))
        }
    }
}

/// JSON extractor settings answering malformed bodies with a JSON 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorDto::new(format!("Invalid request body: {err}"));
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Multipart extractor settings capping the request body near the upload ceiling.
pub fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD))
        .error_handler(|err, _req| {
            let body = ErrorDto::new(format!("Invalid upload: {err}"));
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}
