use std::path::PathBuf;
use std::sync::Arc;

use actix_files::Files;
use actix_multipart::form::tempfile::TempFileConfig;
use actix_web::{App, HttpServer, middleware, web};

use crate::domain::UploadRoot;
use crate::models::config::ServerConfig;
use crate::printing::SystemPrinter;
use crate::services::printing::PrintService;
use crate::services::uploads::UploadService;

pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod printing;
pub mod routes;
pub mod services;

/// Start the HTTP server and block until it shuts down.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let upload_root = UploadRoot::from(PathBuf::from(&server_config.upload_path));
    upload_root.ensure()?;

    let backend = SystemPrinter::for_host(server_config.sumatra_pdf_path.clone());
    log::info!("Using {} print backend", backend.platform());

    let upload_service = UploadService::new(upload_root.clone(), server_config.max_upload_bytes);
    let print_service = PrintService::new(
        Arc::new(backend),
        upload_root.clone(),
        server_config.remove_after_print,
    );

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Server running on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(routes::cors(server_config.allowed_origin.as_deref()))
            .app_data(web::Data::new(upload_service.clone()))
            .app_data(web::Data::new(print_service.clone()))
            .app_data(routes::api::json_config())
            .app_data(routes::api::multipart_config(server_config.max_upload_bytes))
            .app_data(TempFileConfig::default().directory(upload_root.incoming_dir()))
            .service(Files::new("/static", &server_config.static_dir))
            .service(routes::main::index)
            .service(routes::api::list_printers)
            .service(routes::api::upload_file)
            .service(routes::api::print_file)
    })
    .bind(bind_address)?
    .run()
    .await
}
