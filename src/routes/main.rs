use actix_web::{Responder, get, web};
use tera::Context;

use crate::routes::render_template;
use crate::services::uploads::UploadService;

#[get("/")]
pub async fn index(upload_service: web::Data<UploadService>) -> impl Responder {
    let mut context = Context::new();
    context.insert("title", "Print Package Manager");
    context.insert(
        "max_upload_mb",
        &(upload_service.max_upload_bytes() / (1024 * 1024)),
    );

    render_template("main/index.html", &context)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use actix_web::{App, http::StatusCode, test};

    use super::*;
    use crate::domain::UploadRoot;

    #[actix_web::test]
    async fn index_renders_print_form() {
        let upload_service =
            UploadService::new(UploadRoot::from(PathBuf::from("uploads")), 50 * 1024 * 1024);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(upload_service))
                .service(index),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Print Package Manager"));
        assert!(html.contains("accept=\"application/pdf\""));
        assert!(html.contains("50 MB"));
    }
}
