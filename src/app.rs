use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;

use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::controller::contacts;
use crate::repo::ContactStore;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("API is running")
}

/// Cross-origin policy admitting the single configured client origin
fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_header(header::CONTENT_TYPE)
        .supports_credentials()
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    store: Arc<dyn ContactStore>,
    allowed_origin: String,
) -> anyhow::Result<Server> {
    // Wrap application data
    let store: web::Data<dyn ContactStore> = web::Data::from(store);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origin))
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .service(health_check)
            .service(contacts::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
