// File: services/courtbook_backend/src/main.rs
use axum::{routing::get, Router};
#[cfg(feature = "booking")]
use courtbook_booking::routes as booking_routes;
use courtbook_common::logging;
#[cfg(feature = "booking")]
use courtbook_common::services::ServiceFactory;
use courtbook_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[cfg(feature = "booking")]
mod service_factory;
#[cfg(feature = "booking")]
use service_factory::CourtbookServiceFactory;

#[tokio::main]
async fn main() {
    logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Courtbook API!" }))
        .merge(courtbook_common::routes());

    #[cfg(feature = "booking")]
    let booking_router = {
        let factory = CourtbookServiceFactory::new(config.clone());
        match factory.reservation_service() {
            Some(service) => booking_routes::routes_with_service(config.clone(), service),
            None => {
                info!("Booking feature compiled, but disabled via runtime config or missing booking section.");
                Router::new()
            }
        }
    };

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "booking")]
        {
            router = router.merge(booking_router);
        }
        router
    });

    #[allow(unused_mut)]
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "booking")]
        use courtbook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Courtbook API",
                version = "0.1.0",
                description = "Courtbook Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Courtbook", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "booking")]
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /docs");

        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
