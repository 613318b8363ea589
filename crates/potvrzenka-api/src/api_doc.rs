//! OpenAPI documentation definition.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "potvrzenka",
        description = "Generates payment-confirmation PDFs from bank CSV exports and returns them as a ZIP archive"
    ),
    paths(
        crate::handlers::confirmations::generate_confirmations,
        crate::handlers::health::health,
    ),
    components(schemas(crate::error::ErrorResponse)),
    tags(
        (name = "confirmations", description = "Bank-export upload and confirmation generation"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
