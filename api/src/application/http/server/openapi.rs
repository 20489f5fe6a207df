use crate::application::http::menu::router::MenuApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Menu Judge API",
        description = "Photograph a restaurant menu, get every dish explained"
    ),
    paths(crate::application::http::health::health_check),
    nest(
        (path = "/api", api = MenuApiDoc),
    )
)]
pub struct ApiDoc;
