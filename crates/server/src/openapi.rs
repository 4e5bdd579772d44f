use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ListItemInputDoc { pub list: String }

#[derive(ToSchema)]
pub struct ListRecordDoc { pub id: String, pub list: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::lists::list,
        crate::routes::lists::create,
        crate::routes::lists::get,
        crate::routes::lists::update,
        crate::routes::lists::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ListItemInputDoc,
            ListRecordDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "lists")
    )
)]
pub struct ApiDoc;
