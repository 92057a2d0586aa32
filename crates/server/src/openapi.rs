use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub mobile: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub group_id: Option<String>,
}

/// Create/update body. `name` and `mobile` are required by validation.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInputDoc {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub group_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ContactEnvelopeDoc {
    /// `Success`
    pub status: String,
    pub data: ContactDoc,
    pub msg: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ContactListEnvelopeDoc {
    pub status: String,
    pub data: Vec<ContactDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct FailedEnvelopeDoc {
    /// `Failed`
    pub status: String,
    /// Always null
    pub data: Option<String>,
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct FieldViolationDoc {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<String>,
    pub msg: String,
    pub path: String,
    pub location: String,
}

/// Body of a 400 caused by validation.
#[derive(Serialize, ToSchema)]
pub struct ValidationErrorsDoc {
    pub errors: Vec<FieldViolationDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::contacts::list,
        crate::routes::contacts::get,
        crate::routes::contacts::create,
        crate::routes::contacts::update,
        crate::routes::contacts::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ContactDoc,
            ContactInputDoc,
            ContactEnvelopeDoc,
            ContactListEnvelopeDoc,
            FailedEnvelopeDoc,
            FieldViolationDoc,
            ValidationErrorsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "contacts")
    )
)]
pub struct ApiDoc;
