use crate::{
    dtos::seminar::{CreatedResponse, ErrorResponse},
    routes::{auth, category, health, seminar},
};
use models::seminar_data::{
    CategoryOption, SeminarDeleteInfo, SeminarDetails, SeminarEditForm, SeminarForm, SeminarInfo,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::me,
        category::get_categories,
        seminar::get_seminars,
        seminar::create_seminar,
        seminar::get_joined_seminars,
        seminar::get_seminar_by_id,
        seminar::get_edit_form,
        seminar::edit_seminar,
        seminar::get_delete_info,
        seminar::delete_seminar,
        seminar::join_seminar,
        seminar::leave_seminar
    ),
    components(schemas(
        CategoryOption,
        CreatedResponse,
        ErrorResponse,
        SeminarDeleteInfo,
        SeminarDetails,
        SeminarEditForm,
        SeminarForm,
        SeminarInfo
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Categories", description = "Seminar categories"),
        (name = "Seminars", description = "Seminar listing, signup and management"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Seminar API",
        version = "1.0.0",
        description = "Seminar signup API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
