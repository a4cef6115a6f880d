use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::login,
        api::auth::logout,
        api::auth::get_me,
        api::catalog::list_forests,
        api::catalog::list_mushrooms,
        api::visit::list_visits,
        api::visit::create_form,
        api::visit::create_visit,
        api::visit::read_visit,
        api::visit::delete_visit,
        api::visit::edit_form,
        api::visit::update_visit,
    ),
    tags(
        (name = "mushroom-hunters", description = "Mushroom hunters visit log")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_served_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/auth/login",
            "/auth/logout",
            "/auth/me",
            "/forests",
            "/mushrooms",
            "/visits",
            "/visits/create",
            "/visits/read/{id}",
            "/visits/delete/{id}",
            "/visits/edit/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{} is not documented", path);
        }
    }
}
