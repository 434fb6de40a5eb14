use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Lead Exchange API",
        version = "0.1.0",
        description = "Buyer leads, seller listings and embedding-based matching between them"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/leads", api = domain_leads::handlers::ApiDoc),
        (path = "/properties", api = domain_properties::handlers::ApiDoc),
        (path = "/embeddings", api = domain_embeddings::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths_are_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/leads/{id}"));
        assert!(paths.contains(&"/properties/match/{lead_id}"));
        assert!(paths.contains(&"/embeddings/model-info"));
    }
}
