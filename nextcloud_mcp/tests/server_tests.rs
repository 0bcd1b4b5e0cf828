//! Server level behaviour: catalog contents, unknown tools and the HTTP router.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use helpers::server_for;
use serde_json::{Value, json};
use tower::ServiceExt;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_lists_tools_in_module_order() {
        let mock = mockito::Server::new_async().await;
        let server = server_for(&mock);

        let names: Vec<String> = server
            .catalog()
            .list_tools()
            .iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "nextcloud_list_files",
                "nextcloud_read_file",
                "nextcloud_upload_file",
                "nextcloud_delete",
                "nextcloud_create_share",
                "nextcloud_list_events",
                "nextcloud_create_event",
                "nextcloud_delete_event",
                "nextcloud_list_contacts",
                "nextcloud_get_contact",
                "nextcloud_create_contact",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let mock = mockito::Server::new_async().await;
        let server = server_for(&mock);

        let error = server.dispatch("nextcloud_rename", None).await.unwrap_err();

        assert_eq!(error.message, "Unknown tool: nextcloud_rename");
    }

    #[tokio::test]
    async fn test_owner_modules() {
        let mock = mockito::Server::new_async().await;
        let server = server_for(&mock);
        let catalog = server.catalog();

        assert_eq!(catalog.owner_of("nextcloud_delete"), Some("files"));
        assert_eq!(catalog.owner_of("nextcloud_delete_event"), Some("calendar"));
        assert_eq!(catalog.owner_of("nextcloud_get_contact"), Some("contacts"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let mock = mockito::Server::new_async().await;
        let router = server_for(&mock).http_router();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_preflight_is_answered() {
        let mock = mockito::Server::new_async().await;
        let router = server_for(&mock).http_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/mcp")
                    .header(header::ORIGIN, "https://app.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));
    }

    #[tokio::test]
    async fn test_mcp_endpoint_is_mounted() {
        let mock = mockito::Server::new_async().await;
        let router = server_for(&mock).http_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mcp")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_ne!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let mock = mockito::Server::new_async().await;
        let router = server_for(&mock).http_router();

        let response = router
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
