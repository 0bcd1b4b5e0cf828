//! File operations against a mock WebDAV endpoint.

mod helpers;

use helpers::{BASIC_AUTH, client_for, multistatus};
use mockito::Matcher;
use nextcloud_core::{FileKind, ShareOptions};
use nextcloud_dav::ClientError;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_entries() {
        let mut server = mockito::Server::new_async().await;
        let body = multistatus(
            r#"<d:response><d:href>/remote.php/dav/files/alice/docs/</d:href><d:propstat><d:prop><d:resourcetype><d:collection/></d:resourcetype></d:prop></d:propstat></d:response>
<d:response><d:href>/remote.php/dav/files/alice/docs/report.pdf</d:href><d:propstat><d:prop><d:getcontentlength>1024</d:getcontentlength><d:getcontenttype>application/pdf</d:getcontenttype><d:getetag>"e1"</d:getetag><d:resourcetype/></d:prop></d:propstat></d:response>
<d:response><d:href>/remote.php/dav/files/alice/docs/old/</d:href><d:propstat><d:prop><d:resourcetype><d:collection/></d:resourcetype></d:prop></d:propstat></d:response>"#,
        );
        let mock = server
            .mock("PROPFIND", "/remote.php/dav/files/alice/docs/")
            .match_header("authorization", BASIC_AUTH)
            .match_header("depth", "1")
            .with_status(207)
            .with_header("content-type", "application/xml; charset=utf-8")
            .with_body(body)
            .create_async()
            .await;

        let entries = client_for(&server).list_entries("/docs").await.unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].filename, "/docs/report.pdf");
        assert_eq!(entries[0].kind, FileKind::File);
        assert_eq!(entries[0].size, 1024);
        assert_eq!(entries[0].etag.as_deref(), Some("e1"));
        assert_eq!(entries[1].basename, "old");
        assert_eq!(entries[1].kind, FileKind::Directory);
    }

    #[tokio::test]
    async fn test_list_entries_missing_directory_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PROPFIND", "/remote.php/dav/files/alice/nope/")
            .with_status(404)
            .create_async()
            .await;

        let result = client_for(&server).list_entries("nope").await;

        assert_eq!(
            result,
            Err(ClientError::Transport {
                action: "list files",
                reason: "Not Found".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_read_entry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/remote.php/dav/files/alice/notes/todo%20list.txt")
            .match_header("authorization", BASIC_AUTH)
            .with_status(200)
            .with_body("buy milk")
            .create_async()
            .await;

        let content = client_for(&server)
            .read_entry("/notes/todo list.txt")
            .await
            .unwrap();

        assert_eq!(content, "buy milk");
    }

    #[tokio::test]
    async fn test_read_entry_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/remote.php/dav/files/alice/missing.txt")
            .with_status(404)
            .create_async()
            .await;

        let error = client_for(&server)
            .read_entry("/missing.txt")
            .await
            .unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Not found: /missing.txt");
    }

    #[tokio::test]
    async fn test_write_entry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/remote.php/dav/files/alice/hello.txt")
            .match_body("hello world")
            .with_status(201)
            .create_async()
            .await;

        client_for(&server)
            .write_entry("/hello.txt", "hello world")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_write_entry_failure_reports_status_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/remote.php/dav/files/alice/locked.txt")
            .with_status(423)
            .create_async()
            .await;

        let error = client_for(&server)
            .write_entry("locked.txt", "x")
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Failed to upload file: Locked");
    }

    #[tokio::test]
    async fn test_remove_entry_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/remote.php/dav/files/alice/gone")
            .with_status(404)
            .create_async()
            .await;

        let result = client_for(&server).remove_entry("/gone").await;

        assert_eq!(result, Err(ClientError::NotFound("/gone".to_string())));
    }

    #[tokio::test]
    async fn test_create_share() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ocs/v2.php/apps/files_sharing/api/v1/shares")
            .match_header("ocs-apirequest", "true")
            .match_header("accept", "application/json")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("path".into(), "/docs/report.pdf".into()),
                Matcher::UrlEncoded("shareType".into(), "3".into()),
                Matcher::UrlEncoded("password".into(), "hunter2".into()),
                Matcher::UrlEncoded("expireDate".into(), "2025-12-31".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ocs":{"meta":{"status":"ok"},"data":{"id":42,"url":"https://host/s/abc","token":"abc","path":"/docs/report.pdf","expiration":"2025-12-31 00:00:00","password":"$2y$hash"}}}"#,
            )
            .create_async()
            .await;
        let options = ShareOptions {
            password: Some("hunter2".to_string()),
            expire_date: Some("2025-12-31".to_string()),
        };

        let share = client_for(&server)
            .create_share("/docs/report.pdf", &options)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(share.id, "42");
        assert_eq!(share.url, "https://host/s/abc");
        assert_eq!(share.token, "abc");
        assert_eq!(share.path, "/docs/report.pdf");
        assert_eq!(share.expiration.as_deref(), Some("2025-12-31"));
        assert!(share.password);
    }

    #[tokio::test]
    async fn test_create_share_forbidden() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ocs/v2.php/apps/files_sharing/api/v1/shares")
            .with_status(403)
            .create_async()
            .await;

        let error = client_for(&server)
            .create_share("/private", &ShareOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Failed to create share: Forbidden");
    }
}
