//! OCS share API response handling.

use nextcloud_core::{ShareLink, ShareOptions};
use serde::Deserialize;
use serde_json::Value;

/// Share type for public links.
pub const PUBLIC_LINK_SHARE_TYPE: &str = "3";

#[derive(Debug, Deserialize)]
struct OcsEnvelope {
    ocs: OcsBody,
}

#[derive(Debug, Deserialize)]
struct OcsBody {
    data: ShareData,
}

#[derive(Debug, Deserialize)]
struct ShareData {
    id: Value,
    url: String,
    token: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    expiration: Option<String>,
    #[serde(default)]
    password: Option<Value>,
}

/// Form fields for a public link share request.
pub fn share_form<'a>(path: &'a str, options: &'a ShareOptions) -> Vec<(&'static str, &'a str)> {
    let mut form = vec![("path", path), ("shareType", PUBLIC_LINK_SHARE_TYPE)];
    if let Some(password) = options.password.as_deref() {
        form.push(("password", password));
    }
    if let Some(expire_date) = options.expire_date.as_deref() {
        form.push(("expireDate", expire_date));
    }
    form
}

/// Builds a [`ShareLink`] from an OCS JSON response.
///
/// Fields the server leaves out are filled from the request: the shared
/// path, the requested expiration date and whether a password was sent.
pub fn parse_share(
    body: &str,
    requested_path: &str,
    options: &ShareOptions,
) -> Result<ShareLink, String> {
    let envelope: OcsEnvelope = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let data = envelope.ocs.data;

    let id = match data.id {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        other => return Err(format!("unexpected share id: {}", other)),
    };

    let expiration = data
        .expiration
        .as_deref()
        .and_then(|e| e.split_whitespace().next())
        .map(String::from)
        .or_else(|| options.expire_date.clone());

    Ok(ShareLink {
        id,
        url: data.url,
        token: data.token,
        path: data.path.unwrap_or_else(|| requested_path.to_string()),
        expiration,
        password: has_password(data.password.as_ref()) || options.password.is_some(),
    })
}

fn has_password(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_share_server_fields() {
        let body = r#"{"ocs":{"meta":{"status":"ok","statuscode":200},"data":{"id":"17","share_type":3,"url":"https://cloud.example.com/s/Xy7","token":"Xy7","path":"/Photos","expiration":"2025-06-30 00:00:00","password":"$2y$10$hash"}}}"#;

        let share = parse_share(body, "Photos", &ShareOptions::default()).unwrap();

        assert_eq!(share.id, "17");
        assert_eq!(share.path, "/Photos");
        assert_eq!(share.expiration.as_deref(), Some("2025-06-30"));
        assert!(share.password);
    }

    #[test]
    fn test_parse_share_request_fallbacks() {
        let body = r#"{"ocs":{"data":{"id":9,"url":"https://h/s/t","token":"t","expiration":null,"password":null}}}"#;
        let options = ShareOptions {
            password: None,
            expire_date: Some("2030-01-01".to_string()),
        };

        let share = parse_share(body, "/a.txt", &options).unwrap();

        assert_eq!(share.id, "9");
        assert_eq!(share.path, "/a.txt");
        assert_eq!(share.expiration.as_deref(), Some("2030-01-01"));
        assert!(!share.password);
    }

    #[test]
    fn test_parse_share_rejects_missing_data() {
        assert!(parse_share(r#"{"ocs":{"meta":{}}}"#, "/", &ShareOptions::default()).is_err());
    }

    #[test]
    fn test_share_form_optional_fields() {
        let options = ShareOptions {
            password: Some("pw".to_string()),
            expire_date: None,
        };
        let form = share_form("/x", &options);
        assert_eq!(form, vec![("path", "/x"), ("shareType", "3"), ("password", "pw")]);
    }
}
