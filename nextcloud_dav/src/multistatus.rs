//! Parsing of WebDAV `PROPFIND` multistatus responses into file entries.

use chrono::DateTime;
use log::debug;
use nextcloud_core::{FileEntry, FileKind};
use percent_encoding::percent_decode_str;
use quick_xml::Reader;
use quick_xml::events::Event;

#[derive(Debug, Clone, Copy)]
enum Prop {
    Href,
    LastModified,
    ContentLength,
    ContentType,
    Etag,
}

impl Prop {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"href" => Some(Prop::Href),
            b"getlastmodified" => Some(Prop::LastModified),
            b"getcontentlength" => Some(Prop::ContentLength),
            b"getcontenttype" => Some(Prop::ContentType),
            b"getetag" => Some(Prop::Etag),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct RawResponse {
    href: String,
    last_modified: Option<String>,
    content_length: Option<String>,
    content_type: Option<String>,
    etag: Option<String>,
    collection: bool,
}

impl RawResponse {
    fn set(&mut self, prop: Prop, value: String) {
        match prop {
            Prop::Href => self.href = value,
            Prop::LastModified => self.last_modified = Some(value),
            Prop::ContentLength => self.content_length = Some(value),
            Prop::ContentType => self.content_type = Some(value),
            Prop::Etag => self.etag = Some(value),
        }
    }
}

/// Parses a depth-1 `PROPFIND` response into entries relative to the
/// user's files root.
///
/// `files_root` is the decoded URL path of the files root (for example
/// `/remote.php/dav/files/alice`); `requested` is the normalized path that
/// was listed. The entry describing the listed collection itself is
/// omitted.
pub fn parse_file_entries(
    body: &str,
    files_root: &str,
    requested: &str,
) -> Result<Vec<FileEntry>, String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut responses = Vec::new();
    let mut current: Option<RawResponse> = None;
    let mut prop: Option<Prop> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"response" => current = Some(RawResponse::default()),
                b"collection" => {
                    if let Some(response) = current.as_mut() {
                        response.collection = true;
                    }
                }
                name => prop = Prop::from_local_name(name),
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"collection" {
                    if let Some(response) = current.as_mut() {
                        response.collection = true;
                    }
                }
            }
            Ok(Event::Text(text)) => {
                if let (Some(response), Some(prop)) = (current.as_mut(), prop) {
                    let value = text.unescape().map_err(|e| e.to_string())?;
                    response.set(prop, value.into_owned());
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"response" {
                    if let Some(response) = current.take() {
                        responses.push(response);
                    }
                }
                prop = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                ));
            }
            _ => {}
        }
    }

    let requested = normalize_path(requested);
    Ok(responses
        .into_iter()
        .filter_map(|response| into_entry(response, files_root))
        .filter(|entry| entry.filename != requested)
        .collect())
}

/// Normalizes a user supplied path to the `/a/b` form used for filenames.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

fn into_entry(response: RawResponse, files_root: &str) -> Option<FileEntry> {
    let decoded = percent_decode_str(&response.href).decode_utf8_lossy();
    let href_path = strip_origin(&decoded);
    let Some(relative) = href_path.strip_prefix(files_root.trim_end_matches('/')) else {
        debug!("Skipping href outside files root: {}", href_path);
        return None;
    };

    let filename = normalize_path(relative);
    let basename = filename.rsplit('/').next().unwrap_or_default().to_string();
    let kind = if response.collection {
        FileKind::Directory
    } else {
        FileKind::File
    };

    Some(FileEntry {
        basename,
        size: response
            .content_length
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0),
        lastmod: response
            .last_modified
            .as_deref()
            .map(http_date_to_rfc3339)
            .unwrap_or_default(),
        etag: response.etag.map(|etag| etag.replace('"', "")),
        mime: match kind {
            FileKind::File => response.content_type,
            FileKind::Directory => None,
        },
        kind,
        filename,
    })
}

/// Hrefs are usually absolute paths, but some servers answer with full URLs.
fn strip_origin(href: &str) -> &str {
    match href.find("://") {
        Some(scheme_end) => {
            let rest = &href[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => href,
    }
}

/// Converts an RFC 2822 HTTP date to RFC 3339, leaving unparseable input
/// unchanged.
fn http_date_to_rfc3339(value: &str) -> String {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|date| date.to_rfc3339())
        .unwrap_or_else(|_| value.to_string())
}
