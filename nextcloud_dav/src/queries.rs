//! Request bodies for the DAV queries the client issues.

/// Lower bound used when a listing has no start date.
pub const UNBOUNDED_START: &str = "19700101T000000Z";

/// Upper bound used when a listing has no end date.
pub const UNBOUNDED_END: &str = "20991231T235959Z";

/// `PROPFIND` body for directory listings.
pub const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<d:propfind xmlns:d="DAV:">
  <d:prop>
    <d:getlastmodified/>
    <d:getcontentlength/>
    <d:getcontenttype/>
    <d:getetag/>
    <d:resourcetype/>
  </d:prop>
</d:propfind>"#;

/// `addressbook-query` body returning every card with its data.
pub const ADDRESSBOOK_QUERY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<c:addressbook-query xmlns:d="DAV:" xmlns:c="urn:ietf:params:xml:ns:carddav">
  <d:prop>
    <d:getetag/>
    <c:address-data/>
  </d:prop>
</c:addressbook-query>"#;

/// Resolves the CalDAV time range for optional `YYYY-MM-DD` bounds.
///
/// A start date covers its whole day from midnight, an end date up to
/// `23:59:59`. Missing bounds fall back to an effectively unbounded range.
pub fn time_range(start_date: Option<&str>, end_date: Option<&str>) -> (String, String) {
    let start = start_date
        .map(|d| format!("{}T000000Z", d.replace('-', "")))
        .unwrap_or_else(|| UNBOUNDED_START.to_string());
    let end = end_date
        .map(|d| format!("{}T235959Z", d.replace('-', "")))
        .unwrap_or_else(|| UNBOUNDED_END.to_string());
    (start, end)
}

/// `calendar-query` body selecting every `VEVENT` within the range.
pub fn calendar_query(start: &str, end: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<c:calendar-query xmlns:d="DAV:" xmlns:c="urn:ietf:params:xml:ns:caldav">
  <d:prop>
    <d:getetag/>
    <c:calendar-data/>
  </d:prop>
  <c:filter>
    <c:comp-filter name="VCALENDAR">
      <c:comp-filter name="VEVENT">
        <c:time-range start="{}" end="{}"/>
      </c:comp-filter>
    </c:comp-filter>
  </c:filter>
</c:calendar-query>"#,
        start, end
    )
}
