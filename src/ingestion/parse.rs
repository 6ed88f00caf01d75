use bytes::Bytes;
use chrono::{DateTime, Utc};
use rss::Channel;

use super::FetchError;
use super::types::{FeedDocument, FeedItem};

pub fn parse_document(xml: &Bytes) -> Result<FeedDocument, FetchError> {
    let ch = Channel::read_from(&xml[..])?;

    let items = ch
        .items()
        .iter()
        .map(|item| FeedItem {
            title: unescape(item.title().unwrap_or_default()),
            link: item.link().unwrap_or_default().to_string(),
            description: unescape(item.description().unwrap_or_default()),
            pub_date: item.pub_date().unwrap_or_default().to_string(),
        })
        .collect();

    Ok(FeedDocument {
        title: unescape(ch.title()),
        link: ch.link().to_string(),
        description: unescape(ch.description()),
        items,
    })
}

// Source feeds often double-encode entities, so decode once more after XML parsing.
fn unescape(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

/// Best-effort pubDate parsing (RFC 1123 with numeric offset, i.e. RFC 2822).
/// Unparseable dates yield None; an item is never rejected for its date alone.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixture(items: &str) -> Bytes {
        Bytes::from(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Boot &amp;amp; Dev</title>
    <link>https://example.com</link>
    <description>Posts about code &amp;amp; coffee</description>
    {items}
  </channel>
</rss>"#
        ))
    }

    #[test]
    fn parses_channel_and_items() {
        let xml = fixture(
            r#"<item>
                 <title>First &amp;amp; Foremost</title>
                 <link>https://example.com/1</link>
                 <description>one</description>
                 <pubDate>Mon, 02 Jan 2006 15:04:05 -0700</pubDate>
               </item>
               <item>
                 <title>Second</title>
                 <link>https://example.com/2</link>
                 <description>two</description>
                 <pubDate>Tue, 03 Jan 2006 15:04:05 -0700</pubDate>
               </item>"#,
        );
        let doc = parse_document(&xml).unwrap();
        assert_eq!(doc.title, "Boot & Dev");
        assert_eq!(doc.description, "Posts about code & coffee");
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[0].title, "First & Foremost");
        assert_eq!(doc.items[0].link, "https://example.com/1");
        assert_eq!(doc.items[1].pub_date, "Tue, 03 Jan 2006 15:04:05 -0700");
    }

    #[test]
    fn missing_item_fields_become_empty_strings() {
        let xml = fixture("<item><title>Bare</title></item>");
        let doc = parse_document(&xml).unwrap();
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].link, "");
        assert_eq!(doc.items[0].description, "");
        assert_eq!(doc.items[0].pub_date, "");
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let xml = Bytes::from_static(b"this is not xml at all");
        let err = parse_document(&xml).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn pub_date_rfc1123z_parses() {
        let dt = parse_pub_date("Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2006, 1, 2, 22, 4, 5).unwrap());
    }

    #[test]
    fn pub_date_garbage_is_none() {
        assert_eq!(parse_pub_date("not-a-date"), None);
        assert_eq!(parse_pub_date(""), None);
    }
}
