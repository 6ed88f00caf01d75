/// One parsed RSS document. Ephemeral: decomposed into posts, never stored whole.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<FeedItem>,
}

/// One `<item>` from the channel. Missing optional fields map to empty strings.
/// `pub_date` stays a raw string here; the scheduler parses it best-effort.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
}
