use serde::Serialize;
use uuid::Uuid;

use super::db::FeedWithCreatorRow;

#[derive(Serialize)]
pub struct FeedAddResult {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub followed_by: String,
}

#[derive(Serialize)]
pub struct FeedList {
    pub feeds: Vec<FeedWithCreatorRow>,
}

#[derive(Serialize)]
pub struct FollowResult {
    pub feed: String,
    pub user: String,
}

#[derive(Serialize)]
pub struct FollowingList {
    pub feeds: Vec<String>,
}

#[derive(Serialize)]
pub struct UnfollowResult {
    pub url: String,
    pub removed: bool,
}
