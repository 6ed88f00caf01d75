use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct UserResult {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize)]
pub struct UserEntry {
    pub name: String,
    pub current: bool,
}

#[derive(Serialize)]
pub struct UserList {
    pub users: Vec<UserEntry>,
}

#[derive(Serialize)]
pub struct ResetResult {
    pub users_deleted: u64,
}
