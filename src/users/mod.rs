use anyhow::{bail, Context, Result};
use clap::Args;
use sqlx::PgPool;

use crate::config::Config;
use crate::telemetry::{self};
use crate::telemetry::ops::user::Phase as UserPhase;

mod db;
pub mod types;

pub use db::UserRow;

/// egret register <name>
#[derive(Args)]
pub struct RegisterCmd {
    pub name: String,
}

/// egret login <name>
#[derive(Args)]
pub struct LoginCmd {
    pub name: String,
}

pub async fn register(pool: &PgPool, cfg: &mut Config, args: RegisterCmd) -> Result<()> {
    let log = telemetry::user();
    let _g = log.root_span_kv([("name", args.name.clone())]).entered();
    let _s = log.span(&UserPhase::Register).entered();

    // duplicate names surface as the store's uniqueness error
    let user = db::create_user(pool, &args.name).await?;
    cfg.set_user(&user.name)?;

    log.info(format!("🙋 user {} registered (id={})", user.name, user.id));
    if telemetry::config::json_mode() {
        let result = types::UserResult { id: user.id, name: user.name };
        log.result(&result)?;
    }
    Ok(())
}

pub async fn login(pool: &PgPool, cfg: &mut Config, args: LoginCmd) -> Result<()> {
    let log = telemetry::user();
    let _g = log.root_span_kv([("name", args.name.clone())]).entered();
    let _s = log.span(&UserPhase::Login).entered();

    let Some(user) = db::get_user(pool, &args.name).await? else {
        bail!("unknown user: {}", args.name);
    };
    cfg.set_user(&user.name)?;

    log.info(format!("🙋 {} is now the logged-in user", user.name));
    if telemetry::config::json_mode() {
        let result = types::UserResult { id: user.id, name: user.name };
        log.result(&result)?;
    }
    Ok(())
}

pub async fn list(pool: &PgPool, cfg: &Config) -> Result<()> {
    let log = telemetry::user();
    let _g = log.root_span().entered();
    let _s = log.span(&UserPhase::List).entered();

    let users = db::list_users(pool).await?;
    let current = cfg.current_user_name.as_deref();
    for u in &users {
        if Some(u.name.as_str()) == current {
            log.info(format!("* {} (current)", u.name));
        } else {
            log.info(format!("* {}", u.name));
        }
    }
    if telemetry::config::json_mode() {
        let list = types::UserList {
            users: users
                .iter()
                .map(|u| types::UserEntry { name: u.name.clone(), current: Some(u.name.as_str()) == current })
                .collect(),
        };
        log.result(&list)?;
    }
    Ok(())
}

/// Deletes every user (feeds, follows and posts cascade). Exists to make
/// manual testing repeatable.
pub async fn reset(pool: &PgPool) -> Result<()> {
    let log = telemetry::user();
    let _g = log.root_span().entered();
    let _s = log.span(&UserPhase::Reset).entered();

    let deleted = db::delete_all_users(pool).await?;
    log.info(format!("🧹 reset complete — {} user(s) deleted", deleted));
    if telemetry::config::json_mode() {
        let result = types::ResetResult { users_deleted: deleted };
        log.result(&result)?;
    }
    Ok(())
}

/// Resolve the logged-in user from the config file, failing with a clear
/// error when nobody is logged in or the user is missing from the store.
pub async fn require_current(pool: &PgPool, cfg: &Config) -> Result<UserRow> {
    let name = cfg
        .current_user_name
        .as_deref()
        .context("no user is logged in; run `egret login <name>` first")?;
    let user = db::get_user(pool, name)
        .await?
        .with_context(|| format!("logged-in user {} not found in the store", name))?;
    Ok(user)
}
