use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::env;

mod agg;
mod browse;
mod config;
mod db;
mod feeds;
mod ingestion;
mod telemetry;
mod users;

#[derive(Parser)]
#[command(name = "egret", about = "RSS feed aggregator CLI")]
struct Cli {
    #[arg(global = true, short, long)]
    dsn: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user and log them in
    Register(users::RegisterCmd),
    /// Switch the logged-in user
    Login(users::LoginCmd),
    /// List all users
    Users,
    /// Delete all users (feeds, follows and posts cascade)
    Reset,
    /// Add a feed and follow it
    Addfeed(feeds::AddFeedCmd),
    /// List every feed with its creator
    Feeds,
    /// Follow an existing feed by URL
    Follow(feeds::FollowCmd),
    /// List the feeds the logged-in user follows
    Following,
    /// Stop following a feed by URL
    Unfollow(feeds::UnfollowCmd),
    /// Run the polling loop
    Agg(agg::AggCmd),
    /// Show recent posts from followed feeds
    Browse(browse::BrowseCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and EGRET_LOG_FORMAT
    telemetry::config::init_tracing();

    let mut cfg = config::Config::read()?;
    let dsn = cli
        .dsn
        .or_else(|| env::var("DATABASE_URL").ok())
        .or_else(|| cfg.db_url.clone())
        .context("no database URL: pass --dsn, set DATABASE_URL, or add db_url to the config file")?;

    let pool = db::init_db(&dsn).await?;

    match cli.command {
        Commands::Register(args) => users::register(&pool, &mut cfg, args).await?,
        Commands::Login(args) => users::login(&pool, &mut cfg, args).await?,
        Commands::Users => users::list(&pool, &cfg).await?,
        Commands::Reset => users::reset(&pool).await?,
        Commands::Addfeed(args) => feeds::add(&pool, &cfg, args).await?,
        Commands::Feeds => feeds::list(&pool).await?,
        Commands::Follow(args) => feeds::follow(&pool, &cfg, args).await?,
        Commands::Following => feeds::following(&pool, &cfg).await?,
        Commands::Unfollow(args) => feeds::unfollow(&pool, &cfg, args).await?,
        Commands::Agg(args) => agg::run(&pool, args).await?,
        Commands::Browse(args) => browse::run(&pool, &cfg, args).await?,
    }

    Ok(())
}
