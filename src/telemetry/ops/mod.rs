pub mod user;
pub mod feed;
pub mod agg;
pub mod browse;
