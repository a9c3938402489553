// src/sources/mod.rs
pub mod market;
pub mod news;

pub use market::{MarketClient, MarketSnapshot};
pub use news::{NewsArticle, NewsClient};
