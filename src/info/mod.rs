//! Per-node INFO retrieval and line selection

pub mod category;
pub mod client;
pub mod filter;

pub use category::Category;
pub use client::{InfoFetcher, RespInfoFetcher};
pub use filter::{keep, LineFilter};
