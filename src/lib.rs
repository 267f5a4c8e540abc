pub mod config;
pub mod handlers;
pub mod humanize;
pub mod normalize;
pub mod numeric;
pub mod observability;
pub mod paging;
