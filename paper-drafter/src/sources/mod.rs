pub mod arxiv_feed;
pub mod static_feed;

pub use arxiv_feed::ArxivSource;
pub use static_feed::StaticPaperSource;
