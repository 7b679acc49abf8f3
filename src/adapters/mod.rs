// Adapters layer: concrete implementations for the outside world (http, markup, storage).

pub mod http;
pub mod layout;
pub mod storage;

pub use http::PageFetcher;
pub use layout::GrantsGovAuLayout;
pub use storage::LocalStorage;
