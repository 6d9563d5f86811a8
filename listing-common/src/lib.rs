pub mod contract;
pub mod error;
pub mod models;
pub mod query;
pub mod state;

// 重新导出常用类型，方便直接使用
pub use error::ListingError;
pub use models::{FilterKind, ListingResponse, SortKey};
pub use query::{from_query, location, request_url, to_query};
pub use state::FilterState;
