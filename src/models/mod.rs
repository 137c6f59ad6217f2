//! Data models for Reactive Hub

pub mod book;
pub mod common;
pub mod pagination;
pub mod record;

// Re-export commonly used types
pub use book::{Book, BookFilter, BookQuery, CreateBook, UpdateBook};
pub use common::MessageResponse;
pub use pagination::{paginate, PageParams, PaginatedResponse, Pagination};
pub use record::Record;
