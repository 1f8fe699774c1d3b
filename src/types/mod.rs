//! Shared request/response types.

mod listing;
mod response;

pub use listing::ListParams;
pub use response::MessageResponse;
