pub mod filter;
pub mod listing;

pub use filter::{filter, FilterError, FilterSpec};
pub use listing::Listing;
