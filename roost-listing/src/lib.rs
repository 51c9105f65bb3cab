pub mod listing;
pub mod pricing;

pub use listing::{Listing, ListingGateway};
pub use pricing::{Quote, QuoteError};
