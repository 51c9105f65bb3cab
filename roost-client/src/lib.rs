pub mod app_config;
pub mod booking_api;
pub mod http;
pub mod listing_api;
pub mod payment_api;

pub use app_config::Config;
pub use booking_api::RestBookingGateway;
pub use http::Api;
pub use listing_api::RestListingGateway;
pub use payment_api::RestPaymentOrderGateway;
