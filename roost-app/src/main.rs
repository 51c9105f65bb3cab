use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use roost_checkout::{CheckoutFlow, CheckoutPolicy, CheckoutResolution, MockHostedCheckout};
use roost_client::{Api, RestBookingGateway, RestListingGateway, RestPaymentOrderGateway};
use roost_core::gateway::BookingGateway;
use roost_core::rooms::{RoomPlan, RoomRequest};
use roost_core::session::Session;
use roost_listing::ListingGateway;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Headless checkout harness: wires the REST gateways to the checkout flow
/// and drives one multi-room booking against the configured environment,
/// standing in for the booking/payment pages.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roost_app=debug,roost_checkout=debug,roost_client=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = roost_client::Config::load()?;
    tracing::info!(base_url = %config.api.base_url, "starting roost checkout harness");

    // The session would come out of the login flow; the harness takes it
    // from the environment.
    let token = std::env::var("ROOST_ACCESS_TOKEN").unwrap_or_else(|_| "dev-token".into());
    let session = Session::new("guest-dev", "guest@roost.example", token);

    let api = Api::new(config.api.base_url.clone()).with_session(session);
    let bookings = Arc::new(RestBookingGateway::new(api.clone()));
    let payments = Arc::new(RestPaymentOrderGateway::new(api.clone()));
    let listings = RestListingGateway::new(api);

    let widget = MockHostedCheckout::paying(config.payment.key_id.clone());
    let flow = CheckoutFlow::new(bookings.clone(), payments, Arc::new(widget)).with_policy(
        CheckoutPolicy {
            max_rooms: config.business_rules.max_rooms_per_checkout,
        },
    );

    let listing_id: Uuid = std::env::var("ROOST_LISTING_ID")?.parse()?;
    let listing = listings
        .get_listing(listing_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("listing {listing_id} not found"))?;
    tracing::info!(title = %listing.title, nightly_rate = listing.nightly_rate, "quoting listing");
    if listing.currency != config.payment.currency {
        tracing::warn!(
            listing_currency = %listing.currency,
            configured = %config.payment.currency,
            "listing currency differs from the configured payment currency"
        );
    }

    let check_in = env_date("ROOST_CHECK_IN", Utc::now().date_naive() + Duration::days(7))?;
    let check_out = env_date("ROOST_CHECK_OUT", check_in + Duration::days(2))?;
    let plan = RoomPlan::new().add_room(RoomRequest::new(2, 0, check_in, check_out));

    match flow.checkout(&listing, &plan).await {
        Ok(CheckoutResolution::Confirmed { group, payment_id }) => {
            tracing::info!(
                %payment_id,
                payment_order_id = %group.payment_order.id,
                bookings = group.bookings.len(),
                amount = group.payment_order.amount,
                "checkout confirmed"
            );
        }
        Ok(CheckoutResolution::Cancelled { group }) => {
            tracing::info!(
                payment_order_id = %group.payment_order.id,
                "checkout cancelled by guest; bookings released"
            );
        }
        Err(err) => return Err(err.into()),
    }

    let on_file = bookings.list_bookings().await?;
    tracing::info!(count = on_file.len(), "bookings on file for guest");

    Ok(())
}

fn env_date(var: &str, fallback: NaiveDate) -> anyhow::Result<NaiveDate> {
    match std::env::var(var) {
        Ok(raw) => Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")?),
        Err(_) => Ok(fallback),
    }
}
