use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::CoreResult;

/// Token issued by the payment provider for one checkout transaction.
/// Every booking created in that checkout shares this id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentOrder {
    /// Provider's id (e.g. order_N5lWbl3kq0yZ6j)
    pub id: String,
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
}

/// Terminal outcomes of the hosted checkout widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Guest completed payment; the provider handed back a payment id.
    Paid { payment_id: String },
    /// Guest closed the widget without paying.
    Dismissed,
}

/// Seam around the third-party hosted checkout UI.
///
/// The widget itself is opaque: it is invoked with the payment order and
/// eventually lands on exactly one of the two outcomes. A dismissal is a
/// normal outcome here, not an error; routing it into the release path is
/// the caller's job.
#[async_trait]
pub trait HostedCheckout: Send + Sync {
    /// Present the widget for the given order and wait for a terminal outcome.
    async fn present(&self, order: &PaymentOrder) -> CoreResult<CheckoutOutcome>;
}
