use std::sync::Arc;

use chrono::Utc;

use roost_core::gateway::{BookingGateway, PaymentOrderGateway};
use roost_core::payment::{CheckoutOutcome, HostedCheckout, PaymentOrder};
use roost_core::rooms::RoomPlan;
use roost_core::{CoreError, CoreResult};
use roost_listing::{Listing, Quote, QuoteError};
use roost_shared::models::events::{
    BookingsSubmittedEvent, GroupReleasedEvent, PaymentCapturedEvent,
};

use crate::models::{CheckoutResolution, PaymentGroup};
use crate::reconciler::{GroupReconciler, ReconcileError};
use crate::submitter::BookingSubmitter;

/// Limits applied to one checkout run.
#[derive(Debug, Clone)]
pub struct CheckoutPolicy {
    /// Most rooms one payment order may cover.
    pub max_rooms: usize,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self { max_rooms: 5 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Quote rejected: {0}")]
    QuoteRejected(#[from] QuoteError),

    #[error("Plan of {requested} rooms exceeds the checkout limit of {max}")]
    TooManyRooms { requested: usize, max: usize },

    #[error("No booking could be created: {first_error}")]
    NothingCreated { first_error: CoreError },

    #[error("{failed} of {requested} rooms could not be booked; created bookings were released")]
    PartialSubmission {
        requested: usize,
        failed: usize,
        failed_rooms: Vec<usize>,
    },

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Gateway(CoreError),
}

/// Sequences one checkout end to end: quote the stay, open a payment order,
/// fan out the per-room bookings, hand over to the hosted checkout, then
/// reconcile the group to exactly one terminal state.
pub struct CheckoutFlow {
    payment_orders: Arc<dyn PaymentOrderGateway>,
    submitter: BookingSubmitter,
    reconciler: GroupReconciler,
    checkout_ui: Arc<dyn HostedCheckout>,
    policy: CheckoutPolicy,
}

impl CheckoutFlow {
    pub fn new(
        bookings: Arc<dyn BookingGateway>,
        payment_orders: Arc<dyn PaymentOrderGateway>,
        checkout_ui: Arc<dyn HostedCheckout>,
    ) -> Self {
        Self {
            payment_orders,
            submitter: BookingSubmitter::new(Arc::clone(&bookings)),
            reconciler: GroupReconciler::new(bookings),
            checkout_ui,
            policy: CheckoutPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CheckoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn checkout(
        &self,
        listing: &Listing,
        plan: &RoomPlan,
    ) -> Result<CheckoutResolution, CheckoutError> {
        let requested = plan.len();
        if requested > self.policy.max_rooms {
            return Err(CheckoutError::TooManyRooms {
                requested,
                max: self.policy.max_rooms,
            });
        }

        // 1. Price the stay. Validation stops the flow here, before any
        //    network traffic.
        let quote = Quote::for_stay(plan.rooms(), listing)?;

        // 2. One payment order covers the whole plan.
        let order = self
            .payment_orders
            .create_order(quote.total_amount, &quote.currency)
            .await
            .map_err(CheckoutError::Gateway)?;

        // 3. Fan out the per-room booking creation.
        let report = self.submitter.submit(listing.id, plan.rooms(), &order.id).await;
        log_event(
            "bookings submitted",
            &BookingsSubmittedEvent {
                listing_id: listing.id,
                payment_order_id: order.id.clone(),
                rooms_requested: requested,
                bookings_created: report.created.len(),
                timestamp: Utc::now().timestamp(),
            },
        );

        if report.created.is_empty() {
            let first_error = report
                .failures
                .into_iter()
                .next()
                .map(|f| f.error)
                .unwrap_or_else(|| CoreError::ValidationError("empty plan".to_string()));
            return Err(CheckoutError::NothingCreated { first_error });
        }

        let failed_rooms = report.failed_rooms();
        let mut group = PaymentGroup::new(order, report.created);

        if !failed_rooms.is_empty() {
            // Partial submission: release what was created rather than
            // leaving it dangling, then tell the caller which rooms failed.
            self.reconciler.release(&mut group).await?;
            log_release(&group, "partial submission");
            return Err(CheckoutError::PartialSubmission {
                requested,
                failed: failed_rooms.len(),
                failed_rooms,
            });
        }

        // 4. Hand over to the hosted checkout and wait for its outcome.
        match self.checkout_ui.present(&group.payment_order).await {
            Ok(CheckoutOutcome::Paid { payment_id }) => {
                // 5a. Confirm the whole group. A failed confirmation releases
                //     it inside the reconciler before the error surfaces.
                self.reconciler.confirm(&mut group, &payment_id).await?;
                log_event(
                    "payment captured",
                    &PaymentCapturedEvent {
                        payment_order_id: group.payment_order.id.clone(),
                        payment_id: payment_id.clone(),
                        amount: group.payment_order.amount,
                        currency: group.payment_order.currency.clone(),
                        bookings: group.bookings.len(),
                        timestamp: Utc::now().timestamp(),
                    },
                );
                Ok(CheckoutResolution::Confirmed { group, payment_id })
            }
            Ok(CheckoutOutcome::Dismissed) => {
                // 5b. Recoverable cancellation, not an error: release and
                //     hand the resolved group back.
                self.reconciler.release(&mut group).await?;
                log_release(&group, "guest dismissed checkout");
                Ok(CheckoutResolution::Cancelled { group })
            }
            Err(err) => {
                // Widget or transport failure takes the same release path as
                // a dismissal, then surfaces.
                self.reconciler.release(&mut group).await?;
                log_release(&group, "hosted checkout failed");
                Err(CheckoutError::Gateway(err))
            }
        }
    }
}

fn log_release(group: &PaymentGroup, reason: &str) {
    log_event(
        "payment group released",
        &GroupReleasedEvent {
            payment_order_id: group.payment_order.id.clone(),
            bookings: group.bookings.len(),
            reason: reason.to_string(),
            timestamp: Utc::now().timestamp(),
        },
    );
}

fn log_event<E: serde::Serialize>(message: &'static str, event: &E) {
    tracing::info!(
        target: "roost::telemetry",
        event = %serde_json::to_string(event).unwrap_or_default(),
        "{}",
        message
    );
}

/// Scriptable stand-in for the third-party hosted checkout widget, wired
/// the way the real one is invoked: with the provider key plus the order.
pub struct MockHostedCheckout {
    key: String,
    dismiss: bool,
}

impl MockHostedCheckout {
    /// Completes payment for whatever order it is shown.
    pub fn paying(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            dismiss: false,
        }
    }

    /// Closes the widget without paying.
    pub fn dismissing(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            dismiss: true,
        }
    }
}

#[async_trait::async_trait]
impl HostedCheckout for MockHostedCheckout {
    async fn present(&self, order: &PaymentOrder) -> CoreResult<CheckoutOutcome> {
        tracing::debug!(
            key = %self.key,
            order_id = %order.id,
            amount = order.amount,
            currency = %order.currency,
            "presenting hosted checkout"
        );

        // Trigger for exercising the widget-failure path
        if order.id.contains("fail-widget") {
            return Err(CoreError::NetworkError(
                "checkout widget failed to load".to_string(),
            ));
        }

        if self.dismiss {
            return Ok(CheckoutOutcome::Dismissed);
        }
        Ok(CheckoutOutcome::Paid {
            payment_id: format!("pay_mock_{}", order.id),
        })
    }
}
