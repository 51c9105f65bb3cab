use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roost_core::booking::{Booking, BookingStatus};
use roost_core::payment::PaymentOrder;
use roost_core::CoreError;

/// Client-side state of one payment-order group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupState {
    AwaitingPayment,
    Confirmed,
    Released,
}

/// Every booking created under one payment order.
///
/// The group moves through its lifecycle as a unit: either all of its
/// bookings confirm or all of them release. A mixed group is never a
/// terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentGroup {
    pub payment_order: PaymentOrder,
    pub bookings: Vec<Booking>,
    pub state: GroupState,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl PaymentGroup {
    pub fn new(payment_order: PaymentOrder, bookings: Vec<Booking>) -> Self {
        Self {
            payment_order,
            bookings,
            state: GroupState::AwaitingPayment,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// The booking whose id drives group-wide confirm/release calls: the
    /// first successfully created one. Rooms whose creation failed never
    /// enter a group.
    pub fn anchor(&self) -> Option<&Booking> {
        self.bookings.first()
    }

    pub fn is_terminal(&self) -> bool {
        self.state != GroupState::AwaitingPayment
    }

    pub(crate) fn mark_confirmed(&mut self) {
        self.state = GroupState::Confirmed;
        self.resolved_at = Some(Utc::now());
        for booking in &mut self.bookings {
            booking.status = BookingStatus::Confirmed;
        }
    }

    pub(crate) fn mark_released(&mut self) {
        self.state = GroupState::Released;
        self.resolved_at = Some(Utc::now());
        for booking in &mut self.bookings {
            booking.status = BookingStatus::Cancelled;
        }
    }
}

/// Aggregate outcome of the per-room booking fan-out.
#[derive(Debug)]
pub struct SubmitReport {
    pub created: Vec<Booking>,
    pub failures: Vec<RoomFailure>,
}

impl SubmitReport {
    pub fn all_created(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_rooms(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.room_index).collect()
    }
}

/// One room whose booking creation failed. Index refers to the submitted
/// room slice.
#[derive(Debug)]
pub struct RoomFailure {
    pub room_index: usize,
    pub error: CoreError,
}

/// How a checkout run ended, when it ended cleanly.
#[derive(Debug)]
pub enum CheckoutResolution {
    /// Payment captured; every booking in the group confirmed.
    Confirmed {
        group: PaymentGroup,
        payment_id: String,
    },
    /// Guest dismissed the widget; every booking released. Recoverable —
    /// the guest can start over with the same plan.
    Cancelled { group: PaymentGroup },
}
