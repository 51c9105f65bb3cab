use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rooms::RoomRequest;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A reservation of a listing for a date range. The backend owns the record;
/// the client only holds what creation handed back, and flips the local
/// status when its payment-order group resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Payment-order token shared by every booking of one checkout.
    pub payment_order_id: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Body for POST /bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    pub listing_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub payment_order_id: String,
}

impl CreateBooking {
    pub fn for_room(listing_id: Uuid, room: &RoomRequest, payment_order_id: &str) -> Self {
        Self {
            listing_id,
            check_in: room.check_in,
            check_out: room.check_out,
            payment_order_id: payment_order_id.to_string(),
        }
    }
}
