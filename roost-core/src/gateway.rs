use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, CreateBooking};
use crate::payment::PaymentOrder;
use crate::CoreResult;

/// Client seam to the marketplace booking API.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// POST /bookings — creates one PENDING booking.
    async fn create_booking(&self, req: &CreateBooking) -> CoreResult<Booking>;

    /// POST /bookings/{id}/confirm-payment-order — the backend locates every
    /// booking sharing this booking's payment order and confirms them
    /// atomically.
    async fn confirm_payment_order(&self, booking_id: Uuid, payment_id: &str) -> CoreResult<()>;

    /// POST /bookings/{id}/payment-failed — the backend releases every
    /// booking in this booking's payment-order group, freeing the dates.
    async fn release_payment_order(&self, booking_id: Uuid) -> CoreResult<()>;

    /// GET /bookings — bookings for the current principal.
    async fn list_bookings(&self) -> CoreResult<Vec<Booking>>;
}

/// Client seam to the payment-order API.
#[async_trait]
pub trait PaymentOrderGateway: Send + Sync {
    /// POST /payments/create-order — one order per checkout, covering the
    /// whole room plan.
    async fn create_order(&self, amount: i64, currency: &str) -> CoreResult<PaymentOrder>;
}
