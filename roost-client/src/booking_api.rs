use async_trait::async_trait;
use uuid::Uuid;

use roost_core::booking::{Booking, CreateBooking};
use roost_core::gateway::BookingGateway;
use roost_core::CoreResult;

use crate::http::Api;

/// REST implementation of the booking gateway.
pub struct RestBookingGateway {
    api: Api,
}

impl RestBookingGateway {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[derive(serde::Serialize)]
struct ConfirmBody<'a> {
    payment_id: &'a str,
}

#[async_trait]
impl BookingGateway for RestBookingGateway {
    async fn create_booking(&self, req: &CreateBooking) -> CoreResult<Booking> {
        self.api.post_json("/bookings", req).await
    }

    async fn confirm_payment_order(&self, booking_id: Uuid, payment_id: &str) -> CoreResult<()> {
        self.api
            .post_unit(
                &format!("/bookings/{booking_id}/confirm-payment-order"),
                &ConfirmBody { payment_id },
            )
            .await
    }

    async fn release_payment_order(&self, booking_id: Uuid) -> CoreResult<()> {
        self.api
            .post_unit(
                &format!("/bookings/{booking_id}/payment-failed"),
                &serde_json::json!({}),
            )
            .await
    }

    async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
        self.api.get_json("/bookings").await
    }
}
