use std::sync::Arc;

use futures_util::future::join_all;
use uuid::Uuid;

use roost_core::booking::CreateBooking;
use roost_core::gateway::BookingGateway;
use roost_core::rooms::RoomRequest;

use crate::models::{RoomFailure, SubmitReport};

/// Creates one booking per room against the marketplace API.
pub struct BookingSubmitter {
    gateway: Arc<dyn BookingGateway>,
}

impl BookingSubmitter {
    pub fn new(gateway: Arc<dyn BookingGateway>) -> Self {
        Self { gateway }
    }

    /// Fan out one creation call per room and collect every result.
    ///
    /// Rooms are independent, so the calls run concurrently and ordering
    /// between them carries no meaning. Each call succeeds or fails on its
    /// own; a failed room never blocks the others, and created bookings stay
    /// PENDING until their group resolves.
    pub async fn submit(
        &self,
        listing_id: Uuid,
        rooms: &[RoomRequest],
        payment_order_id: &str,
    ) -> SubmitReport {
        let calls = rooms.iter().map(|room| {
            let req = CreateBooking::for_room(listing_id, room, payment_order_id);
            let gateway = Arc::clone(&self.gateway);
            async move { gateway.create_booking(&req).await }
        });

        let results = join_all(calls).await;

        let mut created = Vec::with_capacity(rooms.len());
        let mut failures = Vec::new();
        for (room_index, result) in results.into_iter().enumerate() {
            match result {
                Ok(booking) => created.push(booking),
                Err(error) => {
                    tracing::warn!(room_index, %error, "booking creation failed");
                    failures.push(RoomFailure { room_index, error });
                }
            }
        }

        SubmitReport { created, failures }
    }
}
