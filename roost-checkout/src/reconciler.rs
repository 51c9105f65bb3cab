use std::sync::Arc;

use uuid::Uuid;

use roost_core::gateway::BookingGateway;
use roost_core::CoreError;

use crate::models::PaymentGroup;

/// Drives a payment-order group to its terminal state.
///
/// Valid transitions: AwaitingPayment → Confirmed, AwaitingPayment →
/// Released. Anything else is rejected. Both calls take the group by
/// exclusive reference, so confirm/release can never run concurrently for
/// the same group.
pub struct GroupReconciler {
    gateway: Arc<dyn BookingGateway>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Group has no bookings to resolve")]
    EmptyGroup,

    #[error("Confirmation failed and the group was released: {0}")]
    ConfirmationFailed(#[source] CoreError),
}

impl GroupReconciler {
    pub fn new(gateway: Arc<dyn BookingGateway>) -> Self {
        Self { gateway }
    }

    /// Confirm every booking in the group. The backend does the group-wide
    /// work atomically off the anchor booking's id; on success the local
    /// records flip to CONFIRMED together.
    ///
    /// If the confirmation call itself fails, the release call is still
    /// issued before the error surfaces — the group must not be left
    /// sitting in AwaitingPayment.
    pub async fn confirm(
        &self,
        group: &mut PaymentGroup,
        payment_id: &str,
    ) -> Result<(), ReconcileError> {
        self.ensure_awaiting(group, "CONFIRMED")?;
        let anchor = group.anchor().ok_or(ReconcileError::EmptyGroup)?.id;

        match self.gateway.confirm_payment_order(anchor, payment_id).await {
            Ok(()) => {
                group.mark_confirmed();
                tracing::info!(
                    payment_order_id = %group.payment_order.id,
                    bookings = group.bookings.len(),
                    "payment group confirmed"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    payment_order_id = %group.payment_order.id,
                    %err,
                    "confirmation call failed, releasing group"
                );
                self.release_remote(group, anchor).await;
                group.mark_released();
                Err(ReconcileError::ConfirmationFailed(err))
            }
        }
    }

    /// Release every booking in the group (guest dismissed the widget, or
    /// payment never completed). The local records flip to CANCELLED
    /// together.
    pub async fn release(&self, group: &mut PaymentGroup) -> Result<(), ReconcileError> {
        self.ensure_awaiting(group, "RELEASED")?;
        let anchor = group.anchor().ok_or(ReconcileError::EmptyGroup)?.id;

        self.release_remote(group, anchor).await;
        group.mark_released();
        Ok(())
    }

    /// Issue the backend release call. A failure here is logged and the
    /// group still resolves locally: terminal from the client's side, with
    /// the backend's own hold expiry as the backstop.
    async fn release_remote(&self, group: &PaymentGroup, anchor: Uuid) {
        if let Err(err) = self.gateway.release_payment_order(anchor).await {
            tracing::error!(
                payment_order_id = %group.payment_order.id,
                %err,
                "release call failed; relying on backend expiry"
            );
        }
    }

    fn ensure_awaiting(&self, group: &PaymentGroup, to: &str) -> Result<(), ReconcileError> {
        if group.is_terminal() {
            return Err(ReconcileError::InvalidTransition {
                from: format!("{:?}", group.state),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use std::sync::Mutex;

    use crate::models::GroupState;
    use roost_core::booking::{Booking, BookingStatus, CreateBooking};
    use roost_core::payment::PaymentOrder;
    use roost_core::CoreResult;

    #[derive(Default)]
    struct RecordingGateway {
        confirms: Mutex<Vec<(Uuid, String)>>,
        releases: Mutex<Vec<Uuid>>,
        fail_confirm: bool,
    }

    #[async_trait]
    impl BookingGateway for RecordingGateway {
        async fn create_booking(&self, _: &CreateBooking) -> CoreResult<Booking> {
            unreachable!("reconciler never creates")
        }

        async fn confirm_payment_order(&self, booking_id: Uuid, payment_id: &str) -> CoreResult<()> {
            if self.fail_confirm {
                return Err(CoreError::BackendError {
                    status: 500,
                    message: "confirmation store unavailable".to_string(),
                });
            }
            self.confirms
                .lock()
                .unwrap()
                .push((booking_id, payment_id.to_string()));
            Ok(())
        }

        async fn release_payment_order(&self, booking_id: Uuid) -> CoreResult<()> {
            self.releases.lock().unwrap().push(booking_id);
            Ok(())
        }

        async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
            Ok(vec![])
        }
    }

    fn group_of(n: usize) -> PaymentGroup {
        let order = PaymentOrder {
            id: "order_test".to_string(),
            amount: 4000,
            currency: "INR".to_string(),
        };
        let date = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        let bookings = (0..n)
            .map(|_| Booking {
                id: Uuid::new_v4(),
                listing_id: Uuid::new_v4(),
                check_in: date(1),
                check_out: date(3),
                payment_order_id: order.id.clone(),
                status: BookingStatus::Pending,
                created_at: Utc::now(),
            })
            .collect();
        PaymentGroup::new(order, bookings)
    }

    #[tokio::test]
    async fn confirm_flips_every_booking() {
        let gateway = Arc::new(RecordingGateway::default());
        let reconciler = GroupReconciler::new(gateway.clone());
        let mut group = group_of(2);
        let anchor = group.anchor().unwrap().id;

        reconciler.confirm(&mut group, "pay_123").await.unwrap();

        assert_eq!(group.state, GroupState::Confirmed);
        assert!(group
            .bookings
            .iter()
            .all(|b| b.status == BookingStatus::Confirmed));
        // One call for the whole group, keyed on the anchor
        assert_eq!(
            *gateway.confirms.lock().unwrap(),
            vec![(anchor, "pay_123".to_string())]
        );
        assert!(gateway.releases.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn release_flips_every_booking() {
        let gateway = Arc::new(RecordingGateway::default());
        let reconciler = GroupReconciler::new(gateway.clone());
        let mut group = group_of(2);
        let anchor = group.anchor().unwrap().id;

        reconciler.release(&mut group).await.unwrap();

        assert_eq!(group.state, GroupState::Released);
        assert!(group
            .bookings
            .iter()
            .all(|b| b.status == BookingStatus::Cancelled));
        assert_eq!(*gateway.releases.lock().unwrap(), vec![anchor]);
    }

    #[tokio::test]
    async fn failed_confirmation_still_releases() {
        let gateway = Arc::new(RecordingGateway {
            fail_confirm: true,
            ..Default::default()
        });
        let reconciler = GroupReconciler::new(gateway.clone());
        let mut group = group_of(2);
        let anchor = group.anchor().unwrap().id;

        let err = reconciler.confirm(&mut group, "pay_123").await.unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::ConfirmationFailed(CoreError::BackendError { status: 500, .. })
        ));
        // The cleanup call went out and the group resolved, not stuck
        assert_eq!(*gateway.releases.lock().unwrap(), vec![anchor]);
        assert_eq!(group.state, GroupState::Released);
        assert!(group
            .bookings
            .iter()
            .all(|b| b.status == BookingStatus::Cancelled));
    }

    #[tokio::test]
    async fn terminal_groups_reject_further_transitions() {
        let gateway = Arc::new(RecordingGateway::default());
        let reconciler = GroupReconciler::new(gateway.clone());
        let mut group = group_of(1);

        reconciler.release(&mut group).await.unwrap();

        let err = reconciler.confirm(&mut group, "pay_123").await.unwrap_err();
        assert!(matches!(err, ReconcileError::InvalidTransition { .. }));

        let err = reconciler.release(&mut group).await.unwrap_err();
        assert!(matches!(err, ReconcileError::InvalidTransition { .. }));

        // Exactly the one original release reached the backend
        assert_eq!(gateway.releases.lock().unwrap().len(), 1);
    }
}
