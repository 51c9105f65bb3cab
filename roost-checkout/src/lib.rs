pub mod models;
pub mod orchestrator;
pub mod reconciler;
pub mod submitter;

pub use models::{CheckoutResolution, GroupState, PaymentGroup, RoomFailure, SubmitReport};
pub use orchestrator::{CheckoutError, CheckoutFlow, CheckoutPolicy, MockHostedCheckout};
pub use reconciler::{GroupReconciler, ReconcileError};
pub use submitter::BookingSubmitter;
