use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingsSubmittedEvent {
    pub listing_id: Uuid,
    pub payment_order_id: String,
    pub rooms_requested: usize,
    pub bookings_created: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PaymentCapturedEvent {
    pub payment_order_id: String,
    pub payment_id: String,
    pub amount: i64,
    pub currency: String,
    pub bookings: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct GroupReleasedEvent {
    pub payment_order_id: String,
    pub bookings: usize,
    pub reason: String,
    pub timestamp: i64,
}
