use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_core::CoreResult;

/// A bookable property record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    /// Rate for one room-night, in minor currency units.
    pub nightly_rate: i64,
    pub currency: String,
    /// Most guests one room can hold.
    pub max_guests: u32,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub is_active: bool,
}

impl Listing {
    pub fn accommodates(&self, guests: u32) -> bool {
        guests <= self.max_guests
    }
}

/// Client seam to the listing API.
#[async_trait]
pub trait ListingGateway: Send + Sync {
    /// GET /listings/{id}. None when the listing does not exist.
    async fn get_listing(&self, id: Uuid) -> CoreResult<Option<Listing>>;
}
