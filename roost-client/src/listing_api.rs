use async_trait::async_trait;
use uuid::Uuid;

use roost_core::{CoreError, CoreResult};
use roost_listing::{Listing, ListingGateway};

use crate::http::Api;

/// REST implementation of the listing gateway.
pub struct RestListingGateway {
    api: Api,
}

impl RestListingGateway {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ListingGateway for RestListingGateway {
    async fn get_listing(&self, id: Uuid) -> CoreResult<Option<Listing>> {
        match self.api.get_json(&format!("/listings/{id}")).await {
            Ok(listing) => Ok(Some(listing)),
            Err(CoreError::BackendError { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
