use async_trait::async_trait;

use roost_core::gateway::PaymentOrderGateway;
use roost_core::payment::PaymentOrder;
use roost_core::CoreResult;

use crate::http::Api;

/// REST implementation of the payment-order gateway.
pub struct RestPaymentOrderGateway {
    api: Api,
}

impl RestPaymentOrderGateway {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[derive(serde::Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
}

#[async_trait]
impl PaymentOrderGateway for RestPaymentOrderGateway {
    async fn create_order(&self, amount: i64, currency: &str) -> CoreResult<PaymentOrder> {
        self.api
            .post_json("/payments/create-order", &CreateOrderBody { amount, currency })
            .await
    }
}
