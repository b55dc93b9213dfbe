use crate::domain::payment::Amount;
use crate::domain::ports::PaymentGateway;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// An in-process card gateway.
///
/// Every charge succeeds unless it exceeds the optional `decline_above` limit.
/// Charge ids look like `ch_<hex>` and refund ids like `re_<hex>`.
#[derive(Debug, Default, Clone)]
pub struct SimulatedGateway {
    decline_above: Option<Decimal>,
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declines charges strictly greater than `limit`.
    pub fn with_decline_above(limit: Decimal) -> Self {
        Self {
            decline_above: Some(limit),
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn create_charge(&self, amount: Amount, currency: &str) -> Result<String> {
        if currency.trim().is_empty() {
            return Err(PaymentError::GatewayError(
                "currency must not be empty".to_string(),
            ));
        }
        if let Some(limit) = self.decline_above
            && amount.value() > limit
        {
            return Err(PaymentError::GatewayError(format!(
                "card declined: {} {} exceeds limit {}",
                amount, currency, limit
            )));
        }
        Ok(format!("ch_{}", Uuid::new_v4().simple()))
    }

    async fn refund(&self, charge_id: &str) -> Result<String> {
        if !charge_id.starts_with("ch_") {
            return Err(PaymentError::GatewayError(format!(
                "unknown charge {charge_id}"
            )));
        }
        Ok(format!("re_{}", Uuid::new_v4().simple()))
    }
}
