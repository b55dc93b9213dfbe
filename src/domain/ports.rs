use super::payment::{Amount, Payment};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence port for payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Stores a new payment. Fails if the id is already taken.
    async fn insert(&self, payment: Payment) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Payment>>;
    /// Returns every payment ordered by id, which is creation order.
    async fn list(&self) -> Result<Vec<Payment>>;
    /// Replaces the stored payment if its version still equals `payment.version`.
    ///
    /// Returns the stored record with the bumped version.
    async fn update(&self, payment: Payment) -> Result<Payment>;
    /// Removes the payment, returning whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Card-processing collaborator performing charges and refunds.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Captures `amount` and returns the gateway charge id.
    async fn create_charge(&self, amount: Amount, currency: &str) -> Result<String>;
    /// Refunds a previous charge and returns the gateway refund id.
    async fn refund(&self, charge_id: &str) -> Result<String>;
}

pub type PaymentRepositoryBox = Box<dyn PaymentRepository>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type PaymentRepositoryFactory = Box<dyn Fn() -> PaymentRepositoryBox + Send + Sync>;
