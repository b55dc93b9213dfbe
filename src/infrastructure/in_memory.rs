use crate::domain::payment::Payment;
use crate::domain::ports::PaymentRepository;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for payments.
///
/// Uses `Arc<RwLock<BTreeMap<Uuid, Payment>>>` so clones share the same data.
/// Version checks on update run under the write lock.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<BTreeMap<Uuid, Payment>>>,
}

impl InMemoryPaymentRepository {
    /// Creates a new, empty in-memory payment repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, payment: Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        match payments.entry(payment.id) {
            Entry::Occupied(_) => Err(PaymentError::ValidationError(format!(
                "Payment {} already exists",
                payment.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(payment);
                Ok(())
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.values().cloned().collect())
    }

    async fn update(&self, mut payment: Payment) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        let stored = payments
            .get_mut(&payment.id)
            .ok_or(PaymentError::NotFoundError(payment.id))?;

        if stored.version != payment.version {
            return Err(PaymentError::ConcurrencyError {
                id: payment.id,
                expected: payment.version,
                found: stored.version,
            });
        }

        payment.version += 1;
        *stored = payment.clone();
        Ok(payment)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut payments = self.payments.write().await;
        Ok(payments.remove(&id).is_some())
    }
}
