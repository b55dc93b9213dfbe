use crate::domain::payment::{Amount, Payment, PaymentMethod, PaymentStatus};
use crate::domain::ports::{PaymentGatewayBox, PaymentRepositoryBox};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Currency used for card charges when none is configured.
pub const DEFAULT_CURRENCY: &str = "USD";

/// The payment lifecycle manager.
///
/// Owns the repository and gateway ports. Each operation is a single
/// read-modify-write; concurrent writers on the same payment are detected by
/// the repository's version check and surface as `ConcurrencyError`.
pub struct PaymentLifecycle {
    repository: PaymentRepositoryBox,
    gateway: PaymentGatewayBox,
    currency: String,
}

impl PaymentLifecycle {
    /// Creates a new `PaymentLifecycle` charging in [`DEFAULT_CURRENCY`].
    ///
    /// # Arguments
    ///
    /// * `repository` - The store for payment records.
    /// * `gateway` - The card gateway used for captures and refunds.
    pub fn new(repository: PaymentRepositoryBox, gateway: PaymentGatewayBox) -> Self {
        Self {
            repository,
            gateway,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Creates and persists a payment.
    ///
    /// Cash payments start `Pending`. Card payments are captured through the
    /// gateway first and start `Completed` with the charge id stored as the
    /// external reference. A declined capture rejects the whole creation and
    /// nothing is persisted.
    pub async fn create(
        &self,
        amount: Decimal,
        method: PaymentMethod,
        service_id: impl Into<String>,
    ) -> Result<Payment> {
        let amount = Amount::new(amount)?;
        let mut payment = Payment::new(amount, method, service_id);

        if method == PaymentMethod::Card {
            let charge_id = self
                .gateway
                .create_charge(amount, &self.currency)
                .await
                .inspect_err(|e| {
                    warn!(payment_id = %payment.id, %amount, error = %e, "Card capture failed");
                })?;
            payment.record_capture(charge_id)?;
        }

        self.repository.insert(payment.clone()).await?;
        info!(
            payment_id = %payment.id,
            %amount,
            %method,
            status = %payment.status,
            "Payment created"
        );
        Ok(payment)
    }

    pub async fn get(&self, id: Uuid) -> Result<Payment> {
        self.repository
            .get(id)
            .await?
            .ok_or(PaymentError::NotFoundError(id))
    }

    pub async fn list(&self) -> Result<Vec<Payment>> {
        self.repository.list().await
    }

    /// Moves a payment to `target` along an allowed edge and persists it.
    ///
    /// Rejected transitions leave the stored record untouched.
    pub async fn transition(&self, id: Uuid, target: PaymentStatus) -> Result<Payment> {
        let mut payment = self.get(id).await?;
        let from = payment.status;
        payment.transition(target)?;

        let payment = self.repository.update(payment).await?;
        info!(
            payment_id = %id,
            %from,
            to = %target,
            terminal = target.is_terminal(),
            "Payment status changed"
        );
        Ok(payment)
    }

    /// Refunds a completed payment.
    ///
    /// `Refunded` is persisted through the version check before the gateway is
    /// involved, so only the call that wins the update refunds the card. The
    /// gateway refund is best-effort: a failure is logged and the payment stays
    /// `Refunded`.
    pub async fn refund(&self, id: Uuid) -> Result<Payment> {
        let mut payment = self.get(id).await?;
        if payment.status != PaymentStatus::Completed {
            return Err(PaymentError::InvalidTransitionError {
                from: payment.status,
                to: PaymentStatus::Refunded,
            });
        }

        payment.transition(PaymentStatus::Refunded)?;
        let payment = self.repository.update(payment).await?;

        if payment.method == PaymentMethod::Card
            && let Some(charge_id) = payment.external_reference.as_deref()
        {
            match self.gateway.refund(charge_id).await {
                Ok(refund_id) => debug!(payment_id = %id, %refund_id, "Gateway refund issued"),
                Err(e) => warn!(payment_id = %id, error = %e, "Gateway refund failed"),
            }
        }

        info!(payment_id = %id, "Payment refunded");
        Ok(payment)
    }

    /// Removes a payment regardless of its status.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(PaymentError::NotFoundError(id));
        }
        info!(payment_id = %id, "Payment deleted");
        Ok(())
    }
}
