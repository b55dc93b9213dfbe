use super::command_reader::{CommandType, PaymentCommand};
use crate::application::lifecycle::PaymentLifecycle;
use crate::domain::payment::Payment;
use crate::error::{PaymentError, Result};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// Replays CSV commands against a [`PaymentLifecycle`].
///
/// Keeps the label-to-id bindings created by `create` rows so later rows of
/// the same batch can refer to generated ids.
pub struct BatchRunner<'a> {
    lifecycle: &'a PaymentLifecycle,
    labels: HashMap<String, Uuid>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(lifecycle: &'a PaymentLifecycle) -> Self {
        Self {
            lifecycle,
            labels: HashMap::new(),
        }
    }

    /// Applies one command and returns the affected payment.
    ///
    /// `delete` returns `None` since the record no longer exists.
    pub async fn apply(&mut self, cmd: PaymentCommand) -> Result<Option<Payment>> {
        match cmd.command {
            CommandType::Create => {
                if self.labels.contains_key(&cmd.payment) {
                    return Err(PaymentError::ValidationError(format!(
                        "label '{}' is already bound in this batch",
                        cmd.payment
                    )));
                }
                let amount = required(cmd.amount, "amount", &cmd)?;
                let method = required(cmd.method, "method", &cmd)?;
                let service = required(cmd.service.clone(), "service", &cmd)?;

                let payment = self.lifecycle.create(amount, method, service).await?;
                if !cmd.payment.is_empty() {
                    self.labels.insert(cmd.payment, payment.id);
                }
                Ok(Some(payment))
            }
            CommandType::Get => {
                let payment = self.lifecycle.get(self.resolve(&cmd.payment)?).await?;
                info!(
                    payment_id = %payment.id,
                    amount = %payment.amount,
                    method = %payment.method,
                    status = %payment.status,
                    service_id = %payment.service_id,
                    "Payment found"
                );
                Ok(Some(payment))
            }
            CommandType::Transition => {
                let target = required(cmd.status, "status", &cmd)?;
                let id = self.resolve(&cmd.payment)?;
                Ok(Some(self.lifecycle.transition(id, target).await?))
            }
            CommandType::Refund => {
                let id = self.resolve(&cmd.payment)?;
                Ok(Some(self.lifecycle.refund(id).await?))
            }
            CommandType::Delete => {
                let id = self.resolve(&cmd.payment)?;
                self.lifecycle.delete(id).await?;
                self.labels.retain(|_, bound| *bound != id);
                Ok(None)
            }
        }
    }

    fn resolve(&self, reference: &str) -> Result<Uuid> {
        if let Some(id) = self.labels.get(reference) {
            return Ok(*id);
        }
        Uuid::parse_str(reference).map_err(|_| {
            PaymentError::ValidationError(format!("unknown payment reference '{reference}'"))
        })
    }
}

fn required<T>(value: Option<T>, column: &str, cmd: &PaymentCommand) -> Result<T> {
    value.ok_or_else(|| {
        PaymentError::ValidationError(format!(
            "{:?} command for '{}' requires the {} column",
            cmd.command, cmd.payment, column
        ))
    })
}
