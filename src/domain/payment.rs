use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Represents a positive monetary amount for payments.
///
/// Construction and deserialization both reject zero and negative values, so a
/// `Payment` can never hold a non-positive amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(format!(
                "Amount must be positive, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("cash"),
            PaymentMethod::Card => f.write_str("card"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    /// Returns true when `self -> target` is one of the permitted edges:
    /// Pending to Completed or Failed, and Completed to Refunded.
    pub fn can_transition_to(self, target: PaymentStatus) -> bool {
        matches!(
            (self, target),
            (PaymentStatus::Pending, PaymentStatus::Completed)
                | (PaymentStatus::Pending, PaymentStatus::Failed)
                | (PaymentStatus::Completed, PaymentStatus::Refunded)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Failed | PaymentStatus::Refunded)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        };
        f.write_str(name)
    }
}

/// A monetary transaction tied to a purchased gym service.
///
/// `status` only moves through [`Payment::transition`]; every other field is
/// fixed once the payment has been created and captured.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub amount: Amount,
    pub date: DateTime<Utc>,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Opaque reference to the purchased catalog item.
    pub service_id: String,
    /// Gateway charge id, only present for captured card payments.
    pub external_reference: Option<String>,
    /// Optimistic concurrency counter, bumped by the repository on each update.
    #[serde(default)]
    pub version: u64,
}

impl Payment {
    /// Creates a new pending payment with a time-ordered id.
    pub fn new(amount: Amount, method: PaymentMethod, service_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            amount,
            date: Utc::now(),
            method,
            status: PaymentStatus::Pending,
            service_id: service_id.into(),
            external_reference: None,
            version: 0,
        }
    }

    /// Moves the payment to `target` if the edge is allowed.
    ///
    /// On rejection the payment is left untouched.
    pub fn transition(&mut self, target: PaymentStatus) -> Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(PaymentError::InvalidTransitionError {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    /// Records a successful card capture: stores the charge id and completes
    /// the payment.
    pub fn record_capture(&mut self, charge_id: impl Into<String>) -> Result<()> {
        if self.method != PaymentMethod::Card {
            return Err(PaymentError::ValidationError(format!(
                "Only card payments can be captured, payment {} is {}",
                self.id, self.method
            )));
        }
        if self.external_reference.is_some() {
            return Err(PaymentError::ValidationError(format!(
                "Payment {} already has an external reference",
                self.id
            )));
        }
        let charge_id = charge_id.into();
        if charge_id.is_empty() {
            return Err(PaymentError::ValidationError(
                "Charge id must not be empty".to_string(),
            ));
        }
        self.transition(PaymentStatus::Completed)?;
        self.external_reference = Some(charge_id);
        Ok(())
    }
}
