use crate::domain::payment::{PaymentMethod, PaymentStatus};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Create,
    Get,
    Transition,
    Refund,
    Delete,
}

/// One row of a command batch.
///
/// `payment` is either a label bound by an earlier `create` row of the same
/// batch or the UUID of a payment persisted by a previous run. The remaining
/// columns are only read by the commands that need them.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentCommand {
    pub command: CommandType,
    pub payment: String,
    pub amount: Option<Decimal>,
    pub method: Option<PaymentMethod>,
    pub service: Option<String>,
    pub status: Option<PaymentStatus>,
}

/// Reads payment commands from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// so trailing optional columns may be omitted.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes commands.
    pub fn commands(self) -> impl Iterator<Item = Result<PaymentCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
