use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Row layout of the payment listing.
#[derive(Debug, Serialize)]
struct PaymentRecord<'a> {
    id: String,
    amount: Decimal,
    date: String,
    method: PaymentMethod,
    status: PaymentStatus,
    service_id: &'a str,
    external_reference: Option<&'a str>,
}

impl<'a> From<&'a Payment> for PaymentRecord<'a> {
    fn from(payment: &'a Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            amount: payment.amount.value().normalize(),
            date: payment.date.to_rfc3339(),
            method: payment.method,
            status: payment.status,
            service_id: &payment.service_id,
            external_reference: payment.external_reference.as_deref(),
        }
    }
}

/// Writes payments as CSV with header
/// `id,amount,date,method,status,service_id,external_reference`.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_payments<'a, I>(&mut self, payments: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let mut wrote_any = false;
        for payment in payments {
            self.writer.serialize(PaymentRecord::from(payment))?;
            wrote_any = true;
        }
        if !wrote_any {
            // serialize() emits the header lazily; an empty listing still gets one
            self.writer.write_record([
                "id",
                "amount",
                "date",
                "method",
                "status",
                "service_id",
                "external_reference",
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
