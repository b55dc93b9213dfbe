use crate::domain::payment::Payment;
use crate::domain::ports::PaymentRepository;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Column Family for storing payment records.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent payment repository backed by RocksDB.
///
/// Payments live in their own Column Family keyed by the 16 raw UUID bytes, so
/// iteration order matches creation order. Values are JSON.
///
/// `insert` and `update` read before they write; those two are serialized by
/// `write_lock` so the version check cannot interleave with another writer.
/// `Clone` shares both the underlying `Arc<DB>` and the lock.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "payments" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn payments_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PAYMENTS).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Payments column family not found",
            )))
        })
    }

    fn read(&self, id: Uuid) -> Result<Option<Payment>> {
        let cf = self.payments_cf()?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write(&self, payment: &Payment) -> Result<()> {
        let cf = self.payments_cf()?;
        let value = serde_json::to_vec(payment).map_err(|e| {
            PaymentError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, payment.id.as_bytes(), value)?;
        Ok(())
    }
}

fn decode(bytes: &[u8]) -> Result<Payment> {
    serde_json::from_slice(bytes).map_err(|e| {
        PaymentError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl PaymentRepository for RocksDBStore {
    async fn insert(&self, payment: Payment) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if self.read(payment.id)?.is_some() {
            return Err(PaymentError::ValidationError(format!(
                "Payment {} already exists",
                payment.id
            )));
        }
        self.write(&payment)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Payment>> {
        self.read(id)
    }

    async fn list(&self) -> Result<Vec<Payment>> {
        let cf = self.payments_cf()?;
        let mut payments = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item.map_err(|e| {
                PaymentError::InternalError(Box::new(std::io::Error::other(format!(
                    "RocksDB iteration error: {}",
                    e
                ))))
            })?;
            payments.push(decode(&value)?);
        }

        Ok(payments)
    }

    async fn update(&self, mut payment: Payment) -> Result<Payment> {
        let _guard = self.write_lock.lock().await;
        let stored = self
            .read(payment.id)?
            .ok_or(PaymentError::NotFoundError(payment.id))?;

        if stored.version != payment.version {
            return Err(PaymentError::ConcurrencyError {
                id: payment.id,
                expected: payment.version,
                found: stored.version,
            });
        }

        payment.version += 1;
        self.write(&payment)?;
        Ok(payment)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        if self.read(id)?.is_none() {
            return Ok(false);
        }
        let cf = self.payments_cf()?;
        self.db.delete_cf(cf, id.as_bytes())?;
        Ok(true)
    }
}
