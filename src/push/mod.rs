//! Push gateway layer.
//!
//! [`PushGateway`] accepts a batch of [`PushMessage`]s in one call and
//! reports only whether the call as a whole succeeded. Delivery is
//! best-effort: per-message provider results are logged, never parsed
//! into failures, and no delivery receipt is awaited.

pub mod expo;

use std::fmt;

use async_trait::async_trait;

use crate::domain::PushMessage;
use crate::error::NotifierError;

pub use expo::ExpoPushGateway;

/// Sends batches of push messages to a delivery provider.
#[async_trait]
pub trait PushGateway: Send + Sync + fmt::Debug {
    /// Sends all `messages` in one batched call.
    ///
    /// An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Dispatch`] if the provider could not be
    /// reached or rejected the batch.
    async fn send(&self, messages: &[PushMessage]) -> Result<(), NotifierError>;
}
