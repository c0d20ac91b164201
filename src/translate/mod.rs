// Translation seam
//
// The pipeline talks to a `Translator` trait object so that the remote
// service can be replaced in tests. One production implementation exists:
// the Microsoft Translator v3 REST API client.

pub mod azure;

use async_trait::async_trait;

pub use azure::AzureTranslator;
use crate::error::Result;

/// A single remote translation call. One attempt per invocation, bounded by
/// the client timeout; no retries. Failures carry their cause so the caller
/// can decide on the fallback.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate_text(&self, text: &str) -> Result<String>;
}
