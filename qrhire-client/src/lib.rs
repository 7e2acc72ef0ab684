//! Embedder-facing side of the applicant intake tool: a uniform async
//! storage adapter with an on-device fallback mirror, the application form
//! submission flow, and the admin read-model that UIs render.

pub mod admin;
pub mod client;
pub mod form;
pub mod mirror;
pub mod qr;
pub mod transport;

pub use admin::{AdminView, Confirmation, FocusHandle, RefreshReason};
pub use client::{ClientError, StorageClient, StoreEvent};
pub use form::{ApplicationForm, FormState};
pub use mirror::Mirror;
pub use transport::{ApiTransport, HttpTransport, TransportError};

#[cfg(test)]
pub(crate) mod test_support;
