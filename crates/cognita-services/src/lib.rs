//! Service façades for the Cognita natural-language platform.
//!
//! Each façade wraps a [`cognita_core::ServiceClient`] bound to that
//! service's endpoint and credentials:
//!
//! ```no_run
//! use cognita_core::{Credentials, ServiceClient};
//! use cognita_services::translation::{TranslationService, TranslateOptions};
//!
//! # async fn run() -> cognita_core::CoreResult<()> {
//! let client = ServiceClient::new(
//!     cognita_services::translation::DEFAULT_ENDPOINT,
//!     Credentials::api_key("..."),
//! )?;
//! let translation = TranslationService::new(client);
//! let _result = translation.translate(&TranslateOptions::between("hello", "en", "es")).await?;
//! # Ok(())
//! # }
//! ```

pub mod conversation;
pub mod personality;
pub mod translation;

pub use conversation::ConversationService;
pub use personality::PersonalityInsightsService;
pub use translation::TranslationService;
