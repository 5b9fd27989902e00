//! Typed facades over the application store.
//!
//! Components never build actions or projections themselves: they call an
//! adaptor method per intent and subscribe through the adaptor's state
//! selectors. Every dispatch returns the store's [`EffectHandle`] so callers
//! can wait for the resulting service calls.
//!
//! [`EffectHandle`]: comixed_runtime::EffectHandle

pub mod authentication;
pub mod library;
pub mod scraping;
pub mod selection;

pub use authentication::AuthenticationAdaptor;
pub use library::LibraryAdaptor;
pub use scraping::ScrapingAdaptor;
pub use selection::SelectionAdaptor;
