#![forbid(unsafe_code)]
//! Localizable string templates for Rust.
//!
//! A template is assembled from literal runs and typed interpolated
//! arguments. At construction it derives a stable lookup key containing
//! printf-style format tokens plus an ordered list of typed arguments; the
//! same template can later be resolved against a localized format string
//! fetched by that key.
//!
//! # Quick Start
//!
//! ```rust
//! use locvalue::{NoTranslation, StringInterpolation};
//! use unic_langid::LanguageIdentifier;
//!
//! let mut interpolation = StringInterpolation::with_capacity(2, 1);
//! interpolation.push_literal("Hello, ");
//! interpolation.push_str("World");
//! interpolation.push_literal("!");
//! let value = interpolation.finish();
//!
//! assert_eq!(value.key(), "Hello, %@!");
//!
//! let locale: LanguageIdentifier = "en-US".parse()?;
//! assert_eq!(value.localize(&locale, &NoTranslation, None), "Hello, World!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - Typed interpolation over a closed set of argument kinds (string,
//!   signed/unsigned integer, double, float, opaque object)
//! - Unresolved typed placeholders that format with fixed defaults
//! - Stable printf-token lookup keys with automatic `%%` escaping
//! - Serializable templates (tagged JSON encoding) for crossing storage or
//!   process boundaries; opaque objects are detected and rejected
//! - Pluggable resource lookup and format substitution collaborators

pub mod error;
pub mod format;
pub mod interpolation;
pub mod placeholder;
pub mod resource;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    format::{FormatSubstitutor, PosixSubstitutor},
    interpolation::StringInterpolation,
    placeholder::Placeholder,
    resource::{
        BundleDescription, CustomLocalizedResource, LocalizedStringResource, NoTranslation,
        ResourceLookup,
    },
    types::{Element, FormatArgument, LocalizationValue, OpaqueObject, Storage, Value},
};
