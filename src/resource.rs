//! Resource lookup boundary and the localized string resource type.
//!
//! A [`LocalizedStringResource`] pairs a lookup key with its default
//! template and the scope (table, bundle, locale) used to resolve it. The
//! actual key→format-string storage lives behind [`ResourceLookup`].

use std::{collections::HashMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::types::LocalizationValue;

/// Opaque scope for a resource lookup.
///
/// The crate never inspects a bundle description; it only hands it to the
/// [`ResourceLookup`] implementation, which decides what (if anything) it
/// means.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BundleDescription {
    /// The caller's default resource bundle.
    #[default]
    Main,
    /// A bundle rooted at a filesystem location.
    AtPath(PathBuf),
    /// The bundle associated with a given type, identified by its type name.
    ForType(String),
}

impl BundleDescription {
    /// The bundle associated with `T`.
    pub fn for_type<T: ?Sized>() -> Self {
        BundleDescription::ForType(std::any::type_name::<T>().to_string())
    }
}

/// Key→localized-format-string resolution.
///
/// A missing entry is not an error: implementations return the key itself
/// when no localized string exists, and callers proceed with it unchanged.
pub trait ResourceLookup {
    fn localized_string(
        &self,
        key: &str,
        table: Option<&str>,
        bundle: &BundleDescription,
    ) -> String;
}

/// The identity lookup: every key falls back to itself.
pub struct NoTranslation;

impl ResourceLookup for NoTranslation {
    fn localized_string(
        &self,
        key: &str,
        _table: Option<&str>,
        _bundle: &BundleDescription,
    ) -> String {
        key.to_string()
    }
}

/// A flat in-memory catalog, ignoring table and bundle scope.
impl ResourceLookup for HashMap<String, String> {
    fn localized_string(
        &self,
        key: &str,
        _table: Option<&str>,
        _bundle: &BundleDescription,
    ) -> String {
        self.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

/// A lookup key paired with its default template and resolution scope.
///
/// Equality covers key, default value, table and bundle; the locale is a
/// resolution-time setting, not part of the resource's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedStringResource {
    pub key: String,
    pub default_value: LocalizationValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub bundle: BundleDescription,
    #[serde(with = "locale_string")]
    pub locale: LanguageIdentifier,
}

impl LocalizedStringResource {
    /// Creates a resource with an explicit key distinct from the template's
    /// derived key.
    pub fn new(
        key: impl Into<String>,
        default_value: LocalizationValue,
        locale: LanguageIdentifier,
    ) -> Self {
        LocalizedStringResource {
            key: key.into(),
            default_value,
            table: None,
            bundle: BundleDescription::Main,
            locale,
        }
    }

    /// Creates a resource whose key is the template's own derived key.
    pub fn from_value(default_value: LocalizationValue, locale: LanguageIdentifier) -> Self {
        let key = default_value.key().to_string();
        Self::new(key, default_value, locale)
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_bundle(mut self, bundle: BundleDescription) -> Self {
        self.bundle = bundle;
        self
    }

    /// Localizes the default template within this resource's scope.
    pub fn resolve<L: ResourceLookup + ?Sized>(&self, lookup: &L) -> String {
        self.default_value
            .localize_in(&self.locale, lookup, self.table.as_deref(), &self.bundle)
    }
}

impl PartialEq for LocalizedStringResource {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.default_value == other.default_value
            && self.table == other.table
            && self.bundle == other.bundle
    }
}

impl From<&str> for LocalizedStringResource {
    fn from(value: &str) -> Self {
        Self::new(
            value,
            LocalizationValue::from(value),
            LanguageIdentifier::default(),
        )
    }
}

/// Anything that can describe itself as a localized string resource.
pub trait CustomLocalizedResource {
    fn localized_resource(&self) -> LocalizedStringResource;
}

impl CustomLocalizedResource for LocalizedStringResource {
    fn localized_resource(&self) -> LocalizedStringResource {
        self.clone()
    }
}

mod locale_string {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use unic_langid::LanguageIdentifier;

    pub fn serialize<S: Serializer>(
        locale: &LanguageIdentifier,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&locale.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LanguageIdentifier, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| {
            de::Error::custom(format!("invalid language identifier `{}`", raw))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Element;

    fn en() -> LanguageIdentifier {
        "en".parse().unwrap()
    }

    fn greeting() -> LocalizationValue {
        LocalizationValue::from_elements(vec![
            Element::Literal("Hello, ".to_string()),
            Element::string("World"),
            Element::Literal("!".to_string()),
        ])
    }

    #[test]
    fn test_no_translation_returns_key() {
        let out = NoTranslation.localized_string("greeting.key", None, &BundleDescription::Main);
        assert_eq!(out, "greeting.key");
    }

    #[test]
    fn test_map_lookup_falls_back_to_key() {
        let mut catalog = HashMap::new();
        catalog.insert("known".to_string(), "connu".to_string());
        assert_eq!(
            catalog.localized_string("known", None, &BundleDescription::Main),
            "connu"
        );
        assert_eq!(
            catalog.localized_string("unknown", None, &BundleDescription::Main),
            "unknown"
        );
    }

    #[test]
    fn test_resolve_with_identity_lookup() {
        let resource = LocalizedStringResource::from_value(greeting(), en());
        assert_eq!(resource.key, "Hello, %@!");
        assert_eq!(resource.resolve(&NoTranslation), "Hello, World!");
    }

    #[test]
    fn test_resolve_with_translated_catalog() {
        let mut catalog = HashMap::new();
        catalog.insert("Hello, %@!".to_string(), "Bonjour, %@ !".to_string());
        let resource = LocalizedStringResource::from_value(greeting(), "fr".parse().unwrap());
        assert_eq!(resource.resolve(&catalog), "Bonjour, World !");
    }

    #[test]
    fn test_equality_ignores_locale() {
        let a = LocalizedStringResource::from_value(greeting(), en());
        let b = LocalizedStringResource::from_value(greeting(), "fr".parse().unwrap());
        assert_eq!(a, b);

        let scoped = a.clone().with_table("Buttons");
        assert_ne!(a, scoped);
    }

    #[test]
    fn test_serde_round_trip() {
        let resource = LocalizedStringResource::from_value(greeting(), en())
            .with_table("Dialogs")
            .with_bundle(BundleDescription::AtPath(PathBuf::from("/res/app.bundle")));
        let json = serde_json::to_string(&resource).unwrap();
        let back: LocalizedStringResource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resource);
        assert_eq!(back.locale, resource.locale);
    }

    #[test]
    fn test_bundle_for_type_records_type_name() {
        let bundle = BundleDescription::for_type::<LocalizedStringResource>();
        match bundle {
            BundleDescription::ForType(name) => assert!(name.contains("LocalizedStringResource")),
            other => panic!("unexpected bundle description: {:?}", other),
        }
    }

    #[test]
    fn test_custom_localized_resource_conversion() {
        struct QuitAction;

        impl CustomLocalizedResource for QuitAction {
            fn localized_resource(&self) -> LocalizedStringResource {
                LocalizedStringResource::from("menu.quit")
            }
        }

        fn describe(subject: &impl CustomLocalizedResource) -> String {
            subject.localized_resource().resolve(&NoTranslation)
        }

        assert_eq!(describe(&QuitAction), "menu.quit");
    }

    #[test]
    fn test_invalid_locale_string_fails_decode() {
        let json = r#"{"key":"k","default_value":[{"type":"literal","value":"k"}],"locale":"!!"}"#;
        assert!(serde_json::from_str::<LocalizedStringResource>(json).is_err());
    }
}
