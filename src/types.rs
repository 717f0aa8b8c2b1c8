//! Core template model for locvalue.
//!
//! A [`LocalizationValue`] is an immutable template built from literal runs
//! and typed interpolated arguments. Its lookup key and ordered argument
//! list are derived once, at construction, and form the value's identity.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use unic_langid::LanguageIdentifier;

use crate::{
    format::{FormatSubstitutor, PosixSubstitutor},
    placeholder::Placeholder,
    resource::{BundleDescription, ResourceLookup},
};

/// Marker bound for values carried as opaque object arguments.
///
/// Anything displayable, debuggable and shareable across threads qualifies;
/// a blanket impl covers all such types.
pub trait NativeObject: fmt::Display + fmt::Debug + Send + Sync {}

impl<T: fmt::Display + fmt::Debug + Send + Sync> NativeObject for T {}

/// A shared reference to a native object argument.
///
/// Opaque objects format in-process through their `Display` impl but have no
/// portable representation: serializing a template that contains one fails
/// with [`crate::Error::UnsupportedValue`].
#[derive(Clone)]
pub struct OpaqueObject(Arc<dyn NativeObject>);

impl OpaqueObject {
    pub fn new(object: impl NativeObject + 'static) -> Self {
        OpaqueObject(Arc::new(object))
    }
}

impl fmt::Display for OpaqueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for OpaqueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueObject({:?})", self.0)
    }
}

// Compared by rendered output, not pointer identity, so that template
// equality stays a pure function of the displayed content.
impl PartialEq for OpaqueObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.to_string() == other.0.to_string()
    }
}

/// A concrete interpolated value, classified into one of the closed kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Double(f64),
    Float(f32),
    Uint(u64),
    Object(OpaqueObject),
}

impl Value {
    /// The fixed default substituted for an unresolved placeholder of the
    /// given kind at formatting time.
    pub(crate) fn default_for(placeholder: Placeholder) -> Value {
        match placeholder {
            Placeholder::Double => Value::Double(0.0),
            Placeholder::Float => Value::Float(0.0),
            Placeholder::Int => Value::Int(0),
            Placeholder::Uint => Value::Uint(0),
            Placeholder::Object => Value::String("(null)".to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(value) => write!(f, "{}", value),
            Value::Int(value) => write!(f, "{}", value),
            Value::Double(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Uint(value) => write!(f, "{}", value),
            Value::Object(value) => write!(f, "{}", value),
        }
    }
}

/// Serializable mirror of [`Value`]. `Object` has no entry here on purpose.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
enum ValueRepr {
    String(String),
    Int(i64),
    Double(f64),
    Float(f32),
    Uint(u64),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Value::String(value) => ValueRepr::String(value.clone()),
            Value::Int(value) => ValueRepr::Int(*value),
            Value::Double(value) => ValueRepr::Double(*value),
            Value::Float(value) => ValueRepr::Float(*value),
            Value::Uint(value) => ValueRepr::Uint(*value),
            Value::Object(_) => {
                return Err(ser::Error::custom(
                    "unable to encode an opaque object value",
                ));
            }
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ValueRepr::deserialize(deserializer)? {
            ValueRepr::String(value) => Value::String(value),
            ValueRepr::Int(value) => Value::Int(value),
            ValueRepr::Double(value) => Value::Double(value),
            ValueRepr::Float(value) => Value::Float(value),
            ValueRepr::Uint(value) => Value::Uint(value),
        })
    }
}

/// What one argument slot holds: a concrete value, or an unresolved typed
/// placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "storage", rename_all = "snake_case")]
pub enum Storage {
    Value(Value),
    Placeholder(Placeholder),
}

/// One substitution point of a template: its storage plus the printf-style
/// token it occupies in the lookup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatArgument {
    pub storage: Storage,
    pub specifier: String,
}

impl FormatArgument {
    pub fn new(storage: Storage, specifier: impl Into<String>) -> Self {
        FormatArgument {
            storage,
            specifier: specifier.into(),
        }
    }
}

/// One constituent of a template: a literal text run (percent signs already
/// doubled) or an interpolated argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Element {
    Literal(String),
    Interpolation(FormatArgument),
}

impl Element {
    pub fn string(arg: impl Into<String>) -> Element {
        Element::string_with_specifier(arg, Placeholder::Object.format_specifier())
    }

    pub fn string_with_specifier(arg: impl Into<String>, specifier: impl Into<String>) -> Element {
        Element::Interpolation(FormatArgument::new(
            Storage::Value(Value::String(arg.into())),
            specifier,
        ))
    }

    pub fn int(arg: i64) -> Element {
        Element::int_with_specifier(arg, Placeholder::Int.format_specifier())
    }

    pub fn int_with_specifier(arg: i64, specifier: impl Into<String>) -> Element {
        Element::Interpolation(FormatArgument::new(Storage::Value(Value::Int(arg)), specifier))
    }

    pub fn uint(arg: u64) -> Element {
        Element::uint_with_specifier(arg, Placeholder::Uint.format_specifier())
    }

    pub fn uint_with_specifier(arg: u64, specifier: impl Into<String>) -> Element {
        Element::Interpolation(FormatArgument::new(
            Storage::Value(Value::Uint(arg)),
            specifier,
        ))
    }

    pub fn double(arg: f64) -> Element {
        Element::double_with_specifier(arg, Placeholder::Double.format_specifier())
    }

    pub fn double_with_specifier(arg: f64, specifier: impl Into<String>) -> Element {
        Element::Interpolation(FormatArgument::new(
            Storage::Value(Value::Double(arg)),
            specifier,
        ))
    }

    pub fn float(arg: f32) -> Element {
        Element::float_with_specifier(arg, Placeholder::Float.format_specifier())
    }

    pub fn float_with_specifier(arg: f32, specifier: impl Into<String>) -> Element {
        Element::Interpolation(FormatArgument::new(
            Storage::Value(Value::Float(arg)),
            specifier,
        ))
    }

    pub fn object(arg: impl NativeObject + 'static) -> Element {
        Element::Interpolation(FormatArgument::new(
            Storage::Value(Value::Object(OpaqueObject::new(arg))),
            Placeholder::Object.format_specifier(),
        ))
    }

    pub fn placeholder(placeholder: Placeholder) -> Element {
        Element::placeholder_with_specifier(placeholder, placeholder.format_specifier())
    }

    pub fn placeholder_with_specifier(
        placeholder: Placeholder,
        specifier: impl Into<String>,
    ) -> Element {
        Element::Interpolation(FormatArgument::new(
            Storage::Placeholder(placeholder),
            specifier,
        ))
    }
}

/// Doubles every percent sign so printf substitution treats it as literal.
pub(crate) fn escape_percent(text: &str) -> String {
    text.replace('%', "%%")
}

/// An immutable localizable string template.
///
/// Built from an element sequence (see [`crate::StringInterpolation`]); the
/// lookup `key` and the ordered `arguments` list are extracted eagerly and
/// never recomputed. Two templates are equal iff their key and arguments are
/// equal, regardless of how their literal runs were split.
#[derive(Debug, Clone)]
pub struct LocalizationValue {
    elements: Vec<Element>,
    key: String,
    arguments: Vec<FormatArgument>,
}

impl LocalizationValue {
    /// Builds a template from a finished element sequence.
    ///
    /// Literal elements are taken as-is: callers constructing elements by
    /// hand are responsible for percent escaping (the builder and the string
    /// conversions do it for you).
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let (key, arguments) = Self::extract(&elements);
        LocalizationValue {
            elements,
            key,
            arguments,
        }
    }

    /// The stable lookup key: literal text and argument specifiers
    /// concatenated in element order.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The ordered typed arguments, one per interpolation element.
    pub fn arguments(&self) -> &[FormatArgument] {
        &self.arguments
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Resolves this template against the main bundle scope.
    ///
    /// Shorthand for [`localize_in`](Self::localize_in) with
    /// [`BundleDescription::Main`].
    pub fn localize<L: ResourceLookup + ?Sized>(
        &self,
        locale: &LanguageIdentifier,
        lookup: &L,
        table: Option<&str>,
    ) -> String {
        self.localize_in(locale, lookup, table, &BundleDescription::Main)
    }

    /// Resolves this template within an explicit bundle scope, using the
    /// built-in printf-style substitutor.
    pub fn localize_in<L: ResourceLookup + ?Sized>(
        &self,
        locale: &LanguageIdentifier,
        lookup: &L,
        table: Option<&str>,
        bundle: &BundleDescription,
    ) -> String {
        self.localize_with(locale, lookup, table, bundle, &PosixSubstitutor)
    }

    /// Resolves this template with a caller-supplied substitutor.
    ///
    /// The format string comes from `lookup` (falling back to the key when
    /// no localized entry exists). Unresolved placeholders substitute fixed
    /// defaults (`0` for integers, `0.0` for floating point, `"(null)"` for
    /// objects), so formatting never fails solely because a placeholder was
    /// left unresolved.
    pub fn localize_with<L, F>(
        &self,
        locale: &LanguageIdentifier,
        lookup: &L,
        table: Option<&str>,
        bundle: &BundleDescription,
        substitutor: &F,
    ) -> String
    where
        L: ResourceLookup + ?Sized,
        F: FormatSubstitutor + ?Sized,
    {
        let format = lookup.localized_string(&self.key, table, bundle);
        let values: Vec<Value> = self
            .arguments
            .iter()
            .map(|argument| match &argument.storage {
                Storage::Value(value) => value.clone(),
                Storage::Placeholder(placeholder) => Value::default_for(*placeholder),
            })
            .collect();
        substitutor.substitute(&format, locale, &values)
    }

    /// Fails with [`crate::Error::UnsupportedValue`] when any argument holds
    /// an opaque object reference, which has no portable representation.
    ///
    /// The persistence surface calls this before writing, so a rejected
    /// template produces no output at all.
    pub fn ensure_serializable(&self) -> Result<(), crate::Error> {
        for argument in &self.arguments {
            if let Storage::Value(Value::Object(object)) = &argument.storage {
                return Err(crate::Error::UnsupportedValue(format!(
                    "opaque object argument {:?}",
                    object
                )));
            }
        }
        Ok(())
    }

    fn extract(elements: &[Element]) -> (String, Vec<FormatArgument>) {
        let mut arguments = Vec::new();
        let key = elements.iter().fold(String::new(), |mut key, element| {
            match element {
                Element::Literal(literal) => key.push_str(literal),
                Element::Interpolation(argument) => {
                    key.push_str(&argument.specifier);
                    arguments.push(argument.clone());
                }
            }
            key
        });
        (key, arguments)
    }
}

impl PartialEq for LocalizationValue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.arguments == other.arguments
    }
}

impl From<&str> for LocalizationValue {
    fn from(value: &str) -> Self {
        LocalizationValue::from_elements(vec![Element::Literal(escape_percent(value))])
    }
}

impl From<String> for LocalizationValue {
    fn from(value: String) -> Self {
        LocalizationValue::from(value.as_str())
    }
}

impl fmt::Display for LocalizationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// The persisted form of a template is its element sequence; key and
/// arguments are re-derived on decode.
impl Serialize for LocalizationValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.elements.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LocalizationValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<Element>::deserialize(deserializer)?;
        Ok(LocalizationValue::from_elements(elements))
    }
}
