//! Incremental builder for [`LocalizationValue`] templates.
//!
//! The builder is a local, single-owner accumulator: push literal runs and
//! typed arguments in display order, then call [`finish`] to derive the
//! template. Call order is element order; there is no other constraint.
//!
//! [`finish`]: StringInterpolation::finish
//!
//! # Example
//!
//! ```rust
//! use locvalue::StringInterpolation;
//!
//! let mut interpolation = StringInterpolation::with_capacity(2, 1);
//! interpolation.push_literal("Hello, ");
//! interpolation.push_str("World");
//! interpolation.push_literal("!");
//! let value = interpolation.finish();
//!
//! assert_eq!(value.key(), "Hello, %@!");
//! ```

use std::fmt::Display;

use crate::{
    placeholder::Placeholder,
    types::{
        Element, FormatArgument, LocalizationValue, NativeObject, Storage, Value, escape_percent,
    },
};

/// Accumulates the element sequence of one template under construction.
#[derive(Debug, Default)]
pub struct StringInterpolation {
    elements: Vec<Element>,
}

impl StringInterpolation {
    pub fn new() -> Self {
        StringInterpolation::default()
    }

    /// Creates a builder sized for the expected number of literal runs and
    /// interpolations.
    pub fn with_capacity(literal_count: usize, interpolation_count: usize) -> Self {
        StringInterpolation {
            elements: Vec::with_capacity(literal_count + interpolation_count),
        }
    }

    /// Appends a literal text run.
    ///
    /// Every percent sign is doubled before storing, so that later printf
    /// substitution reproduces it verbatim.
    pub fn push_literal(&mut self, literal: &str) {
        self.elements.push(Element::Literal(escape_percent(literal)));
    }

    /// Appends one interpolated value with the default specifier for its
    /// kind.
    pub fn push_value(&mut self, value: Value) {
        let specifier = match &value {
            Value::String(_) | Value::Object(_) => Placeholder::Object,
            Value::Int(_) => Placeholder::Int,
            Value::Uint(_) => Placeholder::Uint,
            Value::Double(_) => Placeholder::Double,
            Value::Float(_) => Placeholder::Float,
        }
        .format_specifier();
        self.push_value_with_specifier(value, specifier);
    }

    /// Appends one interpolated value occupying the given specifier token in
    /// the key.
    pub fn push_value_with_specifier(&mut self, value: Value, specifier: impl Into<String>) {
        self.elements.push(Element::Interpolation(FormatArgument::new(
            Storage::Value(value),
            specifier,
        )));
    }

    /// Appends an unresolved typed placeholder with its canonical specifier.
    pub fn push_placeholder(&mut self, placeholder: Placeholder) {
        self.elements.push(Element::placeholder(placeholder));
    }

    pub fn push_placeholder_with_specifier(
        &mut self,
        placeholder: Placeholder,
        specifier: impl Into<String>,
    ) {
        self.elements
            .push(Element::placeholder_with_specifier(placeholder, specifier));
    }

    pub fn push_str(&mut self, arg: impl Into<String>) {
        self.elements.push(Element::string(arg));
    }

    pub fn push_int(&mut self, arg: i64) {
        self.elements.push(Element::int(arg));
    }

    pub fn push_uint(&mut self, arg: u64) {
        self.elements.push(Element::uint(arg));
    }

    pub fn push_double(&mut self, arg: f64) {
        self.elements.push(Element::double(arg));
    }

    pub fn push_float(&mut self, arg: f32) {
        self.elements.push(Element::float(arg));
    }

    pub fn push_object(&mut self, arg: impl NativeObject + 'static) {
        self.elements.push(Element::object(arg));
    }

    /// Pre-formatting adapter: renders the value to a plain string argument.
    ///
    /// Locale- or formatter-specific renderings (dates, measurements, lists)
    /// belong outside the template; resolve them to a `String` first and
    /// push the result here.
    pub fn push_display(&mut self, arg: impl Display) {
        self.elements.push(Element::string(arg.to_string()));
    }

    /// Consumes the builder and derives the finished template.
    pub fn finish(self) -> LocalizationValue {
        LocalizationValue::from_elements(self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Storage;

    #[test]
    fn test_literal_percent_is_escaped() {
        let mut interpolation = StringInterpolation::new();
        interpolation.push_literal("100% done");
        let value = interpolation.finish();
        assert_eq!(value.key(), "100%% done");
    }

    #[test]
    fn test_push_value_defaults_specifier_per_kind() {
        let mut interpolation = StringInterpolation::new();
        interpolation.push_value(Value::String("a".to_string()));
        interpolation.push_value(Value::Int(1));
        interpolation.push_value(Value::Uint(2));
        interpolation.push_value(Value::Double(3.0));
        interpolation.push_value(Value::Float(4.0));
        let value = interpolation.finish();
        assert_eq!(value.key(), "%@%lld%llu%lf%f");
    }

    #[test]
    fn test_call_order_is_element_order() {
        let mut interpolation = StringInterpolation::with_capacity(2, 2);
        interpolation.push_int(1);
        interpolation.push_literal(" then ");
        interpolation.push_str("two");
        let value = interpolation.finish();
        assert_eq!(value.key(), "%lld then %@");
        assert_eq!(value.arguments().len(), 2);
    }

    #[test]
    fn test_placeholder_and_override_specifier() {
        let mut interpolation = StringInterpolation::new();
        interpolation.push_placeholder(Placeholder::Int);
        interpolation.push_placeholder_with_specifier(Placeholder::Double, "%.1lf");
        let value = interpolation.finish();
        assert_eq!(value.key(), "%lld%.1lf");
        assert!(
            value
                .arguments()
                .iter()
                .all(|a| matches!(a.storage, Storage::Placeholder(_)))
        );
    }

    #[test]
    fn test_push_display_pre_formats_to_string() {
        let mut interpolation = StringInterpolation::new();
        interpolation.push_display(3.14_f64);
        let value = interpolation.finish();
        assert_eq!(value.key(), "%@");
        assert_eq!(
            value.arguments()[0].storage,
            Storage::Value(Value::String("3.14".to_string()))
        );
    }
}
