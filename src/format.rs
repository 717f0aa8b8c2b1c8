//! Printf-style substitution of resolved format strings.
//!
//! The [`FormatSubstitutor`] trait is the seam between a template and the
//! host's formatting machinery; [`PosixSubstitutor`] is the built-in,
//! locale-independent implementation.

use unic_langid::LanguageIdentifier;

use crate::types::Value;

/// Positional substitution of typed arguments into a printf-style format
/// string.
pub trait FormatSubstitutor {
    /// Substitutes `arguments` into the tokens of `format`, producing the
    /// final display string.
    fn substitute(
        &self,
        format: &str,
        locale: &LanguageIdentifier,
        arguments: &[Value],
    ) -> String;
}

/// The built-in substitutor. Renders arguments locale-independently
/// (C-locale digits and separator).
///
/// Handles escaped percent `%%` and tokens of the shape
/// `%[index$][width][.precision][l|ll]<type>` where `<type>` is an ASCII
/// letter or `@`, covering the five canonical tokens (`%lf`, `%f`, `%lld`,
/// `%llu`, `%@`) as well as overridden specifiers such as `%.2lf` or `%1$@`.
///
/// Arity policy: a token with no corresponding argument is emitted verbatim,
/// and surplus arguments are ignored. A malformed token loses only its `%`;
/// the rest of the string passes through.
pub struct PosixSubstitutor;

impl FormatSubstitutor for PosixSubstitutor {
    fn substitute(
        &self,
        format: &str,
        _locale: &LanguageIdentifier,
        arguments: &[Value],
    ) -> String {
        let bytes = format.as_bytes();
        let mut out = String::with_capacity(format.len());
        let mut cursor = 0usize;
        let mut run = 0usize;
        let mut i = 0usize;

        while i < bytes.len() {
            if bytes[i] != b'%' {
                i += 1;
                continue;
            }
            out.push_str(&format[run..i]);

            // Escaped percent.
            if i + 1 < bytes.len() && bytes[i + 1] == b'%' {
                out.push('%');
                i += 2;
                run = i;
                continue;
            }

            match parse_token(bytes, i) {
                Some(token) => {
                    let value = match token.index {
                        Some(position) if position >= 1 => arguments.get(position - 1),
                        Some(_) => None,
                        None => {
                            let value = arguments.get(cursor);
                            cursor += 1;
                            value
                        }
                    };
                    match value {
                        Some(value) => out.push_str(&render(value, &token)),
                        // No argument for this token: pass it through.
                        None => out.push_str(&format[i..token.end]),
                    }
                    i = token.end;
                    run = i;
                }
                None => {
                    out.push('%');
                    i += 1;
                    run = i;
                }
            }
        }
        out.push_str(&format[run..]);
        out
    }
}

struct Token {
    index: Option<usize>,
    precision: Option<usize>,
    kind: u8,
    end: usize,
}

fn parse_token(bytes: &[u8], start: usize) -> Option<Token> {
    let mut j = start + 1;

    // Optional positional index: digits followed by '$'.
    let mut index: Option<usize> = None;
    let digits_start = j;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j > digits_start && j < bytes.len() && bytes[j] == b'$' {
        index = std::str::from_utf8(&bytes[digits_start..j])
            .ok()
            .and_then(|digits| digits.parse().ok());
        j += 1;
    } else {
        j = start + 1;
    }

    // Optional width (parsed and ignored).
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }

    // Optional precision.
    let mut precision: Option<usize> = None;
    if j < bytes.len() && bytes[j] == b'.' {
        let precision_start = j + 1;
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > precision_start {
            precision = std::str::from_utf8(&bytes[precision_start..j])
                .ok()
                .and_then(|digits| digits.parse().ok());
        }
    }

    // Optional length modifiers (l/ll).
    while j < bytes.len() && bytes[j] == b'l' {
        j += 1;
    }

    // Type character.
    if j < bytes.len() {
        let kind = bytes[j];
        if kind.is_ascii_alphabetic() || kind == b'@' {
            return Some(Token {
                index,
                precision,
                kind,
                end: j + 1,
            });
        }
    }

    None
}

fn render(value: &Value, token: &Token) -> String {
    match token.kind {
        b'f' | b'F' | b'e' | b'E' | b'g' | b'G' => match float_of(value) {
            Some(x) => format!("{:.*}", token.precision.unwrap_or(6), x),
            None => value.to_string(),
        },
        _ => value.to_string(),
    }
}

fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Double(x) => Some(*x),
        Value::Float(x) => Some(f64::from(*x)),
        Value::Int(x) => Some(*x as f64),
        Value::Uint(x) => Some(*x as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> LanguageIdentifier {
        "en-US".parse().expect("valid language identifier")
    }

    fn substitute(format: &str, arguments: &[Value]) -> String {
        PosixSubstitutor.substitute(format, &en(), arguments)
    }

    #[test]
    fn test_object_token_substitution() {
        let out = substitute("Hello, %@!", &[Value::String("World".to_string())]);
        assert_eq!(out, "Hello, World!");
    }

    #[test]
    fn test_escaped_percent_with_zero_arguments() {
        assert_eq!(substitute("100%% done", &[]), "100% done");
    }

    #[test]
    fn test_integer_tokens() {
        let out = substitute("%lld of %llu", &[Value::Int(-3), Value::Uint(10)]);
        assert_eq!(out, "-3 of 10");
    }

    #[test]
    fn test_float_tokens_default_precision() {
        assert_eq!(substitute("%lf", &[Value::Double(0.5)]), "0.500000");
        assert_eq!(substitute("%f", &[Value::Float(1.25)]), "1.250000");
    }

    #[test]
    fn test_precision_override() {
        assert_eq!(substitute("%.2lf", &[Value::Double(2.5)]), "2.50");
    }

    #[test]
    fn test_positional_index_reorders_arguments() {
        let out = substitute(
            "%2$@ before %1$@",
            &[
                Value::String("a".to_string()),
                Value::String("b".to_string()),
            ],
        );
        assert_eq!(out, "b before a");
    }

    #[test]
    fn test_missing_argument_passes_token_through() {
        assert_eq!(substitute("%@ and %@", &[Value::Int(1)]), "1 and %@");
    }

    #[test]
    fn test_surplus_arguments_are_ignored() {
        let out = substitute("just %@", &[Value::Int(1), Value::Int(2)]);
        assert_eq!(out, "just 1");
    }

    #[test]
    fn test_malformed_token_keeps_remainder() {
        assert_eq!(substitute("50% off", &[]), "50% off");
        assert_eq!(substitute("tail %", &[]), "tail %");
    }

    #[test]
    fn test_multibyte_literals_survive() {
        let out = substitute("héllo %@ wörld", &[Value::String("é".to_string())]);
        assert_eq!(out, "héllo é wörld");
    }
}
