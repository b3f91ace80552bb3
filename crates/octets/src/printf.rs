//! Percent-style formatting over text.
//!
//! The engine only ever sees text in which every character stands for one
//! byte (see [`crate::charmap`]); byte arguments are mapped the same way
//! before they are inserted.

use rust_decimal::prelude::ToPrimitive;

use crate::charmap;
use crate::repr::bytes_repr;
use crate::{OctetsError, Value};

/// One substitutable argument.
#[derive(Debug, Clone)]
pub(crate) enum Arg {
    Bytes(Vec<u8>),
    Other(Value),
}

impl Arg {
    fn type_name(&self) -> &'static str {
        match self {
            Arg::Bytes(_) => "bytes",
            Arg::Other(v) => v.type_name(),
        }
    }
}

/// Arguments in the shape the template consumes them.
///
/// A mapping argument is also available positionally, as a whole, so a
/// bare `%s` next to `%(key)s` directives renders the mapping itself.
#[derive(Debug, Clone, Default)]
pub(crate) struct Args {
    pub positional: Vec<Arg>,
    pub mapping: Option<Vec<(String, Arg)>>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    alt: bool,
    zero: bool,
}

#[derive(Debug, Clone, Copy)]
struct Spec {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

/// Largest accepted width or precision. The float renderers add a few
/// digits on top of the precision, and std formatting caps it at `u16::MAX`.
const FIELD_LIMIT: usize = i16::MAX as usize;

fn check_field(value: u128, field: &'static str) -> Result<usize, OctetsError> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v <= FIELD_LIMIT)
        .ok_or(OctetsError::FieldTooBig { field })
}

/// Reads a run of decimal digits starting at `*i`.
fn parse_field(chars: &[char], i: &mut usize, field: &'static str) -> Result<usize, OctetsError> {
    let mut value = 0usize;
    while let Some(d) = chars.get(*i).and_then(|c| c.to_digit(10)) {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(d as usize))
            .filter(|&v| v <= FIELD_LIMIT)
            .ok_or(OctetsError::FieldTooBig { field })?;
        *i += 1;
    }
    Ok(value)
}

struct Cursor<'a> {
    args: &'a Args,
    next: usize,
}

impl<'a> Cursor<'a> {
    fn next_arg(&mut self) -> Result<&'a Arg, OctetsError> {
        let arg = self
            .args
            .positional
            .get(self.next)
            .ok_or(OctetsError::NotEnoughArguments)?;
        self.next += 1;
        Ok(arg)
    }

    /// Consumes a `*` argument: its magnitude and whether it was negative.
    fn star(&mut self, field: &'static str) -> Result<(usize, bool), OctetsError> {
        match self.next_arg()? {
            Arg::Other(Value::Int(n)) => Ok((check_field(n.unsigned_abs(), field)?, *n < 0)),
            Arg::Other(Value::Bool(b)) => Ok((usize::from(*b), false)),
            other => Err(OctetsError::StarArgument {
                type_name: other.type_name(),
            }),
        }
    }

    fn keyed(&self, key: &str) -> Result<&'a Arg, OctetsError> {
        let mapping = self.args.mapping.as_ref().ok_or(OctetsError::MappingRequired)?;
        mapping
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| {
                let raw = charmap::encode(key).unwrap_or_else(|_| key.as_bytes().to_vec());
                OctetsError::MissingKey(bytes_repr(&raw))
            })
    }
}

/// Expands every directive of `template` with `args`.
pub(crate) fn format(template: &str, args: &Args) -> Result<String, OctetsError> {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut cursor = Cursor { args, next: 0 };
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        i += 1;

        let mut keyed = None;
        if chars.get(i) == Some(&'(') {
            let mut depth = 1;
            let start = i + 1;
            i += 1;
            while i < chars.len() {
                match chars[i] {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            if i >= chars.len() {
                return Err(OctetsError::IncompleteFormat);
            }
            let key: String = chars[start..i].iter().collect();
            keyed = Some(cursor.keyed(&key)?);
            i += 1;
        }

        let mut flags = Flags::default();
        while let Some(&c) = chars.get(i) {
            match c {
                '-' => flags.left = true,
                '+' => flags.plus = true,
                ' ' => flags.space = true,
                '#' => flags.alt = true,
                '0' => flags.zero = true,
                _ => break,
            }
            i += 1;
        }

        let width = if chars.get(i) == Some(&'*') {
            let (w, negative) = cursor.star("width")?;
            flags.left |= negative;
            i += 1;
            w
        } else {
            parse_field(&chars, &mut i, "width")?
        };

        let mut precision = None;
        if chars.get(i) == Some(&'.') {
            i += 1;
            if chars.get(i) == Some(&'*') {
                // A negative precision counts as zero.
                let (p, negative) = cursor.star("precision")?;
                precision = Some(if negative { 0 } else { p });
                i += 1;
            } else {
                precision = Some(parse_field(&chars, &mut i, "precision")?);
            }
        }

        if matches!(chars.get(i), Some('h' | 'l' | 'L')) {
            i += 1;
        }

        let conversion = *chars.get(i).ok_or(OctetsError::IncompleteFormat)?;
        if conversion == '%' {
            out.push('%');
            i += 1;
            continue;
        }
        if !"diuoxXeEfFgGcsra".contains(conversion) {
            return Err(OctetsError::UnsupportedFormatChar {
                character: conversion,
                code: u32::from(conversion),
                index: i,
            });
        }

        let arg = match keyed {
            Some(arg) => arg,
            None => cursor.next_arg()?,
        };
        let spec = Spec {
            flags,
            width,
            precision,
            conversion,
        };
        render(&spec, arg, &mut out)?;
        i += 1;
    }

    if cursor.next < args.positional.len() && args.mapping.is_none() {
        return Err(OctetsError::UnconvertedArguments);
    }
    Ok(out)
}

fn render(spec: &Spec, arg: &Arg, out: &mut String) -> Result<(), OctetsError> {
    match spec.conversion {
        's' => {
            let text = match arg {
                Arg::Bytes(b) => charmap::decode(b),
                Arg::Other(v) => v.to_string(),
            };
            pad_text(spec, &text, out);
        }
        'r' => pad_text(spec, &arg_repr(arg), out),
        'a' => pad_text(spec, &ascii_escape(&arg_repr(arg)), out),
        'c' => {
            let c = match arg {
                Arg::Bytes(b) if b.len() == 1 => char::from(b[0]),
                Arg::Other(Value::Int(n)) => u8::try_from(*n)
                    .map(char::from)
                    .map_err(|_| OctetsError::CharRange)?,
                Arg::Other(Value::Bool(b)) => char::from(u8::from(*b)),
                _ => return Err(OctetsError::CharRange),
            };
            pad_text(spec, &c.to_string(), out);
        }
        'd' | 'i' | 'u' => {
            let (negative, digits) = decimal_digits(spec.conversion, arg)?;
            pad_digits(spec, negative, digits, "", out);
        }
        'o' => {
            let n = to_integer(spec.conversion, arg, false)?;
            pad_integer(spec, n, 8, "0o", out);
        }
        'x' => {
            let n = to_integer(spec.conversion, arg, false)?;
            pad_integer(spec, n, 16, "0x", out);
        }
        'X' => {
            let n = to_integer(spec.conversion, arg, false)?;
            pad_integer(spec, n, 16, "0X", out);
        }
        _ => {
            let f = to_float(spec.conversion, arg)?;
            pad_float(spec, f, out);
        }
    }
    Ok(())
}

fn arg_repr(arg: &Arg) -> String {
    match arg {
        Arg::Bytes(b) => bytes_repr(b),
        Arg::Other(v) => v.repr(),
    }
}

/// Replaces every non-ASCII character with its backslash escape.
fn ascii_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let code = u32::from(c);
        match code {
            0..=0x7f => out.push(c),
            0x80..=0xff => out.push_str(&format!("\\x{code:02x}")),
            0x100..=0xffff => out.push_str(&format!("\\u{code:04x}")),
            _ => out.push_str(&format!("\\U{code:08x}")),
        }
    }
    out
}

fn to_integer(conversion: char, arg: &Arg, lenient: bool) -> Result<i128, OctetsError> {
    match arg {
        Arg::Other(Value::Int(n)) => Ok(*n),
        Arg::Other(Value::Bool(b)) => Ok(i128::from(*b)),
        _ => Err(OctetsError::ArgumentType {
            conversion,
            expected: if lenient { "a real number" } else { "an integer" },
            type_name: arg.type_name(),
        }),
    }
}

/// Sign and base-10 digits for `%d`. Floats and decimals are truncated
/// toward zero and keep every digit, however large.
fn decimal_digits(conversion: char, arg: &Arg) -> Result<(bool, String), OctetsError> {
    match arg {
        Arg::Other(Value::Float(f)) if f.is_finite() => {
            let t = f.trunc();
            Ok((t < 0.0, format!("{:.0}", t.abs())))
        }
        Arg::Other(Value::Float(f)) => Err(OctetsError::NonFiniteInteger(f.to_string())),
        Arg::Other(Value::Decimal(d)) => {
            let t = d.trunc();
            Ok((t.is_sign_negative() && !t.is_zero(), t.abs().to_string()))
        }
        _ => {
            let n = to_integer(conversion, arg, true)?;
            Ok((n < 0, n.unsigned_abs().to_string()))
        }
    }
}

fn to_float(conversion: char, arg: &Arg) -> Result<f64, OctetsError> {
    match arg {
        Arg::Other(Value::Int(n)) => Ok(*n as f64),
        Arg::Other(Value::Bool(b)) => Ok(f64::from(u8::from(*b))),
        Arg::Other(Value::Float(f)) => Ok(*f),
        Arg::Other(Value::Decimal(d)) => d
            .to_f64()
            .ok_or_else(|| OctetsError::DecimalToFloat(d.to_string())),
        _ => Err(OctetsError::ArgumentType {
            conversion,
            expected: "a real number",
            type_name: arg.type_name(),
        }),
    }
}

fn pad_text(spec: &Spec, text: &str, out: &mut String) {
    let text: String = match spec.precision {
        Some(p) if spec.conversion != 'c' => text.chars().take(p).collect(),
        _ => text.to_owned(),
    };
    let fill = spec.width.saturating_sub(text.chars().count());
    if spec.flags.left {
        out.push_str(&text);
        out.extend(std::iter::repeat(' ').take(fill));
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(&text);
    }
}

fn sign_of(spec: &Spec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if spec.flags.plus {
        "+"
    } else if spec.flags.space {
        " "
    } else {
        ""
    }
}

/// Lays out `sign`, `prefix` and `digits` in the field width. Zero
/// padding goes between the prefix and the digits.
fn pad_number(spec: &Spec, sign: &str, prefix: &str, digits: &str, zero_ok: bool, out: &mut String) {
    let len = sign.len() + prefix.len() + digits.len();
    let fill = spec.width.saturating_sub(len);
    if spec.flags.left {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(digits);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if spec.flags.zero && zero_ok {
        out.push_str(sign);
        out.push_str(prefix);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(digits);
    }
}

fn pad_integer(spec: &Spec, n: i128, radix: u32, alt_prefix: &str, out: &mut String) {
    let magnitude = n.unsigned_abs();
    let digits = match radix {
        8 => format!("{magnitude:o}"),
        16 if spec.conversion == 'X' => format!("{magnitude:X}"),
        _ => format!("{magnitude:x}"),
    };
    pad_digits(spec, n < 0, digits, alt_prefix, out);
}

/// Zero-extends `digits` to the precision, then lays the number out.
fn pad_digits(spec: &Spec, negative: bool, mut digits: String, alt_prefix: &str, out: &mut String) {
    if let Some(p) = spec.precision {
        if digits.len() < p {
            digits.insert_str(0, &"0".repeat(p - digits.len()));
        }
    }
    let prefix = if spec.flags.alt { alt_prefix } else { "" };
    pad_number(spec, sign_of(spec, negative), prefix, &digits, true, out);
}

fn pad_float(spec: &Spec, f: f64, out: &mut String) {
    let upper = spec.conversion.is_ascii_uppercase();
    let sign = sign_of(spec, f.is_sign_negative() && !f.is_nan());
    if !f.is_finite() {
        let body = match (f.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        pad_number(spec, sign, "", body, false, out);
        return;
    }
    let precision = spec.precision.unwrap_or(6);
    let magnitude = f.abs();
    let body = match spec.conversion.to_ascii_lowercase() {
        'e' => exponential(magnitude, precision, spec.flags.alt),
        'f' => fixed(magnitude, precision, spec.flags.alt),
        _ => general(magnitude, precision, spec.flags.alt),
    };
    let body = if upper { body.to_ascii_uppercase() } else { body };
    pad_number(spec, sign, "", &body, true, out);
}

fn fixed(f: f64, precision: usize, alt: bool) -> String {
    let mut s = format!("{f:.precision$}");
    if alt && precision == 0 {
        s.push('.');
    }
    s
}

/// `d.ddde+XX` with at least two exponent digits.
fn exponential(f: f64, precision: usize, alt: bool) -> String {
    let (mantissa, exponent) = split_exponent(f, precision);
    let mut s = mantissa;
    if alt && precision == 0 {
        s.push('.');
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{s}e{sign}{:02}", exponent.unsigned_abs())
}

fn split_exponent(f: f64, precision: usize) -> (String, i32) {
    let s = format!("{f:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_owned(), exponent.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// Shortest of fixed and exponential notation for `precision`
/// significant digits.
fn general(f: f64, precision: usize, alt: bool) -> String {
    let p = precision.max(1);
    let exponent = if f == 0.0 { 0 } else { split_exponent(f, p - 1).1 };
    let p = p as i32;
    if (-4..p).contains(&exponent) {
        let s = fixed(f, (p - 1 - exponent) as usize, alt);
        if alt {
            s
        } else {
            strip_fraction_zeros(&s)
        }
    } else {
        let s = exponential(f, (p - 1) as usize, alt);
        if alt {
            return s;
        }
        match s.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{exp}", strip_fraction_zeros(mantissa)),
            None => s,
        }
    }
}

fn strip_fraction_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_owned();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rust_decimal::Decimal;

    fn positional(values: Vec<Value>) -> Args {
        Args {
            positional: values.into_iter().map(Arg::Other).collect(),
            mapping: None,
        }
    }

    fn fmt(template: &str, values: Vec<Value>) -> String {
        format(template, &positional(values)).unwrap()
    }

    #[test]
    fn integers() {
        assert_eq!(fmt("%d", vec![Value::Int(42)]), "42");
        assert_eq!(fmt("%5d|%-5d|%05d", vec![Value::Int(-7), Value::Int(7), Value::Int(-7)]), "   -7|7    |-0007");
        assert_eq!(fmt("%+d % d", vec![Value::Int(3), Value::Int(3)]), "+3  3");
        assert_eq!(fmt("%.3d", vec![Value::Int(5)]), "005");
        assert_eq!(fmt("%i %u", vec![Value::Float(-3.9), Value::Bool(true)]), "-3 1");
        assert_eq!(fmt("%ld", vec![Value::Int(1)]), "1");
    }

    #[test]
    fn radix() {
        assert_eq!(fmt("%x %X %o", vec![Value::Int(255), Value::Int(255), Value::Int(8)]), "ff FF 10");
        assert_eq!(fmt("%#x %#X %#o", vec![Value::Int(255), Value::Int(255), Value::Int(8)]), "0xff 0XFF 0o10");
        assert_eq!(fmt("%#06x", vec![Value::Int(255)]), "0x00ff");
        assert_eq!(fmt("%x", vec![Value::Int(-255)]), "-ff");
        let err = format("%x", &positional(vec![Value::Float(1.0)])).unwrap_err();
        assert_eq!(
            err,
            OctetsError::ArgumentType {
                conversion: 'x',
                expected: "an integer",
                type_name: "float",
            }
        );
    }

    #[test]
    fn floats() {
        assert_eq!(fmt("%f", vec![Value::Float(1.5)]), "1.500000");
        assert_eq!(fmt("%.2f", vec![Value::Float(2.675)]), "2.67");
        assert_eq!(fmt("%.0f", vec![Value::Float(2.6)]), "3");
        assert_eq!(fmt("%#.0f", vec![Value::Float(3.0)]), "3.");
        assert_eq!(fmt("%e", vec![Value::Float(12345.678)]), "1.234568e+04");
        assert_eq!(fmt("%.2E", vec![Value::Float(0.00012)]), "1.20E-04");
        assert_eq!(fmt("%e", vec![Value::Float(0.0)]), "0.000000e+00");
        assert_eq!(fmt("%g", vec![Value::Float(0.0001)]), "0.0001");
        assert_eq!(fmt("%g", vec![Value::Float(0.00001)]), "1e-05");
        assert_eq!(fmt("%g", vec![Value::Float(123456.0)]), "123456");
        assert_eq!(fmt("%g", vec![Value::Float(1234567.0)]), "1.23457e+06");
        assert_eq!(fmt("%G", vec![Value::Float(1e-10)]), "1E-10");
        assert_eq!(fmt("%g", vec![Value::Float(0.0)]), "0");
        assert_eq!(fmt("%#g", vec![Value::Float(1.0)]), "1.00000");
        assert_eq!(fmt("%08.3f", vec![Value::Float(-3.14159)]), "-003.142");
        assert_eq!(fmt("%f", vec![Value::Int(2)]), "2.000000");
    }

    #[test]
    fn huge_floats_keep_every_integer_digit() {
        assert_eq!(fmt("%d", vec![Value::Float(1e300)]), format!("{:.0}", 1e300));
        assert_eq!(
            fmt("%i", vec![Value::Float(-1e40)]),
            "-10000000000000000303786028427003666890752"
        );
        assert_eq!(fmt("%d", vec![Value::Float(-0.5)]), "0");
        assert_eq!(fmt("%05d", vec![Value::Float(-12.9)]), "-0012");
        assert_eq!(fmt("%d", vec![Value::Decimal(Decimal::new(-1250, 2))]), "-12");
        assert_eq!(fmt("%.1f", vec![Value::Decimal(Decimal::new(25, 1))]), "2.5");
    }

    #[test]
    fn oversized_fields_are_errors() {
        let precision = OctetsError::FieldTooBig { field: "precision" };
        let width = OctetsError::FieldTooBig { field: "width" };
        let one = || positional(vec![Value::Int(1)]);
        assert_eq!(format("%.99999999999999999999d", &one()).unwrap_err(), precision);
        assert_eq!(format("%.18446744073709551615d", &one()).unwrap_err(), precision);
        assert_eq!(
            format("%.70000f", &positional(vec![Value::Float(1.5)])).unwrap_err(),
            precision
        );
        assert_eq!(format("%99999999s", &one()).unwrap_err(), width);
        assert_eq!(
            format("%*d", &positional(vec![Value::Int(i128::MAX), Value::Int(1)])).unwrap_err(),
            width
        );
        assert_eq!(
            format("%-*d", &positional(vec![Value::Int(i128::MIN), Value::Int(1)])).unwrap_err(),
            width
        );
        assert_eq!(
            format("%.*f", &positional(vec![Value::Int(1 << 40), Value::Float(1.0)])).unwrap_err(),
            precision
        );
        assert_eq!(precision.kind(), ErrorKind::Value);
    }

    #[test]
    fn largest_fields_still_render() {
        assert_eq!(fmt("%32767d", vec![Value::Int(7)]).len(), 32767);
        assert_eq!(fmt("%#.32767g", vec![Value::Float(0.0001)]).len(), 32767 + 5);
        assert_eq!(fmt("%.*f", vec![Value::Int(-3), Value::Float(2.6)]), "3");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(fmt("%f", vec![Value::Float(f64::INFINITY)]), "inf");
        assert_eq!(fmt("%F", vec![Value::Float(f64::NEG_INFINITY)]), "-INF");
        assert_eq!(fmt("%05f", vec![Value::Float(f64::NAN)]), "  nan");
        assert_eq!(
            format("%d", &positional(vec![Value::Float(f64::NAN)])).unwrap_err().kind(),
            ErrorKind::Value
        );
    }

    #[test]
    fn text_conversions() {
        let args = Args {
            positional: vec![Arg::Bytes(vec![b'h', 0xe9]), Arg::Bytes(b"x'".to_vec())],
            mapping: None,
        };
        assert_eq!(format("[%s] %r", &args).unwrap(), "[h\u{e9}] b\"x'\"");
        assert_eq!(fmt("%-4s|%4s|%.1s", vec![Value::Int(1), Value::Int(2), Value::Int(345)]), "1   |   2|3");
        assert_eq!(fmt("%r", vec![Value::None]), "None");
        assert_eq!(
            fmt("%a", vec![Value::List(vec![Value::Text("\u{e9}\u{20ac}".into())])]),
            "['\\xe9\\u20ac']"
        );
    }

    #[test]
    fn char_conversion() {
        let args = Args {
            positional: vec![Arg::Other(Value::Int(65)), Arg::Bytes(vec![0xff])],
            mapping: None,
        };
        assert_eq!(format("%c%c", &args).unwrap(), "A\u{ff}");
        assert_eq!(
            format("%c", &positional(vec![Value::Int(256)])).unwrap_err(),
            OctetsError::CharRange
        );
    }

    #[test]
    fn star_width_and_precision() {
        assert_eq!(
            fmt("%*d|%-*d|%.*f", vec![
                Value::Int(4), Value::Int(1),
                Value::Int(-3), Value::Int(2),
                Value::Int(1), Value::Float(0.26),
            ]),
            "   1|2  |0.3"
        );
        assert_eq!(
            format("%*d", &positional(vec![Value::Float(1.0), Value::Int(1)])).unwrap_err(),
            OctetsError::StarArgument { type_name: "float" }
        );
    }

    #[test]
    fn argument_count_errors() {
        assert_eq!(fmt("100%%", vec![]), "100%");
        assert_eq!(
            format("%d %d", &positional(vec![Value::Int(1)])).unwrap_err(),
            OctetsError::NotEnoughArguments
        );
        assert_eq!(
            format("%d", &positional(vec![Value::Int(1), Value::Int(2)])).unwrap_err(),
            OctetsError::UnconvertedArguments
        );
        assert_eq!(
            format("abc", &positional(vec![Value::Int(1)])).unwrap_err(),
            OctetsError::UnconvertedArguments
        );
    }

    #[test]
    fn malformed_directives() {
        assert_eq!(format("abc%", &Args::default()).unwrap_err(), OctetsError::IncompleteFormat);
        assert_eq!(format("%(key", &Args::default()).unwrap_err(), OctetsError::IncompleteFormat);
        assert_eq!(
            format("ab%q", &positional(vec![Value::Int(1)])).unwrap_err(),
            OctetsError::UnsupportedFormatChar {
                character: 'q',
                code: 0x71,
                index: 3,
            }
        );
    }

    #[test]
    fn keyed_directives() {
        let args = Args {
            positional: vec![Arg::Other(Value::Map(vec![]))],
            mapping: Some(vec![
                ("a".to_owned(), Arg::Bytes(b"xy".to_vec())),
                ("n".to_owned(), Arg::Other(Value::Int(7))),
            ]),
        };
        assert_eq!(format("%(a)s-%(n)03d-%(a)s", &args).unwrap(), "xy-007-xy");
        assert_eq!(format("no directives", &args).unwrap(), "no directives");
        assert_eq!(
            format("%(missing)s", &args).unwrap_err(),
            OctetsError::MissingKey("b'missing'".to_owned())
        );
        assert_eq!(
            format("%(a)s", &positional(vec![Value::Int(1)])).unwrap_err(),
            OctetsError::MappingRequired
        );
    }
}
