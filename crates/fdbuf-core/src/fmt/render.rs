//! Directive renderers.
//!
//! Turns parsed directives plus tagged arguments into bytes. Integer
//! rendering follows POSIX semantics: precision is a minimum digit
//! count, explicit precision 0 with value 0 emits no digits, the
//! alternate form adds the `0`/`0x`/`0X` prefix for nonzero values,
//! and the sign lands before any zero padding.
//!
//! Expansion per directive is bounded: pad and zero-fill runs are
//! clamped to [`MAX_PAD`], so no width or precision request can grow
//! the output unboundedly.

use super::{Arg, FormatError, FormatSpec, Precision, Segment, Width, parse_format};

/// Hard ceiling on pad/zero-fill emitted for a single directive.
const MAX_PAD: usize = 4096;

/// Render `fmt` with `args`, appending to `out`.
///
/// Returns the number of bytes appended. On any error `out` is
/// restored to its prior content. Surplus arguments are ignored, as
/// with C printf; a missing or mistagged argument is an error.
pub fn render_into(
    out: &mut Vec<u8>,
    fmt: &[u8],
    args: &[Arg<'_>],
) -> Result<usize, FormatError> {
    let segments = parse_format(fmt)?;
    let start = out.len();
    let mut cursor = Cursor { args, next: 0 };

    for seg in &segments {
        let step = match seg {
            Segment::Literal(lit) => {
                out.extend_from_slice(lit);
                Ok(())
            }
            Segment::Percent => {
                out.push(b'%');
                Ok(())
            }
            Segment::Spec(spec) => render_spec(out, spec, &mut cursor),
        };
        if let Err(e) = step {
            out.truncate(start);
            return Err(e);
        }
    }
    Ok(out.len() - start)
}

// ---------------------------------------------------------------------------
// Argument cursor
// ---------------------------------------------------------------------------

struct Cursor<'s, 'a> {
    args: &'s [Arg<'a>],
    next: usize,
}

impl<'a> Cursor<'_, 'a> {
    fn take(&mut self) -> Result<(usize, Arg<'a>), FormatError> {
        match self.args.get(self.next) {
            Some(&arg) => {
                let index = self.next;
                self.next += 1;
                Ok((index, arg))
            }
            None => Err(FormatError::MissingArg {
                index: self.next,
                supplied: self.args.len(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-directive dispatch
// ---------------------------------------------------------------------------

fn render_spec(
    out: &mut Vec<u8>,
    spec: &FormatSpec,
    cursor: &mut Cursor<'_, '_>,
) -> Result<(), FormatError> {
    let mut spec = spec.clone();

    // '*' width and precision consume arguments first, in order.
    if spec.width == Width::FromArg {
        let (index, arg) = cursor.take()?;
        let w = numeric_value(arg, index, spec.conversion)?;
        if w < 0 {
            // Negative '*' width means left-justify with |w|.
            spec.flags.left_justify = true;
            spec.flags.zero_pad = false;
            spec.width = Width::Fixed(w.unsigned_abs() as usize);
        } else {
            spec.width = Width::Fixed(w as usize);
        }
    }
    if spec.precision == Precision::FromArg {
        let (index, arg) = cursor.take()?;
        let p = numeric_value(arg, index, spec.conversion)?;
        // Negative '*' precision means no precision at all.
        spec.precision = if p < 0 {
            Precision::None
        } else {
            Precision::Fixed(p as usize)
        };
    }

    let (index, arg) = cursor.take()?;
    match spec.conversion {
        b'd' | b'i' => {
            let v = signed_value(arg, index, spec.conversion)?;
            emit_signed(out, v, &spec);
        }
        b'u' | b'o' | b'x' | b'X' => {
            let v = unsigned_value(arg, index, spec.conversion)?;
            emit_integer(out, v, None, &spec);
        }
        b'c' => match arg {
            Arg::Char(c) => emit_padded(out, &spec, None, b"", 0, &[c]),
            _ => return Err(mismatch(index, spec.conversion)),
        },
        b's' => match arg {
            Arg::Bytes(s) => emit_bytes(out, s, &spec),
            _ => return Err(mismatch(index, spec.conversion)),
        },
        b'p' => match arg {
            Arg::Ptr(p) => emit_pointer(out, p, &spec),
            _ => return Err(mismatch(index, spec.conversion)),
        },
        _ => unreachable!("parser admits only known conversions"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument coercion
// ---------------------------------------------------------------------------

fn mismatch(index: usize, conversion: u8) -> FormatError {
    FormatError::TypeMismatch {
        index,
        conversion: char::from(conversion),
    }
}

/// Coerce an argument for a signed conversion.
fn signed_value(arg: Arg<'_>, index: usize, conversion: u8) -> Result<i64, FormatError> {
    match arg {
        Arg::Int(v) => Ok(v),
        Arg::Uint(v) => i64::try_from(v).map_err(|_| mismatch(index, conversion)),
        _ => Err(mismatch(index, conversion)),
    }
}

/// Coerce an argument for an unsigned conversion. Negative signed
/// values do not silently wrap.
fn unsigned_value(arg: Arg<'_>, index: usize, conversion: u8) -> Result<u64, FormatError> {
    match arg {
        Arg::Uint(v) => Ok(v),
        Arg::Int(v) => u64::try_from(v).map_err(|_| mismatch(index, conversion)),
        _ => Err(mismatch(index, conversion)),
    }
}

/// Coerce an argument consumed by a '*' width or precision.
fn numeric_value(arg: Arg<'_>, index: usize, conversion: u8) -> Result<i64, FormatError> {
    match arg {
        Arg::Int(v) => Ok(v),
        Arg::Uint(v) => Ok(i64::try_from(v).unwrap_or(i64::MAX)),
        _ => Err(mismatch(index, conversion)),
    }
}

// ---------------------------------------------------------------------------
// Emitters
// ---------------------------------------------------------------------------

fn emit_signed(out: &mut Vec<u8>, value: i64, spec: &FormatSpec) {
    let sign = if value < 0 {
        Some(b'-')
    } else if spec.flags.force_sign {
        Some(b'+')
    } else if spec.flags.space_sign {
        Some(b' ')
    } else {
        None
    };
    emit_integer(out, value.unsigned_abs(), sign, spec);
}

fn emit_integer(out: &mut Vec<u8>, magnitude: u64, sign: Option<u8>, spec: &FormatSpec) {
    let (base, uppercase) = match spec.conversion {
        b'o' => (8, false),
        b'x' => (16, false),
        b'X' => (16, true),
        _ => (10, false),
    };
    let mut scratch = [0u8; 64];
    let ndigits = digits_into(&mut scratch, magnitude, base, uppercase);
    let digits = &scratch[64 - ndigits..];

    // Explicit precision 0 with value 0 emits no digits.
    let suppress = magnitude == 0 && spec.precision == Precision::Fixed(0);
    let min_digits = match spec.precision {
        Precision::Fixed(p) => p,
        _ => 1,
    };
    let zeros = if suppress {
        0
    } else {
        min_digits.saturating_sub(ndigits).min(MAX_PAD)
    };

    let prefix: &[u8] = if spec.flags.alt_form && magnitude != 0 {
        match spec.conversion {
            b'o' => b"0",
            b'x' => b"0x",
            b'X' => b"0X",
            _ => b"",
        }
    } else {
        b""
    };

    let payload = if suppress { b"" as &[u8] } else { digits };
    emit_padded(out, spec, sign, prefix, zeros, payload);
}

fn emit_bytes(out: &mut Vec<u8>, s: &[u8], spec: &FormatSpec) {
    // Precision truncates the string.
    let limit = match spec.precision {
        Precision::Fixed(p) => p.min(s.len()),
        _ => s.len(),
    };
    emit_padded(out, spec, None, b"", 0, &s[..limit]);
}

fn emit_pointer(out: &mut Vec<u8>, addr: usize, spec: &FormatSpec) {
    if addr == 0 {
        emit_padded(out, spec, None, b"", 0, b"(nil)");
        return;
    }
    let mut scratch = [0u8; 64];
    let ndigits = digits_into(&mut scratch, addr as u64, 16, false);
    emit_padded(out, spec, None, b"0x", 0, &scratch[64 - ndigits..]);
}

/// Shared field layout: `[space pad] sign prefix [zero pad] zeros payload [space pad]`.
///
/// Left-justify moves the space padding to the right; the '0' flag
/// turns the field padding into zeros placed after sign and prefix.
fn emit_padded(
    out: &mut Vec<u8>,
    spec: &FormatSpec,
    sign: Option<u8>,
    prefix: &[u8],
    zeros: usize,
    payload: &[u8],
) {
    let content = usize::from(sign.is_some()) + prefix.len() + zeros + payload.len();
    let width = match spec.width {
        Width::Fixed(w) => w,
        _ => 0,
    };
    let pad = width.saturating_sub(content).min(MAX_PAD);

    if !spec.flags.left_justify && !spec.flags.zero_pad {
        push_repeat(out, b' ', pad);
    }
    if let Some(s) = sign {
        out.push(s);
    }
    out.extend_from_slice(prefix);
    if !spec.flags.left_justify && spec.flags.zero_pad {
        push_repeat(out, b'0', pad);
    }
    push_repeat(out, b'0', zeros);
    out.extend_from_slice(payload);
    if spec.flags.left_justify {
        push_repeat(out, b' ', pad);
    }
}

/// Render `value` in `base` right-aligned into the tail of `scratch`.
/// Returns the digit count.
fn digits_into(scratch: &mut [u8; 64], mut value: u64, base: u64, uppercase: bool) -> usize {
    if value == 0 {
        scratch[63] = b'0';
        return 1;
    }
    let alpha = if uppercase { b'A' } else { b'a' };
    let mut pos = 64;
    while value > 0 {
        pos -= 1;
        let digit = (value % base) as u8;
        scratch[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= base;
    }
    64 - pos
}

fn push_repeat(out: &mut Vec<u8>, byte: u8, count: usize) {
    out.resize(out.len() + count, byte);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fmt: &[u8], args: &[Arg<'_>]) -> (Vec<u8>, usize) {
        let mut out = Vec::new();
        let n = render_into(&mut out, fmt, args).unwrap();
        (out, n)
    }

    #[test]
    fn int_pair() {
        let (out, n) = render(b"%d-%d", &[Arg::Int(3), Arg::Int(7)]);
        assert_eq!(out, b"3-7");
        assert_eq!(n, 3);
    }

    #[test]
    fn negative_int() {
        let (out, _) = render(b"%d", &[Arg::Int(-123)]);
        assert_eq!(out, b"-123");
    }

    #[test]
    fn i64_min_does_not_overflow() {
        let (out, _) = render(b"%d", &[Arg::Int(i64::MIN)]);
        assert_eq!(out, b"-9223372036854775808");
    }

    #[test]
    fn width_right_justifies() {
        let (out, _) = render(b"%8d", &[Arg::Int(42)]);
        assert_eq!(out, b"      42");
    }

    #[test]
    fn zero_pad_after_sign() {
        let (out, _) = render(b"%08d", &[Arg::Int(-42)]);
        assert_eq!(out, b"-0000042");
    }

    #[test]
    fn left_justify() {
        let (out, _) = render(b"%-8d|", &[Arg::Int(42)]);
        assert_eq!(out, b"42      |");
    }

    #[test]
    fn force_sign() {
        let (out, _) = render(b"%+d", &[Arg::Int(42)]);
        assert_eq!(out, b"+42");
    }

    #[test]
    fn space_sign() {
        let (out, _) = render(b"% d", &[Arg::Int(42)]);
        assert_eq!(out, b" 42");
    }

    #[test]
    fn precision_pads_digits() {
        let (out, _) = render(b"%.5d", &[Arg::Int(42)]);
        assert_eq!(out, b"00042");
    }

    #[test]
    fn precision_zero_suppresses_zero() {
        let (out, _) = render(b"[%.0d]", &[Arg::Int(0)]);
        assert_eq!(out, b"[]");
    }

    #[test]
    fn hex_alt_form() {
        let (out, _) = render(b"%#x", &[Arg::Uint(255)]);
        assert_eq!(out, b"0xff");
    }

    #[test]
    fn hex_upper() {
        let (out, _) = render(b"%#X", &[Arg::Uint(255)]);
        assert_eq!(out, b"0XFF");
    }

    #[test]
    fn octal_alt_form() {
        let (out, _) = render(b"%#o", &[Arg::Uint(8)]);
        assert_eq!(out, b"010");
    }

    #[test]
    fn alt_form_zero_has_no_prefix() {
        let (out, _) = render(b"%#x", &[Arg::Uint(0)]);
        assert_eq!(out, b"0");
    }

    #[test]
    fn bytes_basic() {
        let (out, n) = render(b"%s", &[Arg::Bytes(b"hello")]);
        assert_eq!(out, b"hello");
        assert_eq!(n, 5);
    }

    #[test]
    fn bytes_precision_truncates() {
        let (out, _) = render(b"%.3s", &[Arg::Bytes(b"hello")]);
        assert_eq!(out, b"hel");
    }

    #[test]
    fn bytes_width_pads() {
        let (out, _) = render(b"%7s", &[Arg::Bytes(b"hi")]);
        assert_eq!(out, b"     hi");
    }

    #[test]
    fn char_with_width() {
        let (out, _) = render(b"%5c", &[Arg::Char(b'A')]);
        assert_eq!(out, b"    A");
    }

    #[test]
    fn pointer_nil() {
        let (out, _) = render(b"%p", &[Arg::Ptr(0)]);
        assert_eq!(out, b"(nil)");
    }

    #[test]
    fn pointer_hex() {
        let (out, _) = render(b"%p", &[Arg::Ptr(0xdead)]);
        assert_eq!(out, b"0xdead");
    }

    #[test]
    fn star_width() {
        let (out, _) = render(b"%*d", &[Arg::Int(6), Arg::Int(42)]);
        assert_eq!(out, b"    42");
    }

    #[test]
    fn negative_star_width_left_justifies() {
        let (out, _) = render(b"%*d|", &[Arg::Int(-6), Arg::Int(42)]);
        assert_eq!(out, b"42    |");
    }

    #[test]
    fn star_precision() {
        let (out, _) = render(b"%.*s", &[Arg::Int(2), Arg::Bytes(b"hello")]);
        assert_eq!(out, b"he");
    }

    #[test]
    fn percent_escape_consumes_no_argument() {
        let (out, n) = render(b"100%%", &[]);
        assert_eq!(out, b"100%");
        assert_eq!(n, 4);
    }

    #[test]
    fn surplus_arguments_ignored() {
        let (out, _) = render(b"%d", &[Arg::Int(1), Arg::Int(2)]);
        assert_eq!(out, b"1");
    }

    #[test]
    fn missing_argument_reported() {
        let mut out = Vec::new();
        let err = render_into(&mut out, b"%d %d", &[Arg::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingArg {
                index: 1,
                supplied: 1
            }
        );
    }

    #[test]
    fn type_mismatch_reported() {
        let mut out = Vec::new();
        let err = render_into(&mut out, b"%s", &[Arg::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::TypeMismatch {
                index: 0,
                conversion: 's'
            }
        );
    }

    #[test]
    fn negative_int_rejected_by_unsigned_conversion() {
        let mut out = Vec::new();
        let err = render_into(&mut out, b"%u", &[Arg::Int(-1)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::TypeMismatch {
                index: 0,
                conversion: 'u'
            }
        );
    }

    #[test]
    fn nonnegative_int_accepted_by_unsigned_conversion() {
        let (out, _) = render(b"%u", &[Arg::Int(7)]);
        assert_eq!(out, b"7");
    }

    #[test]
    fn output_untouched_on_error() {
        let mut out = b"keep".to_vec();
        let err = render_into(&mut out, b"ruin %d", &[]).unwrap_err();
        assert!(matches!(err, FormatError::MissingArg { .. }));
        assert_eq!(out, b"keep");
    }

    #[test]
    fn pad_is_bounded() {
        let mut out = Vec::new();
        let n = render_into(&mut out, b"%999999999d", &[Arg::Int(1)]).unwrap();
        assert_eq!(n, 4097); // MAX_PAD spaces plus one digit
    }
}
