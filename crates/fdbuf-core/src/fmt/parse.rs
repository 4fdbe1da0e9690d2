//! Format-string parser.
//!
//! Splits a format string into literal runs and directives. Parsing is
//! strict: a directive the grammar does not cover is a [`FormatError`]
//! with the byte offset of the offending directive, never silently
//! echoed back into the output.

use super::{FormatError, FormatFlags, FormatSpec, Precision, Segment, Width};

/// Conversions the renderer knows how to emit.
const CONVERSIONS: &[u8] = b"diuoxXcsp";

/// Parse a format string into segments.
///
/// `%%` becomes [`Segment::Percent`]; every other `%` must introduce a
/// well-formed directive or the whole parse fails.
pub fn parse_format(fmt: &[u8]) -> Result<Vec<Segment<'_>>, FormatError> {
    let mut segments = Vec::new();
    let mut pos = 0;
    let len = fmt.len();

    while pos < len {
        let start = pos;
        while pos < len && fmt[pos] != b'%' {
            pos += 1;
        }
        if pos > start {
            segments.push(Segment::Literal(&fmt[start..pos]));
        }
        if pos >= len {
            break;
        }
        // At a '%'. Remember where the directive began for error reporting.
        let directive_at = pos;
        pos += 1;
        if pos >= len {
            return Err(FormatError::BadDirective { at: directive_at });
        }
        if fmt[pos] == b'%' {
            segments.push(Segment::Percent);
            pos += 1;
            continue;
        }
        let (spec, next) = parse_spec(fmt, pos, directive_at)?;
        segments.push(Segment::Spec(spec));
        pos = next;
    }
    Ok(segments)
}

/// Parse one directive body. `pos` points at the first byte after '%';
/// returns the spec and the index of the first byte after it.
fn parse_spec(
    fmt: &[u8],
    mut pos: usize,
    directive_at: usize,
) -> Result<(FormatSpec, usize), FormatError> {
    let len = fmt.len();

    // --- flags ---
    let mut flags = FormatFlags::default();
    while pos < len {
        match fmt[pos] {
            b'-' => flags.left_justify = true,
            b'+' => flags.force_sign = true,
            b' ' => flags.space_sign = true,
            b'#' => flags.alt_form = true,
            b'0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }
    // POSIX: '+' overrides ' '; '-' overrides '0'.
    if flags.force_sign {
        flags.space_sign = false;
    }
    if flags.left_justify {
        flags.zero_pad = false;
    }

    // --- width ---
    let width = if pos < len && fmt[pos] == b'*' {
        pos += 1;
        Width::FromArg
    } else {
        match scan_decimal(fmt, &mut pos) {
            Some(w) => Width::Fixed(w),
            None => Width::None,
        }
    };

    // --- precision ---
    let precision = if pos < len && fmt[pos] == b'.' {
        pos += 1;
        if pos < len && fmt[pos] == b'*' {
            pos += 1;
            Precision::FromArg
        } else {
            // A bare '.' means precision zero.
            Precision::Fixed(scan_decimal(fmt, &mut pos).unwrap_or(0))
        }
    } else {
        Precision::None
    };

    // --- conversion ---
    if pos >= len {
        return Err(FormatError::BadDirective { at: directive_at });
    }
    let conversion = fmt[pos];
    if !CONVERSIONS.contains(&conversion) {
        return Err(FormatError::BadDirective { at: directive_at });
    }
    pos += 1;

    Ok((
        FormatSpec {
            flags,
            width,
            precision,
            conversion,
        },
        pos,
    ))
}

/// Scan a run of decimal digits at `*pos`, advancing past it.
/// Returns `None` if no digit is present. Saturates on overflow.
fn scan_decimal(fmt: &[u8], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    let mut value = 0usize;
    while *pos < fmt.len() && fmt[*pos].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add((fmt[*pos] - b'0') as usize);
        *pos += 1;
    }
    (*pos > start).then_some(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn single_spec(fmt: &[u8]) -> FormatSpec {
        let segments = parse_format(fmt).unwrap();
        assert_eq!(segments.len(), 1, "expected one directive in {fmt:?}");
        match &segments[0] {
            Segment::Spec(spec) => spec.clone(),
            other => panic!("expected a directive, got {other:?}"),
        }
    }

    #[test]
    fn plain_conversion() {
        let spec = single_spec(b"%d");
        assert_eq!(spec.conversion, b'd');
        assert_eq!(spec.width, Width::None);
        assert_eq!(spec.precision, Precision::None);
    }

    #[test]
    fn width_and_precision() {
        let spec = single_spec(b"%10.5s");
        assert_eq!(spec.width, Width::Fixed(10));
        assert_eq!(spec.precision, Precision::Fixed(5));
        assert_eq!(spec.conversion, b's');
    }

    #[test]
    fn bare_dot_is_precision_zero() {
        let spec = single_spec(b"%.d");
        assert_eq!(spec.precision, Precision::Fixed(0));
    }

    #[test]
    fn flag_overrides() {
        let spec = single_spec(b"%-+0 d");
        assert!(spec.flags.left_justify);
        assert!(spec.flags.force_sign);
        assert!(!spec.flags.space_sign); // overridden by '+'
        assert!(!spec.flags.zero_pad); // overridden by '-'
    }

    #[test]
    fn star_width_and_precision() {
        let spec = single_spec(b"%*.*x");
        assert_eq!(spec.width, Width::FromArg);
        assert_eq!(spec.precision, Precision::FromArg);
    }

    #[test]
    fn segments_interleave() {
        let segments = parse_format(b"hello %d world %s!").unwrap();
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], Segment::Literal(b"hello "));
        assert!(matches!(&segments[1], Segment::Spec(s) if s.conversion == b'd'));
        assert_eq!(segments[2], Segment::Literal(b" world "));
        assert!(matches!(&segments[3], Segment::Spec(s) if s.conversion == b's'));
        assert_eq!(segments[4], Segment::Literal(b"!"));
    }

    #[test]
    fn percent_escape() {
        let segments = parse_format(b"100%%").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::Literal(b"100"));
        assert_eq!(segments[1], Segment::Percent);
    }

    #[test]
    fn trailing_percent_rejected() {
        assert_eq!(
            parse_format(b"oops%"),
            Err(FormatError::BadDirective { at: 4 })
        );
    }

    #[test]
    fn unknown_conversion_rejected() {
        assert_eq!(
            parse_format(b"ab%q"),
            Err(FormatError::BadDirective { at: 2 })
        );
    }

    #[test]
    fn truncated_directive_rejected() {
        assert_eq!(
            parse_format(b"%08"),
            Err(FormatError::BadDirective { at: 0 })
        );
    }

    #[test]
    fn length_modifiers_not_in_grammar() {
        // Tagged arguments carry their width; 'l' is just an unknown
        // conversion character here.
        assert_eq!(
            parse_format(b"%ld"),
            Err(FormatError::BadDirective { at: 0 })
        );
    }

    #[test]
    fn huge_width_saturates() {
        let spec = single_spec(b"%99999999999999999999999d");
        assert_eq!(spec.width, Width::Fixed(usize::MAX));
    }

    #[test]
    fn empty_format_is_empty() {
        assert!(parse_format(b"").unwrap().is_empty());
    }
}
