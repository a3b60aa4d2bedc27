// Copyright 2022 Redglyph
//
// Custom "picture" format dialect: up to three ';'-separated sections
// (positive, negative, zero) of literal text, digit placeholders, a decimal
// point and an exponent marker. The interpreter runs two passes over the
// chosen section: one to measure the placeholder counts that drive the digit
// buffer shaping, one to render.

use crate::digits::DigitBuffer;
use crate::standard::push_integer;
use crate::FormatError;

/// Characters that keep their escaped meaning after a backslash; any other
/// escape silently drops the backslash.
const ESCAPABLE: &[u8] = b"\\#0.,%;";

/// One lexical element of a section.
enum Token<'a> {
    /// quoted run, delimiters dropped
    Literal(&'a str),
    /// single character copied verbatim
    Char(char),
    /// digit placeholder: '0' is mandatory, '#' optional
    Digit { mandatory: bool },
    /// integer/decimal boundary
    Point,
    /// exponent marker with its own sign and width directives
    Exponent { marker: char, plus_sign: bool, width: u32 },
}

struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    seen_point: bool,
    seen_exponent: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Tokenizer { text, pos: 0, seen_point: false, seen_exponent: false }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.text[self.pos..].chars();
            let c = chars.next()?;
            self.pos += c.len_utf8();
            match c {
                '\'' | '"' => {
                    let rest = &self.text[self.pos..];
                    return match rest.find(c) {
                        Some(end) => {
                            let literal = &rest[..end];
                            self.pos += end + c.len_utf8();
                            Some(Ok(Token::Literal(literal)))
                        }
                        None => Some(Err(FormatError::UnterminatedLiteral)),
                    };
                }
                '\\' => match chars.next() {
                    Some(next) if next.is_ascii() && ESCAPABLE.contains(&(next as u8)) => {
                        self.pos += next.len_utf8();
                        return Some(Ok(Token::Char(next)));
                    }
                    // not escapable: drop the backslash, rescan the character
                    _ => continue,
                },
                '.' => {
                    if self.seen_point {
                        // only the first '.' marks the boundary
                        continue;
                    }
                    self.seen_point = true;
                    return Some(Ok(Token::Point));
                }
                '0' => return Some(Ok(Token::Digit { mandatory: true })),
                '#' => return Some(Ok(Token::Digit { mandatory: false })),
                'e' | 'E' if !self.seen_exponent => {
                    let tail = &self.text[self.pos..];
                    if let Some((plus_sign, width, consumed)) = exponent_marker(tail) {
                        self.pos += consumed;
                        self.seen_exponent = true;
                        return Some(Ok(Token::Exponent { marker: c, plus_sign, width }));
                    }
                    return Some(Ok(Token::Char(c)));
                }
                _ => return Some(Ok(Token::Char(c))),
            }
        }
    }
}

/// Recognizes the tail of an exponent marker after its 'e'/'E': an optional
/// sign then a non-empty '0' run. Returns the sign directive, the zero-run
/// width and the number of bytes consumed.
fn exponent_marker(tail: &str) -> Option<(bool, u32, usize)> {
    let bytes = tail.as_bytes();
    let (plus_sign, start) = match bytes.first() {
        Some(b'+') => (true, 1),
        Some(b'-') => (false, 1),
        _ => (false, 0),
    };
    let zeros = bytes[start..].iter().take_while(|&&b| b == b'0').count();
    if zeros == 0 {
        None
    } else {
        Some((plus_sign, zeros as u32, start + zeros))
    }
}

/// Splits the specification into its up-to-three sections, honoring quoted
/// runs and escapes; a fourth section and beyond are ignored.
fn split_sections(spec: &str) -> Result<[Option<&str>; 3], FormatError> {
    let bytes = spec.as_bytes();
    let mut sections = [None; 3];
    let mut index = 0;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() && index < 3 {
        match bytes[i] {
            quote @ (b'\'' | b'"') => {
                let mut j = i + 1;
                while j < bytes.len() && bytes[j] != quote {
                    j += 1;
                }
                if j == bytes.len() {
                    return Err(FormatError::UnterminatedLiteral);
                }
                i = j + 1;
            }
            // same allow-list as the tokenizer: a non-escapable byte keeps
            // its own meaning, so a quote after a dropped backslash still
            // opens a literal run
            b'\\' if i + 1 < bytes.len() && ESCAPABLE.contains(&bytes[i + 1]) => i += 2,
            b'\\' => i += 1,
            b';' => {
                sections[index] = Some(&spec[start..i]);
                index += 1;
                start = i + 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    if index < 3 {
        sections[index] = Some(&spec[start..]);
    }
    Ok(sections)
}

/// Placeholder counts of a section, measured ahead of shaping.
struct Layout {
    integer_digits: u32,
    decimal_digits: u32,
    exponential: bool,
}

fn measure(section: &str) -> Result<Layout, FormatError> {
    let mut layout = Layout { integer_digits: 0, decimal_digits: 0, exponential: false };
    let mut decimal = false;
    for token in Tokenizer::new(section) {
        match token? {
            Token::Digit { .. } => {
                if decimal {
                    layout.decimal_digits += 1;
                } else {
                    layout.integer_digits += 1;
                }
            }
            Token::Point => decimal = true,
            Token::Exponent { .. } => layout.exponential = true,
            _ => {}
        }
    }
    Ok(layout)
}

/// Formats the buffer's value under a custom specification.
///
/// Pass 1 selects the section (negative values skip to section 2 when it is
/// present and non-empty, which also suppresses the forced sign) and measures
/// its placeholder counts; the buffer is shaped from those. A result shaped
/// to zero switches to section 3 when present, reshaping the buffer with that
/// section's own counts. Pass 2 renders the section text around the digits.
pub(crate) fn format(buf: &mut DigitBuffer, spec: &str, out: &mut String) -> Result<(), FormatError> {
    let sections = split_sections(spec)?;
    let mut section = sections[0].unwrap_or("");
    let mut forced_sign = false;
    if buf.is_negative() {
        match sections[1] {
            Some(negative) if !negative.is_empty() => section = negative,
            _ => forced_sign = true,
        }
    }
    let mut layout = measure(section)?;
    buf.format_custom_number(layout.integer_digits, layout.decimal_digits, layout.exponential);
    if buf.is_zero() {
        forced_sign = false;
        if let Some(zero) = sections[2].filter(|s| !s.is_empty()) {
            section = zero;
            layout = measure(zero)?;
            buf.reset();
            buf.format_custom_number(layout.integer_digits, layout.decimal_digits, layout.exponential);
        }
    }
    render(buf, section, &layout, forced_sign, out)
}

/// Renders the chosen section: literal text verbatim, digit placeholders
/// consuming the buffer's integer and decimal digits through two independent
/// cursors, the exponent token rendering the exponent with its own sign and
/// width directives.
fn render(
    buf: &DigitBuffer,
    section: &str,
    layout: &Layout,
    forced_sign: bool,
    out: &mut String,
) -> Result<(), FormatError> {
    if forced_sign {
        out.push('-');
    }
    let integer_total = buf.integer_digit_count();
    let decimal_total = buf.decimal_digit_count();
    let mut integer_next = 0;
    let mut placeholders_left = layout.integer_digits as usize;
    let mut printed_integer = false;
    let mut decimal_next = 0;
    let mut point_pending = false;
    let mut pending_zeros = 0;
    let mut in_decimals = false;
    for token in Tokenizer::new(section) {
        match token? {
            Token::Literal(text) => out.push_str(text),
            Token::Char(c) => out.push(c),
            Token::Point => {
                // remaining integer digits flush at the boundary, so a
                // placeholder-poor integer part never drops real digits
                while integer_next < integer_total {
                    let digit = buf.integer_digit(integer_next);
                    integer_next += 1;
                    if digit == b'0' && !printed_integer {
                        continue;
                    }
                    out.push(digit as char);
                    printed_integer = true;
                }
                in_decimals = true;
                point_pending = true;
            }
            Token::Digit { mandatory } if !in_decimals => {
                placeholders_left -= 1;
                // flush enough digits to leave one per remaining placeholder;
                // a leading zero only prints once a digit was printed or the
                // placeholder is mandatory
                let flush = integer_total
                    .saturating_sub(integer_next)
                    .saturating_sub(placeholders_left);
                for _ in 0..flush {
                    let digit = buf.integer_digit(integer_next);
                    integer_next += 1;
                    if digit == b'0' && !printed_integer && !mandatory {
                        continue;
                    }
                    out.push(digit as char);
                    printed_integer = true;
                }
            }
            Token::Digit { mandatory } => {
                let digit = if decimal_next < decimal_total {
                    let d = buf.decimal_digit(decimal_next);
                    decimal_next += 1;
                    Some(d)
                } else if mandatory {
                    Some(b'0')
                } else {
                    None
                };
                match digit {
                    // an optional zero stays pending until a digit that must
                    // print is reached, and the point travels with it
                    Some(b'0') if !mandatory => pending_zeros += 1,
                    Some(d) => {
                        if point_pending {
                            out.push('.');
                            point_pending = false;
                        }
                        for _ in 0..pending_zeros {
                            out.push('0');
                        }
                        pending_zeros = 0;
                        out.push(d as char);
                    }
                    None => {}
                }
            }
            Token::Exponent { marker, plus_sign, width } => {
                out.push(marker);
                let exponent = buf.exponent();
                if exponent < 0 {
                    out.push('-');
                } else if plus_sign {
                    out.push('+');
                }
                push_integer(out, exponent.unsigned_abs(), width);
            }
        }
    }
    Ok(())
}
