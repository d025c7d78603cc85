//! Field splitting and value coercion helpers
//!
//! Splitting is a plain scan for separator characters: there is no quoting,
//! no escaping and empty fields are kept. The coercion helpers return `None`
//! when the text does not parse; the reader decides what a failure means.

use chrono::NaiveDateTime;
use chrono::format::{ParseResult, Parsed, StrftimeItems, parse_and_remainder};

/// Split a line on any of the separator characters, keeping empty fields
pub fn split_fields(line: &str, separators: &[char]) -> Vec<String> {
    line.split(|c: char| separators.contains(&c))
        .map(str::to_string)
        .collect()
}

/// Whether a line is empty or whitespace only
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parse a "true"/"false" literal, ignoring case and surrounding whitespace
pub fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim_matches(|c: char| c.is_whitespace() || c == '\0');

    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a signed integer
pub fn parse_i64(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parse a floating point number
pub fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Parse a date/time using a .NET-style custom format string
///
/// Fields missing from the format take their zero value: formats without
/// time fields yield midnight, formats without date fields yield the time on
/// 0001-01-01, and a format with an hour but no minute reads minute 0.
pub fn parse_date_time(value: &str, format: &str) -> Option<NaiveDateTime> {
    DateFormat::compile(format).parse(value)
}

/// One piece of a compiled date/time format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    /// chrono strftime text
    Pattern(String),
    /// Fraction of a second: exactly `digits` digits, or at most `digits`
    /// when `optional` (the `F` specifier)
    Fraction { digits: usize, optional: bool },
}

/// A .NET custom date/time format compiled for parsing
///
/// Supported specifiers: `y`, `M`, `d`, `H`, `h`, `m`, `s`, `f`/`F`, `t`,
/// `z`, `K`, quoted literals, `\` escapes and the single-specifier `%` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFormat {
    pub segments: Vec<FormatSegment>,
    has_year: bool,
    has_month: bool,
    has_day: bool,
    has_hour: bool,
    has_hour12: bool,
    has_meridiem: bool,
    has_minute: bool,
}

impl DateFormat {
    /// Compile a .NET custom format string
    pub fn compile(format: &str) -> Self {
        let chars: Vec<char> = format.chars().collect();
        let mut compiled = DateFormat::default();
        let mut pattern = String::with_capacity(format.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let run = chars[i..].iter().take_while(|&&next| next == c).count();

            match c {
                'y' => {
                    compiled.has_year = true;
                    pattern.push_str(if run <= 2 { "%y" } else { "%Y" });
                    i += run;
                }
                'M' => {
                    compiled.has_month = true;
                    pattern.push_str(match run {
                        1 | 2 => "%m",
                        3 => "%b",
                        _ => "%B",
                    });
                    i += run;
                }
                'd' => {
                    // ddd/dddd name the weekday, not the day of month
                    if run <= 2 {
                        compiled.has_day = true;
                    }
                    pattern.push_str(match run {
                        1 | 2 => "%d",
                        3 => "%a",
                        _ => "%A",
                    });
                    i += run;
                }
                'H' => {
                    compiled.has_hour = true;
                    pattern.push_str("%H");
                    i += run;
                }
                'h' => {
                    compiled.has_hour12 = true;
                    pattern.push_str("%I");
                    i += run;
                }
                'm' => {
                    compiled.has_minute = true;
                    pattern.push_str("%M");
                    i += run;
                }
                's' => {
                    pattern.push_str("%S");
                    i += run;
                }
                'f' | 'F' => {
                    if !pattern.is_empty() {
                        compiled
                            .segments
                            .push(FormatSegment::Pattern(std::mem::take(&mut pattern)));
                    }
                    compiled.segments.push(FormatSegment::Fraction {
                        digits: run.min(9),
                        optional: c == 'F',
                    });
                    i += run;
                }
                't' => {
                    compiled.has_meridiem = true;
                    pattern.push_str("%p");
                    i += run;
                }
                'z' => {
                    pattern.push_str(if run >= 3 { "%:z" } else { "%#z" });
                    i += run;
                }
                'K' => {
                    pattern.push_str("%:z");
                    i += run;
                }
                'g' => {
                    // Era designator; the invariant calendar has a single era
                    i += run;
                }
                '\'' | '"' => {
                    i += 1;
                    while i < chars.len() && chars[i] != c {
                        push_literal(&mut pattern, chars[i]);
                        i += 1;
                    }
                    i += 1;
                }
                '\\' => {
                    if let Some(&escaped) = chars.get(i + 1) {
                        push_literal(&mut pattern, escaped);
                    }
                    i += 2;
                }
                '%' => {
                    i += 1;
                }
                other => {
                    push_literal(&mut pattern, other);
                    i += 1;
                }
            }
        }

        if !pattern.is_empty() {
            compiled.segments.push(FormatSegment::Pattern(pattern));
        }

        compiled
    }

    /// Parse `value`, which must match the whole format
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let mut parsed = Parsed::new();
        let mut rest = value;

        for segment in &self.segments {
            rest = match segment {
                FormatSegment::Pattern(pattern) => {
                    parse_and_remainder(&mut parsed, rest, StrftimeItems::new(pattern)).ok()?
                }
                FormatSegment::Fraction { digits, optional } => {
                    let taken = rest
                        .bytes()
                        .take(*digits)
                        .take_while(u8::is_ascii_digit)
                        .count();
                    if taken < *digits && !optional {
                        return None;
                    }
                    if taken > 0 {
                        let fraction: u32 = rest[..taken].parse().ok()?;
                        let nanos = fraction * 10u32.pow(9 - taken as u32);
                        parsed.set_nanosecond(i64::from(nanos)).ok()?;
                    }
                    &rest[taken..]
                }
            };
        }

        if !rest.is_empty() {
            return None;
        }

        self.fill_missing_fields(&mut parsed).ok()?;
        let date = parsed.to_naive_date().ok()?;
        let time = parsed.to_naive_time().ok()?;
        Some(date.and_time(time))
    }

    /// Give fields the format does not mention their zero value
    fn fill_missing_fields(&self, parsed: &mut Parsed) -> ParseResult<()> {
        if !self.has_year {
            parsed.set_year(1)?;
        }
        if !self.has_month {
            parsed.set_month(1)?;
        }
        if !self.has_day {
            parsed.set_day(1)?;
        }
        if !self.has_hour && !self.has_hour12 {
            parsed.set_hour(0)?;
        }
        if self.has_hour12 && !self.has_meridiem {
            parsed.set_ampm(false)?;
        }
        if !self.has_minute {
            parsed.set_minute(0)?;
        }
        Ok(())
    }
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
