//! Event timestamp formatting.
//!
//! Patterns follow the `SimpleDateFormat` letter conventions that log shippers are used to, for
//! example the default `yyyy-MM-dd'T'HH:mm:ss.SSSZZ` renders as `2024-01-02T03:04:05.678+0000`.
//! A pattern is parsed once into tokens, after which formatting shares no mutable state and can
//! be called from any number of threads.

use std::fmt::{self, Write};
use std::slice;
use std::str::FromStr;

use chrono::format::{DelayedFormat, Fixed, Item, Numeric, Pad};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

mod grammar;

pub use self::grammar::ParseError;

use self::grammar::{parse, Token};

/// Default timestamp pattern.
pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ss.SSSZZ";

/// Time zone timestamps are rendered in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Timezone {
    Utc,
    Local,
}

impl Default for Timezone {
    fn default() -> Timezone {
        Timezone::Local
    }
}

impl FromStr for Timezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Timezone, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" | "gmt" => Ok(Timezone::Utc),
            "local" => Ok(Timezone::Local),
            _ => Err(format!("unknown timezone \"{}\", expected \"utc\" or \"local\"", s)),
        }
    }
}

/// Single compiled pattern element.
#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Literal(String),
    Item(Item<'static>),
    /// Rendered by chrono, then zero-padded to the given width.
    Padded(Item<'static>, usize),
    Millis(usize),
    /// ISO 8601 offset, `Z` for UTC.
    IsoZone(usize),
    /// `UTC` or `GMT+hh:mm`.
    ZoneName,
}

impl From<Token> for Piece {
    fn from(token: Token) -> Piece {
        match token {
            Token::Literal(text) => Piece::Literal(text),
            Token::Year(1) => Piece::Item(Item::Numeric(Numeric::Year, Pad::None)),
            Token::Year(2) => Piece::Item(Item::Numeric(Numeric::YearMod100, Pad::Zero)),
            Token::Year(n) => Piece::Padded(Item::Numeric(Numeric::Year, Pad::None), n),
            Token::Month(n) if n >= 4 => Piece::Item(Item::Fixed(Fixed::LongMonthName)),
            Token::Month(3) => Piece::Item(Item::Fixed(Fixed::ShortMonthName)),
            Token::Month(n) => numeric(Numeric::Month, n),
            Token::Day(n) => numeric(Numeric::Day, n),
            Token::Hour24(n) => numeric(Numeric::Hour, n),
            Token::Hour12(n) => numeric(Numeric::Hour12, n),
            Token::Minute(n) => numeric(Numeric::Minute, n),
            Token::Second(n) => numeric(Numeric::Second, n),
            Token::Millis(n) => Piece::Millis(n),
            Token::Weekday(n) if n >= 4 => Piece::Item(Item::Fixed(Fixed::LongWeekdayName)),
            Token::Weekday(..) => Piece::Item(Item::Fixed(Fixed::ShortWeekdayName)),
            Token::AmPm => Piece::Item(Item::Fixed(Fixed::UpperAmPm)),
            Token::Rfc822Zone => Piece::Item(Item::Fixed(Fixed::TimezoneOffset)),
            Token::IsoZone(n) => Piece::IsoZone(n),
            Token::ZoneName => Piece::ZoneName,
        }
    }
}

fn numeric(numeric: Numeric, width: usize) -> Piece {
    match width {
        1 => Piece::Item(Item::Numeric(numeric, Pad::None)),
        2 => Piece::Item(Item::Numeric(numeric, Pad::Zero)),
        width => Piece::Padded(Item::Numeric(numeric, Pad::None), width),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimestampFormat {
    pieces: Vec<Piece>,
    timezone: Timezone,
}

impl TimestampFormat {
    pub fn new(pattern: &str, timezone: Timezone) -> Result<TimestampFormat, ParseError> {
        let format = TimestampFormat {
            pieces: parse(pattern)?.into_iter().map(From::from).collect(),
            timezone: timezone,
        };

        Ok(format)
    }

    /// Formats the given milliseconds since the epoch.
    ///
    /// Values out of the supported calendar range are clamped to the epoch.
    pub fn format(&self, millis: i64) -> String {
        let datetime = Utc.timestamp_millis_opt(millis).single().unwrap_or_default();

        let datetime: DateTime<FixedOffset> = match self.timezone {
            Timezone::Utc => datetime.into(),
            Timezone::Local => datetime.with_timezone(&Local).into(),
        };

        let mut buf = String::with_capacity(32);
        for piece in &self.pieces {
            // Writing into a `String` never fails.
            let _ = render(&mut buf, piece, &datetime);
        }

        buf
    }
}

impl Default for TimestampFormat {
    fn default() -> TimestampFormat {
        TimestampFormat {
            pieces: parse(DEFAULT_PATTERN)
                .unwrap_or_default()
                .into_iter()
                .map(From::from)
                .collect(),
            timezone: Timezone::default(),
        }
    }
}

fn render(buf: &mut String, piece: &Piece, datetime: &DateTime<FixedOffset>) -> fmt::Result {
    match *piece {
        Piece::Literal(ref text) => buf.push_str(text),
        Piece::Item(ref item) => write!(buf, "{}", delayed(datetime, item))?,
        Piece::Padded(ref item, width) => {
            let value = delayed(datetime, item).to_string();
            write!(buf, "{:0>width$}", value, width = width)?
        }
        Piece::Millis(width) => {
            write!(buf, "{:0width$}", datetime.timestamp_subsec_millis() % 1000, width = width)?
        }
        Piece::IsoZone(..) if is_utc(datetime) => buf.push('Z'),
        Piece::IsoZone(1) => {
            // Hours only, `+08`.
            let offset = delayed(datetime, &Item::Fixed(Fixed::TimezoneOffset)).to_string();
            buf.push_str(&offset[..3]);
        }
        Piece::IsoZone(2) => write!(buf, "{}", delayed(datetime, &Item::Fixed(Fixed::TimezoneOffset)))?,
        Piece::IsoZone(..) => {
            write!(buf, "{}", delayed(datetime, &Item::Fixed(Fixed::TimezoneOffsetColon)))?
        }
        Piece::ZoneName if is_utc(datetime) => buf.push_str("UTC"),
        Piece::ZoneName => {
            write!(buf, "GMT{}", delayed(datetime, &Item::Fixed(Fixed::TimezoneOffsetColon)))?
        }
    }

    Ok(())
}

fn delayed<'a>(datetime: &DateTime<FixedOffset>, item: &'a Item<'static>) ->
    DelayedFormat<slice::Iter<'a, Item<'static>>>
{
    datetime.format_with_items(slice::from_ref(item).iter())
}

fn is_utc(datetime: &DateTime<FixedOffset>) -> bool {
    datetime.offset().local_minus_utc() == 0
}
