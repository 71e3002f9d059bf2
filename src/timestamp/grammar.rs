pub use self::pattern::tokens as parse;

pub type ParseError = ::peg::error::ParseError<::peg::str::LineCol>;

// [x] pattern := ( field | quoted | literal )*
// [x] field := letter+ where all letters are the same
// [x] quoted := "'" ( "''" | [^'] )+ "'"
// [x] quote := "''"
// [x] literal := [^a-zA-Z']+
// [ ] week-based fields (w, W, F, D, u, Y)

/// Single piece of a date pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Text emitted as is.
    Literal(String),
    /// Year with the number of pattern letters, `yy` means two digits.
    Year(usize),
    /// Month, numeric for 1-2 letters, short name for 3, full name for more.
    Month(usize),
    Day(usize),
    /// Hour in day, 0-23.
    Hour24(usize),
    /// Hour in am/pm, 1-12.
    Hour12(usize),
    Minute(usize),
    Second(usize),
    Millis(usize),
    /// Day name, short for up to 3 letters, full name for more.
    Weekday(usize),
    AmPm,
    /// RFC 822 offset, `+0800`.
    Rfc822Zone,
    /// ISO 8601 offset with 1-3 letters: `+08`, `+0800`, `+08:00`.
    IsoZone(usize),
    ZoneName,
}

peg::parser! {
    grammar pattern() for str {
        pub rule tokens() -> Vec<Token>
            = t:token()* { t }

        rule token() -> Token
            = quote() / quoted() / field() / literal()

        rule quote() -> Token
            = "''" { Token::Literal("'".to_owned()) }

        rule quoted() -> Token
            = "'" s:quoted_char()+ "'" { Token::Literal(s.into_iter().collect()) }

        rule quoted_char() -> char
            = "''" { '\'' }
            / c:[^ '\''] { c }

        rule field() -> Token
            = n:$("y"+) { Token::Year(n.len()) }
            / n:$("M"+) { Token::Month(n.len()) }
            / n:$("d"+) { Token::Day(n.len()) }
            / n:$("H"+) { Token::Hour24(n.len()) }
            / n:$("h"+) { Token::Hour12(n.len()) }
            / n:$("m"+) { Token::Minute(n.len()) }
            / n:$("s"+) { Token::Second(n.len()) }
            / n:$("S"+) { Token::Millis(n.len()) }
            / n:$("E"+) { Token::Weekday(n.len()) }
            / "a"+ { Token::AmPm }
            / "Z"+ { Token::Rfc822Zone }
            / n:$("X"+) {?
                if n.len() <= 3 {
                    Ok(Token::IsoZone(n.len()))
                } else {
                    Err("at most 3 \"X\" pattern letters")
                }
            }
            / "z"+ { Token::ZoneName }

        rule literal() -> Token
            = s:$((!['a'..='z' | 'A'..='Z' | '\''] [_])+) { Token::Literal(s.to_owned()) }
    }
}
