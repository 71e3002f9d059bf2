//! Traits and type definitions for JSON marshalling.
//!
//! The most important part of this module is the `Encoder` trait, implemented for every byte
//! writer, that emits JSON scalars. Compound values are written through `ObjectEncoder` and
//! `ArrayEncoder`, which take care of punctuation and always produce a single line.
//!
//! String escaping is Logstash-compatible: `"` and `\` are escaped, control characters use their
//! short escapes where JSON has one and `\u00XX` otherwise, everything else, including `/` and
//! non-ASCII characters, passes through as UTF-8.

use std::io::Write;

pub type Error = ::std::io::Error;

pub trait Encode {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error>;
}

pub trait Encoder {
    fn encode_bool(&mut self, value: bool) -> Result<(), Error>;
    fn encode_i64(&mut self, value: i64) -> Result<(), Error>;
    fn encode_u64(&mut self, value: u64) -> Result<(), Error>;
    fn encode_str(&mut self, value: &str) -> Result<(), Error>;
}

impl Encode for bool {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error> {
        encoder.encode_bool(*self)
    }
}

impl Encode for i64 {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error> {
        encoder.encode_i64(*self)
    }
}

impl Encode for u64 {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error> {
        encoder.encode_u64(*self)
    }
}

impl Encode for u32 {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error> {
        encoder.encode_u64(*self as u64)
    }
}

impl Encode for str {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error> {
        encoder.encode_str(self)
    }
}

impl Encode for String {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error> {
        encoder.encode_str(&self[..])
    }
}

impl<'a, T: Encode + ?Sized> Encode for &'a T {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> Result<(), Error> {
        (**self).encode(encoder)
    }
}

impl<W: Write + ?Sized> Encoder for W {
    fn encode_bool(&mut self, value: bool) -> Result<(), Error> {
        self.write_all(if value { b"true" } else { b"false" })
    }

    fn encode_i64(&mut self, value: i64) -> Result<(), Error> {
        write!(self, "{}", value)
    }

    fn encode_u64(&mut self, value: u64) -> Result<(), Error> {
        write!(self, "{}", value)
    }

    fn encode_str(&mut self, value: &str) -> Result<(), Error> {
        escape_str(self, value)
    }
}

fn escape_str<W: Write + ?Sized>(wr: &mut W, value: &str) -> Result<(), Error> {
    let bytes = value.as_bytes();

    wr.write_all(b"\"")?;

    let mut start = 0;
    for (pos, &byte) in bytes.iter().enumerate() {
        let escape: &[u8] = match byte {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x08 => b"\\b",
            0x0c => b"\\f",
            0x00..=0x1f => {
                wr.write_all(&bytes[start..pos])?;
                write!(wr, "\\u{:04x}", byte)?;
                start = pos + 1;
                continue;
            }
            _ => continue,
        };

        wr.write_all(&bytes[start..pos])?;
        wr.write_all(escape)?;
        start = pos + 1;
    }

    wr.write_all(&bytes[start..])?;
    wr.write_all(b"\"")
}

/// Writes a JSON object member by member.
///
/// The opening brace is written on construction, the closing one by `finish`.
pub struct ObjectEncoder<'a, W: Write + ?Sized + 'a> {
    wr: &'a mut W,
    empty: bool,
}

impl<'a, W: Write + ?Sized> ObjectEncoder<'a, W> {
    pub fn new(wr: &'a mut W) -> Result<ObjectEncoder<'a, W>, Error> {
        wr.write_all(b"{")?;

        let res = ObjectEncoder {
            wr: wr,
            empty: true,
        };

        Ok(res)
    }

    fn key(&mut self, name: &str) -> Result<(), Error> {
        if !self.empty {
            self.wr.write_all(b",")?;
        }
        self.empty = false;

        self.wr.encode_str(name)?;
        self.wr.write_all(b":")
    }

    pub fn field<T: Encode + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), Error> {
        self.key(name)?;
        value.encode(&mut *self.wr)
    }

    /// Starts a nested object under the given name.
    pub fn object(&mut self, name: &str) -> Result<ObjectEncoder<W>, Error> {
        self.key(name)?;
        ObjectEncoder::new(&mut *self.wr)
    }

    /// Starts a nested array under the given name.
    pub fn array(&mut self, name: &str) -> Result<ArrayEncoder<W>, Error> {
        self.key(name)?;
        ArrayEncoder::new(&mut *self.wr)
    }

    pub fn finish(self) -> Result<(), Error> {
        self.wr.write_all(b"}")
    }
}

pub struct ArrayEncoder<'a, W: Write + ?Sized + 'a> {
    wr: &'a mut W,
    empty: bool,
}

impl<'a, W: Write + ?Sized> ArrayEncoder<'a, W> {
    pub fn new(wr: &'a mut W) -> Result<ArrayEncoder<'a, W>, Error> {
        wr.write_all(b"[")?;

        let res = ArrayEncoder {
            wr: wr,
            empty: true,
        };

        Ok(res)
    }

    pub fn element<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        if !self.empty {
            self.wr.write_all(b",")?;
        }
        self.empty = false;

        value.encode(&mut *self.wr)
    }

    pub fn finish(self) -> Result<(), Error> {
        self.wr.write_all(b"]")
    }
}

#[cfg(test)]
mod tests {
    use std::str::from_utf8;

    use super::*;

    fn encode<T: Encode + ?Sized>(value: &T) -> String {
        let mut wr = Vec::new();
        value.encode(&mut wr).unwrap();
        String::from_utf8(wr).unwrap()
    }

    #[test]
    fn encode_true() {
        let mut wr = Vec::new();

        wr.encode_bool(true).unwrap();

        assert_eq!("true".as_bytes(), &wr[..]);
    }

    #[test]
    fn encode_numbers() {
        assert_eq!("-42", encode(&-42i64));
        assert_eq!("1000000", encode(&1000000u64));
        assert_eq!("42", encode(&42u32));
    }

    #[test]
    fn escape_specials() {
        assert_eq!(r#""H\"e\\l/\nl\ro\u0000W\bo\tr\fl\u0001d""#,
            encode("H\"e\\l/\nl\ro\u{0}W\u{8}o\tr\u{c}l\u{1}d"));
    }

    #[test]
    fn escape_controls_lowercase_hex() {
        assert_eq!(r#""\u001f\u000b""#, encode("\u{1f}\u{b}"));
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!("\"привет ☃ \u{7f}\"", encode("привет ☃ \u{7f}"));
    }

    #[test]
    fn object_with_nested_values() {
        let mut wr = Vec::new();
        {
            let mut object = ObjectEncoder::new(&mut wr).unwrap();
            object.field("a", "b").unwrap();
            {
                let mut nested = object.object("n").unwrap();
                nested.field("line", &42u32).unwrap();
                nested.finish().unwrap();
            }
            {
                let mut array = object.array("tags").unwrap();
                array.element("x").unwrap();
                array.element("y").unwrap();
                array.finish().unwrap();
            }
            object.field("ok", &true).unwrap();
            object.finish().unwrap();
        }

        assert_eq!(r#"{"a":"b","n":{"line":42},"tags":["x","y"],"ok":true}"#,
            from_utf8(&wr[..]).unwrap());
    }

    #[test]
    fn empty_compounds() {
        let mut wr = Vec::new();
        {
            let mut object = ObjectEncoder::new(&mut wr).unwrap();
            object.array("a").unwrap().finish().unwrap();
            object.finish().unwrap();
        }

        assert_eq!("{\"a\":[]}", from_utf8(&wr[..]).unwrap());
    }

    #[test]
    fn fail_small_buffer() {
        let mut buf = [0u8; 4];

        assert!((&mut buf[..]).encode_str("too long").is_err());
    }
}
