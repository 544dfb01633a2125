//! I/O ports
//!
//! The input port is anything implementing [`BufRead`]; the output port is
//! anything implementing [`Write`].

use std::io::{self, BufRead, Write};
use crate::error::Fault;
use ws_spec::Word;

/// Character and line source consumed by READC and READI
pub trait InputPort {
    /// Next UTF-8 character, or `None` when exhausted
    fn next_char(&mut self) -> io::Result<Option<char>>;

    /// Next line without its terminator, or `None` when exhausted
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead + ?Sized> InputPort for R {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = read_byte(self)? else {
            return Ok(None);
        };

        let width = utf8_width(first)
            .ok_or_else(|| invalid_data(format!("invalid UTF-8 lead byte {:#04x}", first)))?;

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = read_byte(self)?
                .ok_or_else(|| invalid_data("truncated UTF-8 sequence".to_string()))?;
        }

        let text = std::str::from_utf8(&buf[..width]).map_err(|e| invalid_data(e.to_string()))?;
        Ok(text.chars().next())
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if BufRead::read_line(self, &mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

fn read_byte<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let byte = match reader.fill_buf()?.first() {
        Some(&byte) => byte,
        None => return Ok(None),
    };
    reader.consume(1);
    Ok(Some(byte))
}

fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Write `value` as the character with that code point
pub fn write_char(output: &mut dyn Write, value: Word) -> Result<(), Fault> {
    let c = u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .ok_or(Fault::InvalidCharacter { value })?;
    let mut buf = [0u8; 4];
    output.write_all(c.encode_utf8(&mut buf).as_bytes())?;
    Ok(())
}

/// Write `value` in decimal
pub fn write_int(output: &mut dyn Write, value: Word) -> Result<(), Fault> {
    write!(output, "{}", value)?;
    Ok(())
}
