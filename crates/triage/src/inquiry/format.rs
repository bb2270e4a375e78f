//! Text format of the persisted open-inquiry list
//!
//! Each inquiry takes two lines: the thread id, then the subject.
//!
//! An older tool wrote four lines per inquiry with decimal thread ids:
//!
//! ```text
//! 1794632811234567890
//! Subject line
//! Y
//! Y
//! ```
//!
//! [`convert_legacy`] translates between the two.

use std::io::{self, Write};

use super::Registry;
use crate::error::FormatError;
use crate::models::OpenInquiry;

/// Direction of a legacy conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyDirection {
    /// Four-line decimal records to two-line hex records
    FromMbox,
    /// Two-line `0x`-prefixed hex records to four-line decimal records
    ToMbox,
}

/// Write the registry in the two-line format
pub fn write_open<W: Write>(registry: &Registry, mut out: W) -> io::Result<()> {
    for inquiry in registry.iter() {
        writeln!(out, "{}", inquiry.id)?;
        writeln!(out, "{}", inquiry.subject)?;
    }
    out.flush()
}

/// Parse the two-line format
pub fn read_open(text: &str) -> Result<Registry, FormatError> {
    let mut lines: Vec<&str> = text.lines().collect();
    // Trailing blank lines left by hand edits. A written list only ends in a
    // blank line when the last subject is empty.
    while lines.last() == Some(&"")
        && (lines.len() % 2 != 0 || (lines.len() > 2 && lines[lines.len() - 2].is_empty()))
    {
        lines.pop();
    }
    if lines.len() % 2 != 0 {
        return Err(FormatError::DanglingId { line: lines.len() });
    }

    Ok(lines
        .chunks_exact(2)
        .map(|pair| OpenInquiry::new(pair[0], pair[1]))
        .collect())
}

/// Re-encode a persisted list between the legacy and current formats
pub fn convert_legacy(text: &str, direction: LegacyDirection) -> Result<String, FormatError> {
    let lines: Vec<&str> = text.lines().collect();
    let record_len = match direction {
        LegacyDirection::FromMbox => 4,
        LegacyDirection::ToMbox => 2,
    };
    if lines.len() % record_len != 0 {
        return Err(FormatError::IncompleteRecord {
            line: lines.len() - lines.len() % record_len + 1,
            expected: record_len,
        });
    }

    let mut converted = String::new();
    for (record, chunk) in lines.chunks_exact(record_len).enumerate() {
        let line = record * record_len + 1;
        let id = chunk[0].trim();
        let subject = chunk[1].trim();

        match direction {
            LegacyDirection::FromMbox => {
                let value = id.parse::<u64>().map_err(|_| invalid_id(line, id))?;
                converted.push_str(&format!("{value:x}\n{subject}\n"));
            }
            LegacyDirection::ToMbox => {
                let digits = id.strip_prefix("0x").unwrap_or(id);
                let value = u64::from_str_radix(digits, 16).map_err(|_| invalid_id(line, id))?;
                converted.push_str(&format!("{value}\n{subject}\nY\nY\n"));
            }
        }
    }
    Ok(converted)
}

fn invalid_id(line: usize, value: &str) -> FormatError {
    FormatError::InvalidThreadId {
        line,
        value: value.to_string(),
    }
}
