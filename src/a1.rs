// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! A1 notation codec.
//!
//! Google Sheets addresses cells with bijective base-26 column letters followed
//! by a 1-based row number (`"C7"`, `"AA12"`), optionally prefixed with a sheet
//! name and extended to a rectangle (`"Sheet1!A1:C10"`).
//!
//! There is no zero digit in the column alphabet: `1 -> "A"`, `26 -> "Z"`,
//! `27 -> "AA"`, `702 -> "ZZ"`, `703 -> "AAA"`.
//!
//! # Examples
//!
//! ```rust
//! use gapi_sheets::a1::{decode_cell, encode_cell, RangeRef};
//!
//! assert_eq!(encode_cell(3, 7).unwrap(), "C7");
//!
//! let cell = decode_cell("AA12").unwrap();
//! assert_eq!((cell.column, cell.row), (27, 12));
//!
//! let range: RangeRef = "Sheet1!A1:C10".parse().unwrap();
//! assert_eq!(range.sheet_name.as_deref(), Some("Sheet1"));
//! assert_eq!(range.to_string(), "Sheet1!A1:C10");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::AddressError;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const RADIX: u32 = 26;

static CELL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("cell pattern is valid"));

/// Encodes a 1-based column index as letters.
pub fn encode_column(column: u32) -> Result<String, AddressError> {
    if column == 0 {
        return Err(AddressError::invalid("column index must be >= 1"));
    }

    let mut remaining = column;
    let mut letters = Vec::new();
    while remaining > 0 {
        let remainder = (remaining - 1) % RADIX;
        letters.push(LETTERS[remainder as usize]);
        remaining = (remaining - 1) / RADIX;
    }
    letters.reverse();

    // Only ASCII uppercase letters were pushed
    Ok(letters.into_iter().map(char::from).collect())
}

/// Encodes a 1-based `(column, row)` pair as an A1 cell reference.
pub fn encode_cell(column: u32, row: u32) -> Result<String, AddressError> {
    if row == 0 {
        return Err(AddressError::invalid("row index must be >= 1"));
    }
    Ok(format!("{}{row}", encode_column(column)?))
}

/// Decodes column letters into a 1-based column index.
///
/// Lowercase letters are accepted.
pub fn decode_column(letters: &str) -> Result<u32, AddressError> {
    if letters.is_empty() {
        return Err(AddressError::malformed(letters, "empty column letters"));
    }

    letters.chars().try_fold(0u32, |acc, letter| {
        if !letter.is_ascii_alphabetic() {
            return Err(AddressError::malformed(
                letters,
                format!("'{letter}' is not a column letter"),
            ));
        }
        let digit = u32::from(letter.to_ascii_uppercase() as u8 - b'A') + 1;
        acc.checked_mul(RADIX)
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or_else(|| AddressError::invalid(format!("column '{letters}' is too large")))
    })
}

/// Decodes a single cell reference such as `"C7"`.
pub fn decode_cell(reference: &str) -> Result<CellAddress, AddressError> {
    let captures = CELL_PATTERN
        .captures(reference)
        .ok_or_else(|| AddressError::malformed(reference, "expected letters followed by digits"))?;

    let column = decode_column(&captures[1])?;
    let row: u32 = captures[2]
        .parse()
        .map_err(|_| AddressError::invalid(format!("row in '{reference}' is too large")))?;

    CellAddress::new(column, row)
}

/// A single cell, 1-based in both dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub column: u32,
    pub row: u32,
}

impl CellAddress {
    /// Creates an address, rejecting zero indices.
    pub fn new(column: u32, row: u32) -> Result<Self, AddressError> {
        if column == 0 {
            return Err(AddressError::invalid("column index must be >= 1"));
        }
        if row == 0 {
            return Err(AddressError::invalid("row index must be >= 1"));
        }
        Ok(Self { column, row })
    }

    /// Column letters of this address.
    pub fn column_letters(&self) -> String {
        // column is non-zero by construction
        encode_column(self.column).unwrap_or_default()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letters(), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_cell(s)
    }
}

impl TryFrom<(u32, u32)> for CellAddress {
    type Error = AddressError;

    fn try_from((column, row): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(column, row)
    }
}

/// A cell or rectangle, optionally scoped to a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeRef {
    pub sheet_name: Option<String>,
    pub start: CellAddress,
    pub end: Option<CellAddress>,
}

impl RangeRef {
    /// A single-cell range.
    pub fn cell(start: CellAddress) -> Self {
        Self {
            sheet_name: None,
            start,
            end: None,
        }
    }

    /// A rectangular range from `start` to `end` inclusive.
    pub fn span(start: CellAddress, end: CellAddress) -> Self {
        Self {
            sheet_name: None,
            start,
            end: Some(end),
        }
    }

    /// Scopes this range to a sheet.
    pub fn on_sheet(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    /// Parses `[sheet!]A1[:B2]`.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let (sheet_name, cells) = match input.rsplit_once('!') {
            Some((sheet, cells)) => (Some(unquote_sheet_name(input, sheet)?), cells),
            None => (None, input),
        };

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (decode_cell(start)?, Some(decode_cell(end)?)),
            None => (decode_cell(cells)?, None),
        };

        Ok(Self {
            sheet_name,
            start,
            end,
        })
    }

    /// Number of columns and rows covered by this range.
    pub fn dimensions(&self) -> (u32, u32) {
        match self.end {
            Some(end) => (
                end.column.abs_diff(self.start.column) + 1,
                end.row.abs_diff(self.start.row) + 1,
            ),
            None => (1, 1),
        }
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet_name {
            write!(f, "{}!", quote_sheet_name(sheet))?;
        }
        write!(f, "{}", self.start)?;
        if let Some(end) = &self.end {
            write!(f, ":{end}")?;
        }
        Ok(())
    }
}

impl FromStr for RangeRef {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Quotes a sheet name when Google's A1 grammar requires it.
pub fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// Splits `sheet!cells` into the unquoted sheet name and the cell part.
///
/// Unlike [`RangeRef::parse`] the cell part is not validated, so whole
/// columns (`A:C`) and open-ended ranges pass through.
pub fn split_sheet(range: &str) -> Result<(Option<String>, &str), AddressError> {
    match range.rsplit_once('!') {
        Some((sheet, cells)) => Ok((Some(unquote_sheet_name(range, sheet)?), cells)),
        None => Ok((None, range)),
    }
}

fn unquote_sheet_name(input: &str, sheet: &str) -> Result<String, AddressError> {
    if sheet.is_empty() {
        return Err(AddressError::malformed(input, "empty sheet name"));
    }
    match sheet
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        Some(inner) => Ok(inner.replace("''", "'")),
        None if sheet.starts_with('\'') || sheet.ends_with('\'') => {
            Err(AddressError::malformed(input, "unbalanced sheet name quotes"))
        }
        None => Ok(sheet.to_string()),
    }
}
