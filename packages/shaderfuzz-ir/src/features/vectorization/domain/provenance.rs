//! Merge provenance decoding
//!
//! A merged vector's name records what was packed into it:
//!
//! ```text
//! <prefix><N>(_<offset>_<width>_<name length>){N}<name>{N}
//! GLF_merged2_0_1_1_1_1_1bc      b at .x, c at .y
//! ```
//!
//! Decoding fails closed: a name that deviates anywhere from the grammar is
//! not a merged vector.

use thiserror::Error;

use crate::config::validation::is_identifier;
use crate::shared::constants::merging::{FIELD_SEPARATOR, MAX_VECTOR_WIDTH};
use crate::shared::models::{ScalarKind, Type};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvenanceError {
    #[error("'{0}' does not start with the merged prefix")]
    MissingPrefix(String),

    #[error("malformed field {field} in '{name}'")]
    MalformedField { name: String, field: usize },

    #[error("constituent {index} of '{name}' covers {offset}..{end}, outside 0..{max}")]
    OutOfRange {
        name: String,
        index: usize,
        offset: u8,
        end: u16,
        max: u8,
    },

    #[error("constituents of '{0}' overlap")]
    Overlap(String),

    #[error("constituent names of '{name}' do not add up: {detail}")]
    BadNames { name: String, detail: String },
}

/// One original variable packed into a merged vector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constituent {
    pub name: String,
    /// First component it occupies
    pub offset: u8,
    /// Number of components it occupies
    pub width: u8,
}

impl Constituent {
    /// Type the constituent had before merging, given the merged vector's element kind
    pub fn ty(&self, elem: ScalarKind) -> Type {
        Type::vector(elem, self.width)
    }

    /// One past the last component
    pub fn end(&self) -> u8 {
        self.offset + self.width
    }
}

/// Decoded constituents of one merged vector name, in encoding order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeProvenance {
    pub constituents: Vec<Constituent>,
}

impl MergeProvenance {
    /// Decode `name`, expecting merged names to start with `prefix`
    pub fn decode(name: &str, prefix: &str) -> Result<Self, ProvenanceError> {
        let rest = name
            .strip_prefix(prefix)
            .ok_or_else(|| ProvenanceError::MissingPrefix(name.to_string()))?;
        let malformed = |field| ProvenanceError::MalformedField {
            name: name.to_string(),
            field,
        };

        let mut cursor = Fields::new(rest);
        let count = cursor.number().ok_or_else(|| malformed(0))?;
        if count == 0 || count > usize::from(MAX_VECTOR_WIDTH) {
            return Err(malformed(0));
        }

        let mut layout = Vec::with_capacity(count);
        for index in 0..count {
            let mut field = |slot: usize| {
                cursor
                    .separated_number()
                    .ok_or_else(|| malformed(1 + index * 3 + slot))
            };
            let offset = field(0)?;
            let width = field(1)?;
            let length = field(2)?;
            if width == 0 || length == 0 {
                return Err(malformed(1 + index * 3));
            }
            let end = offset.saturating_add(width);
            if end > usize::from(MAX_VECTOR_WIDTH) {
                return Err(ProvenanceError::OutOfRange {
                    name: name.to_string(),
                    index,
                    offset: offset.min(usize::from(u8::MAX)) as u8,
                    end: end.min(usize::from(u16::MAX)) as u16,
                    max: MAX_VECTOR_WIDTH,
                });
            }
            layout.push((offset as u8, width as u8, length));
        }

        let mut names = cursor.remainder();
        let mut constituents = Vec::with_capacity(count);
        for (offset, width, length) in layout {
            if names.len() < length || !names.is_char_boundary(length) {
                return Err(ProvenanceError::BadNames {
                    name: name.to_string(),
                    detail: format!("{} characters left, {} needed", names.len(), length),
                });
            }
            let (head, tail) = names.split_at(length);
            if !is_identifier(head) {
                return Err(ProvenanceError::BadNames {
                    name: name.to_string(),
                    detail: format!("'{head}' is not an identifier"),
                });
            }
            constituents.push(Constituent {
                name: head.to_string(),
                offset,
                width,
            });
            names = tail;
        }
        if !names.is_empty() {
            return Err(ProvenanceError::BadNames {
                name: name.to_string(),
                detail: format!("trailing '{names}'"),
            });
        }

        let mut occupied = 0u8;
        for constituent in &constituents {
            let mask = ((1u16 << constituent.width) - 1) << constituent.offset;
            let mask = mask as u8;
            if occupied & mask != 0 {
                return Err(ProvenanceError::Overlap(name.to_string()));
            }
            occupied |= mask;
        }

        Ok(Self { constituents })
    }

    /// Highest component any constituent occupies, plus one
    pub fn span(&self) -> u8 {
        self.constituents.iter().map(Constituent::end).max().unwrap_or(0)
    }

    /// Encode back into a name; decoding is the inverse
    pub fn encode(&self, prefix: &str) -> String {
        let mut name = format!("{prefix}{}", self.constituents.len());
        for constituent in &self.constituents {
            name.push_str(&format!(
                "{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
                constituent.offset,
                constituent.width,
                constituent.name.len()
            ));
        }
        for constituent in &self.constituents {
            name.push_str(&constituent.name);
        }
        name
    }
}

/// Cursor over the numeric fields of an encoded name
struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Fields<'a> {
    fn new(rest: &'a str) -> Self {
        Self { rest }
    }

    /// Decimal number without leading zeros (a lone `0` is fine)
    fn number(&mut self) -> Option<usize> {
        let digits = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        let text = &self.rest[..digits];
        if text.is_empty() || (text.len() > 1 && text.starts_with('0')) {
            return None;
        }
        let value = text.parse().ok()?;
        self.rest = &self.rest[digits..];
        Some(value)
    }

    fn separated_number(&mut self) -> Option<usize> {
        self.rest = self.rest.strip_prefix(FIELD_SEPARATOR)?;
        self.number()
    }

    fn remainder(self) -> &'a str {
        self.rest
    }
}
