use crate::types::StackSummary;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::{self, Write};

const INDENT: &[u8] = b"    ";

/// Result of a run: the expired stacks and the environments they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub expired: Vec<StackSummary>,
    pub environments: Vec<String>,
}

impl Report {
    pub fn new(expired: Vec<StackSummary>, environments: Vec<String>) -> Self {
        Self {
            expired,
            environments,
        }
    }

    /// Writes the expired stacks, then the environment list, as two
    /// independent JSON documents.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_pretty_json(writer, &self.expired)?;
        write_pretty_json(writer, &self.environments)
    }

    pub fn render(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Pretty-prints `value` with sorted object keys and four-space indentation,
/// followed by a newline.
pub fn write_pretty_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> io::Result<()> {
    // round-trip through Value so object keys come out sorted
    let value = serde_json::to_value(value)?;
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    writer.write_all(b"\n")
}
