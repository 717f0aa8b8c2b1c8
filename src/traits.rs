//! Persistence trait for moving templates across storage or process
//! boundaries.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{
    error::Error, resource::LocalizedStringResource, types::LocalizationValue,
};

/// Reading and writing a value in its serialized (JSON) form.
///
/// # Example
///
/// ```rust,no_run
/// use locvalue::{LocalizationValue, traits::Parser};
/// let value = LocalizationValue::read_from("greeting.json")?;
/// value.write_to("greeting_copy.json")?;
/// Ok::<(), locvalue::Error>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl Parser for LocalizationValue {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        self.ensure_serializable()?;
        serde_json::to_writer(writer, self).map_err(Error::Parse)
    }
}

impl Parser for LocalizedStringResource {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        self.default_value.ensure_serializable()?;
        serde_json::to_writer(writer, self).map_err(Error::Parse)
    }
}
