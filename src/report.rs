use std::io::{self, Write};

use crate::data::model::Record;
use crate::fnutil::{get_field, LookupError};

// ---------------------------------------------------------------------------
// Line sink
// ---------------------------------------------------------------------------

/// Destination for report output: section headers and plain lines.
pub trait LineSink {
    fn section(&mut self, header: &str) -> io::Result<()>;
    fn line(&mut self, text: &str) -> io::Result<()>;
}

/// Writes to any `io::Write`, a blank line before each section header.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineSink for ConsoleSink<W> {
    fn section(&mut self, header: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{header}")
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }
}

/// Collects lines in memory; headers are kept verbatim.
impl LineSink for Vec<String> {
    fn section(&mut self, header: &str) -> io::Result<()> {
        self.push(header.to_string());
        Ok(())
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        self.push(text.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report helpers
// ---------------------------------------------------------------------------

/// Print a header followed by one `"{id}: {name}"` line per record.
pub fn print_id_names<S: LineSink + ?Sized>(
    sink: &mut S,
    header: &str,
    records: &[&Record],
) -> anyhow::Result<()> {
    let lines = records
        .iter()
        .map(|r| -> Result<String, LookupError> {
            Ok(format!("{}: {}", get_field("id", *r)?, get_field("name", *r)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    sink.section(header)?;
    for line in &lines {
        sink.line(line)?;
    }
    Ok(())
}

/// Print a header followed by one line per name.
pub fn print_names<S, T>(sink: &mut S, header: &str, names: &[T]) -> io::Result<()>
where
    S: LineSink + ?Sized,
    T: AsRef<str>,
{
    sink.section(header)?;
    for name in names {
        sink.line(name.as_ref())?;
    }
    Ok(())
}
