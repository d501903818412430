use std::io::{BufRead, Write};
use std::sync::Arc;

use super::{InputFormat, RecordError, SvRecord, TabularRecord, VcfRecord};

/// Header lines of a variant stream, echoed to the output as read.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    lines: Vec<String>,
    columns: Arc<[String]>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            columns: Arc::from(Vec::new()),
        }
    }
}

impl Header {
    /// Header lines in input order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Column names of a tabular header row (empty for VCF).
    pub fn columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    /// Declare a VCF INFO field unless it is already declared.
    ///
    /// The declaration goes directly before the `#CHROM` line (or at the end
    /// if there is none). Returns whether a line was added.
    pub fn declare_info(&mut self, id: &str, number: &str, kind: &str, description: &str) -> bool {
        let prefix = format!("##INFO=<ID={id},");
        if self.lines.iter().any(|line| line.starts_with(&prefix)) {
            return false;
        }
        let line =
            format!("{prefix}Number={number},Type={kind},Description=\"{description}\">");
        let at = self
            .lines
            .iter()
            .position(|line| line.starts_with("#CHROM"))
            .unwrap_or(self.lines.len());
        self.lines.insert(at, line);
        true
    }
}

/// Streaming reader yielding one [`SvRecord`] per data line.
///
/// The header is consumed when the reader is created; records are parsed
/// lazily as the iterator advances.
#[derive(Debug)]
pub struct RecordReader<R> {
    inner: R,
    format: InputFormat,
    header: Header,
    pending: Option<String>,
    buffer: String,
}

impl<R: BufRead> RecordReader<R> {
    /// Read the header and prepare to stream records.
    pub fn new(mut inner: R, format: InputFormat) -> Result<Self, RecordError> {
        let mut header = Header::default();
        let mut pending = None;
        let mut buffer = String::new();

        match format {
            InputFormat::Vcf => {
                while read_line(&mut inner, &mut buffer)? {
                    if buffer.is_empty() {
                        continue;
                    }
                    if buffer.starts_with('#') {
                        header.lines.push(buffer.clone());
                    } else {
                        pending = Some(buffer.clone());
                        break;
                    }
                }
            }
            InputFormat::Socrates => {
                if read_line(&mut inner, &mut buffer)? {
                    header.columns = buffer.split('\t').map(str::to_string).collect();
                    header.lines.push(buffer.clone());
                }
            }
        }

        Ok(Self {
            inner,
            format,
            header,
            pending,
            buffer,
        })
    }

    /// Stream header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Mutable header, for declaring annotation fields before writing.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    fn parse(&self, line: &str) -> Result<SvRecord, RecordError> {
        match self.format {
            InputFormat::Vcf => VcfRecord::parse(line).map(SvRecord::from),
            InputFormat::Socrates => {
                TabularRecord::parse(line, self.header.columns()).map(SvRecord::from)
            }
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, RecordError> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        loop {
            if !read_line(&mut self.inner, &mut self.buffer)? {
                return Ok(None);
            }
            if !self.buffer.is_empty() {
                return Ok(Some(self.buffer.clone()));
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<SvRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Ok(Some(line)) => Some(self.parse(&line)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

/// Read one line into `buffer` without its line terminator.
fn read_line<R: BufRead>(reader: &mut R, buffer: &mut String) -> Result<bool, RecordError> {
    buffer.clear();
    if reader.read_line(buffer)? == 0 {
        return Ok(false);
    }
    let trimmed = buffer.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
    buffer.truncate(trimmed);
    Ok(true)
}

/// Writes a header and records in their native representation.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    inner: W,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap an output sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write every header line.
    pub fn write_header(&mut self, header: &Header) -> std::io::Result<()> {
        for line in header.lines() {
            writeln!(self.inner, "{line}")?;
        }
        Ok(())
    }

    /// Write one record.
    pub fn write_record(&mut self, record: &SvRecord) -> std::io::Result<()> {
        writeln!(self.inner, "{}", record.to_line())
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }

    /// Recover the wrapped sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
