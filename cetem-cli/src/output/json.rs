//! NDJSON output formatter

use std::io::Write;

use anyhow::Result;

use super::{OutputFormatter, Record};

/// JSON formatter - writes one JSON object per record (NDJSON)
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_tagged_one_per_line() {
        let mut buf = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buf);
            formatter
                .write_record(&Record::Line("casa\tpol".to_string()))
                .unwrap();
            formatter
                .write_record(&Record::Line("<s>".to_string()))
                .unwrap();
            formatter.finish().unwrap();
        }
        let rendered = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"type\":\"line\""));
    }
}
