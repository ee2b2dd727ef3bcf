//! Canonical-markup text formatter

use std::io::Write;

use anyhow::Result;

use super::{OutputFormatter, Record};

/// Plain text formatter - writes each record's canonical markup rendering
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        write!(self.writer, "{record}")?;
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
    fn test_line_record_gets_its_newline_back() {
        let mut buf = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buf);
            formatter
                .write_record(&Record::Line("<s>".to_string()))
                .unwrap();
            formatter.finish().unwrap();
        }
        assert_eq!(buf, b"<s>\n");
    }
}
