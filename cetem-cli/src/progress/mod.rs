//! Progress reporting module

use std::io::Read;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Byte-based progress reporter for corpus streaming
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize a byte progress bar; stays hidden when quiet or when the
    /// input size is unknown (stdin, pipes)
    pub fn init_bytes(&mut self, total_bytes: Option<u64>) {
        if self.quiet {
            return;
        }
        let Some(total) = total_bytes else {
            return;
        };

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Wrap a reader so the bar advances with every byte read
    pub fn wrap_read<R: Read + Send + 'static>(&self, reader: R) -> Box<dyn Read + Send> {
        match &self.progress_bar {
            Some(pb) => Box::new(pb.wrap_read(reader)),
            None => Box::new(reader),
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}
