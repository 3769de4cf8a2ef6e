//! File sink for the `fmt` layer

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Shared handle to the log file
///
/// Every event takes the lock, writes its line and flushes on release.
/// A failed flush is reported on stderr and does not stop later events.
#[derive(Clone)]
pub struct LogFileWriter {
    file: Arc<Mutex<BufWriter<File>>>,
}

impl LogFileWriter {
    pub fn open(config: &FileConfig) -> Result<Self, LoggerError> {
        let file = open_log_file(&config.path, config.append).map_err(|source| LoggerError::Open {
            path: config.path.clone(),
            source,
        })?;

        Ok(Self {
            file: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LogFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard {
            file: self.file.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

pub struct LogFileGuard<'a> {
    file: MutexGuard<'a, BufWriter<File>>,
}

impl Write for LogFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for LogFileGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.file.flush() {
            eprintln!("task-planner: failed to write log file: {}", e);
        }
    }
}
