use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use super::{RegistryError, RegistryResult};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
}

/// Human-readable logs on stderr only.
pub fn init_console_logging() -> RegistryResult<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer())
        .try_init()
        .map_err(|err| RegistryError::Logging(err.to_string()))
}

/// JSON logs appended to the run's `logs.ndjson`, plus stderr output.
pub fn init_run_logging(path: &Path) -> RegistryResult<()> {
    let log = RunLog::open(path)?;
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_current_span(false)
        .with_writer(BoxMakeWriter::new(move || log.clone()));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(json_layer)
        .with(console_layer())
        .try_init()
        .map_err(|err| RegistryError::Logging(err.to_string()))
}

/// Append-only handle on the run log, cloned into every writer request.
#[derive(Clone)]
struct RunLog {
    file: Arc<Mutex<File>>,
}

impl RunLog {
    fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }

    fn with_file<T>(&self, op: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("run log lock poisoned"))?;
        op(&mut file)
    }
}

impl Write for RunLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}
