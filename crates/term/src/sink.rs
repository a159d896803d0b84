//! Output sink: the byte destination chosen once at startup.

use std::io::{self, Write};

use tracing::debug;

use crate::config::{DisplayConfig, OutputKind};
use crate::core::DisplayError;

#[cfg(unix)]
use crate::serial::SerialPort;

#[derive(Debug)]
pub enum Sink {
    Terminal(io::Stdout),
    #[cfg(unix)]
    Serial(SerialPort),
}

impl Sink {
    /// Open the sink selected by `config`.
    pub fn open(config: &DisplayConfig) -> Result<Self, DisplayError> {
        match config.effective_output() {
            OutputKind::Terminal => {
                debug!("output sink: terminal");
                Ok(Sink::Terminal(io::stdout()))
            }
            OutputKind::Serial => open_serial(config),
        }
    }

    pub fn kind(&self) -> OutputKind {
        match self {
            Sink::Terminal(_) => OutputKind::Terminal,
            #[cfg(unix)]
            Sink::Serial(_) => OutputKind::Serial,
        }
    }
}

#[cfg(unix)]
fn open_serial(config: &DisplayConfig) -> Result<Sink, DisplayError> {
    let port = SerialPort::open(&config.serial_path, config.baud_rate).map_err(|source| {
        DisplayError::SinkOpen {
            target: config.serial_path.display().to_string(),
            source,
        }
    })?;
    debug!(
        path = %port.path().display(),
        baud_rate = port.baud_rate(),
        "output sink: serial"
    );
    Ok(Sink::Serial(port))
}

#[cfg(not(unix))]
fn open_serial(config: &DisplayConfig) -> Result<Sink, DisplayError> {
    Err(DisplayError::SinkOpen {
        target: config.serial_path.display().to_string(),
        source: io::Error::new(
            io::ErrorKind::Unsupported,
            "serial output needs a unix host",
        ),
    })
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Terminal(out) => out.write(buf),
            #[cfg(unix)]
            Sink::Serial(port) => port.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Terminal(out) => out.flush(),
            #[cfg(unix)]
            Sink::Serial(port) => port.flush(),
        }
    }
}
