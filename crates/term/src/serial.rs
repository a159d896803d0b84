//! Serial character display link.
//!
//! The far end understands the same escape vocabulary as a terminal, so the
//! port is a plain byte sink: raw mode, fixed speed, no flow control.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use termios::{cfmakeraw, cfsetspeed, tcsetattr, Termios, TCSANOW};
use tracing::debug;

#[derive(Debug)]
pub struct SerialPort {
    file: File,
    path: PathBuf,
    baud_rate: u32,
}

impl SerialPort {
    /// Open `path` for writing and configure the line.
    ///
    /// The device is closed again if configuration fails.
    pub fn open(path: &Path, baud_rate: u32) -> io::Result<Self> {
        let speed = baud_constant(baud_rate).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsupported baud rate {baud_rate}"),
            )
        })?;

        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(path)?;

        let fd = file.as_raw_fd();
        let mut tio = Termios::from_fd(fd)?;
        cfmakeraw(&mut tio);
        cfsetspeed(&mut tio, speed)?;
        tcsetattr(fd, TCSANOW, &tio)?;

        debug!(path = %path.display(), baud_rate, "serial port configured");
        Ok(Self {
            file,
            path: path.to_path_buf(),
            baud_rate,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl Write for SerialPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn baud_constant(rate: u32) -> Option<libc::speed_t> {
    Some(match rate {
        9_600 => libc::B9600,
        19_200 => libc::B19200,
        38_400 => libc::B38400,
        57_600 => libc::B57600,
        115_200 => libc::B115200,
        230_400 => libc::B230400,
        _ => return None,
    })
}
