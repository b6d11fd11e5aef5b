//! The frame transport seam and its serial implementation.

use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use serialport::{DataBits, Parity, SerialPort, StopBits};
use tracing::trace;

use nasfan_core::constants::{BAUD_RATE, CHANNEL_TIMEOUT_MS, FRAME_LEN, START_BYTE};
use nasfan_protocol::{CommandFrame, ResponseFrame};

use crate::error::{Result, TransportError};

/// A byte-oriented duplex channel that moves whole 7-byte frames.
///
/// This is the only seam between the device driver and the physical link,
/// which is what lets the driver and control loop run against
/// [`MockTransport`](crate::MockTransport) in tests.
pub trait FrameTransport {
    /// Write one command frame and flush the channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel rejects the write or accepts fewer
    /// than 7 bytes.
    fn write_frame(&mut self, frame: &CommandFrame) -> Result<()>;

    /// Read the next syntactically valid frame before the deadline.
    ///
    /// Polls the channel for up to `timeout`, accumulating bytes until a
    /// whole frame is held and silently discarding noise while waiting.
    /// Returns `Ok(None)` when the deadline passes without a valid frame;
    /// a timeout is data absence, not a fault.
    fn read_frame(&mut self, timeout: Duration) -> Result<Option<ResponseFrame>>;
}

/// Transport over a real serial device.
///
/// The link parameters are fixed by the microcontroller firmware:
/// 19200 baud, 8 data bits, no parity, 1 stop bit, 100 ms base channel
/// timeout. Only the device path is configurable.
///
/// The channel is opened once at startup and owned for the process
/// lifetime; a failure to open is fatal, and there is no reopening on
/// error.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open the serial device at `path` with the fixed link parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] if the device cannot be opened or
    /// configured.
    pub fn open(path: &str) -> Result<Self> {
        let port = serialport::new(path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(Duration::from_millis(CHANNEL_TIMEOUT_MS))
            .open()
            .map_err(|source| TransportError::open(path, source))?;

        Ok(Self { port })
    }
}

impl FrameTransport for SerialTransport {
    fn write_frame(&mut self, frame: &CommandFrame) -> Result<()> {
        let written = self.port.write(frame.as_bytes())?;
        if written != FRAME_LEN {
            return Err(TransportError::short_write(written));
        }
        self.port.flush()?;
        trace!(frame = %frame, "frame written");
        Ok(())
    }

    fn read_frame(&mut self, timeout: Duration) -> Result<Option<ResponseFrame>> {
        let deadline = Instant::now() + timeout;
        let mut buf = [0u8; FRAME_LEN];
        let mut filled = 0;

        // The link is a byte stream: at 19200 baud a reply routinely
        // arrives split across reads, so bytes accumulate until a whole
        // frame is held. Parsing only ever happens on 7 buffered bytes.
        while Instant::now() < deadline {
            match self.port.read(&mut buf[filled..]) {
                Ok(0) => {}
                Ok(n) => {
                    filled += n;
                    if filled < FRAME_LEN {
                        continue;
                    }
                    match ResponseFrame::parse(&buf) {
                        Ok(frame) => {
                            trace!(frame = %frame, "frame received");
                            return Ok(Some(frame));
                        }
                        Err(_) => {
                            trace!("discarding noise, resynchronizing on start marker");
                            filled = resync(&mut buf, filled);
                        }
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(None)
    }
}

/// Realign the buffer on the next start marker after a failed parse.
///
/// Everything up to and including the first byte is noise; the remainder
/// is kept only from the next `0xFA` on. Returns the new fill level.
fn resync(buf: &mut [u8; FRAME_LEN], filled: usize) -> usize {
    match buf[1..filled].iter().position(|&b| b == START_BYTE) {
        Some(offset) => {
            let start = offset + 1;
            buf.copy_within(start..filled, 0);
            filled - start
        }
        None => 0,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::thread;

    use serialport::TTYPort;

    const FRAME: [u8; FRAME_LEN] = [0xFA, 0x03, 0x08, 0x00, 0x00, 0x42, 0xFB];

    /// A transport on the slave end of a pty, with the master for feeding.
    fn pty_transport() -> (SerialTransport, TTYPort) {
        let (master, mut slave) = TTYPort::pair().expect("cannot open pty pair");
        slave
            .set_timeout(Duration::from_millis(CHANNEL_TIMEOUT_MS))
            .expect("cannot set pty timeout");
        (
            SerialTransport {
                port: Box::new(slave),
            },
            master,
        )
    }

    #[test]
    fn test_whole_frame_is_returned() {
        let (mut transport, mut master) = pty_transport();
        master.write_all(&FRAME).unwrap();

        let frame = transport.read_frame(Duration::from_secs(1)).unwrap();

        assert_eq!(frame.unwrap().as_bytes(), &FRAME);
    }

    #[test]
    fn test_frame_split_across_reads_is_reassembled() {
        let (mut transport, mut master) = pty_transport();

        // Head now, tail while the read is already polling.
        master.write_all(&FRAME[..3]).unwrap();
        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(40));
            master.write_all(&FRAME[3..]).unwrap();
            master
        });

        let frame = transport.read_frame(Duration::from_secs(1)).unwrap();
        let _master = writer.join().unwrap();

        assert_eq!(frame.unwrap().as_bytes(), &FRAME);
    }

    #[test]
    fn test_garbage_before_frame_is_discarded() {
        let (mut transport, mut master) = pty_transport();

        master.write_all(&[0x00, 0x11, 0x22]).unwrap();
        master.write_all(&FRAME).unwrap();

        let frame = transport.read_frame(Duration::from_secs(1)).unwrap();

        assert_eq!(frame.unwrap().as_bytes(), &FRAME);
    }

    #[test]
    fn test_false_start_marker_resynchronizes() {
        let (mut transport, mut master) = pty_transport();

        // A stray 0xFA opens a bogus frame; the real one follows.
        master.write_all(&[0xFA, 0x01, 0x02]).unwrap();
        master.write_all(&FRAME).unwrap();

        let frame = transport.read_frame(Duration::from_secs(1)).unwrap();

        assert_eq!(frame.unwrap().as_bytes(), &FRAME);
    }

    #[test]
    fn test_silent_channel_reads_as_timeout() {
        let (mut transport, _master) = pty_transport();

        let frame = transport.read_frame(Duration::from_millis(300)).unwrap();

        assert!(frame.is_none());
    }

    #[test]
    fn test_write_frame_puts_exact_bytes_on_the_wire() {
        let (mut transport, mut master) = pty_transport();
        let cmd = CommandFrame::new(0x03, 0x08, [0x00, 0x00], 0x00);

        transport.write_frame(&cmd).unwrap();

        let mut buf = [0u8; FRAME_LEN];
        master
            .set_timeout(Duration::from_secs(1))
            .expect("cannot set pty timeout");
        std::io::Read::read_exact(&mut master, &mut buf).unwrap();
        assert_eq!(&buf, cmd.as_bytes());
    }
}
