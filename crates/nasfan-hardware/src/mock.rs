//! Mock transport for testing and development without hardware.
//!
//! [`MockTransport::new`] returns a transport/handle pair: the transport
//! is handed to the code under test, while the handle scripts replies and
//! inspects everything that was written, even after the transport itself
//! has been consumed or dropped.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nasfan_core::constants::FRAME_LEN;
use nasfan_protocol::{CommandFrame, ResponseFrame};

use crate::error::Result;
use crate::transport::FrameTransport;

#[derive(Debug, Default)]
struct Shared {
    written: Mutex<Vec<[u8; FRAME_LEN]>>,
    replies: Mutex<VecDeque<Option<ResponseFrame>>>,
    fail_writes: AtomicBool,
}

/// Scripted in-memory transport.
///
/// Reads pop from a queue scripted through the [`MockHandle`]; an empty
/// queue reads as a timeout (`Ok(None)`), like a silent device.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use nasfan_hardware::{FrameTransport, MockTransport};
/// use nasfan_protocol::{CommandFrame, ResponseFrame};
///
/// let (mut transport, handle) = MockTransport::new();
/// handle.push_reply(ResponseFrame::from_parts(0x03, 0x08, [0x00, 0x00, 0x42]));
///
/// transport.write_frame(&CommandFrame::new(0x03, 0x08, [0x00, 0x00], 0x00)).unwrap();
/// let reply = transport.read_frame(Duration::from_secs(5)).unwrap();
///
/// assert!(reply.is_some());
/// assert_eq!(handle.written().len(), 1);
/// ```
#[derive(Debug)]
pub struct MockTransport {
    shared: Arc<Shared>,
}

impl MockTransport {
    /// Create a new mock transport and its controlling handle.
    pub fn new() -> (Self, MockHandle) {
        let shared = Arc::new(Shared::default());
        (
            Self {
                shared: Arc::clone(&shared),
            },
            MockHandle { shared },
        )
    }
}

impl FrameTransport for MockTransport {
    fn write_frame(&mut self, frame: &CommandFrame) -> Result<()> {
        if self.shared.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock write failure").into());
        }
        self.shared
            .written
            .lock()
            .expect("mock write log poisoned")
            .push(*frame.as_bytes());
        Ok(())
    }

    fn read_frame(&mut self, _timeout: Duration) -> Result<Option<ResponseFrame>> {
        let next = self
            .shared
            .replies
            .lock()
            .expect("mock reply queue poisoned")
            .pop_front();
        // No scripted reply: behave like a device that stayed silent until
        // the deadline.
        Ok(next.flatten())
    }
}

/// Control handle for a [`MockTransport`].
#[derive(Debug, Clone)]
pub struct MockHandle {
    shared: Arc<Shared>,
}

impl MockHandle {
    /// Queue one reply frame.
    pub fn push_reply(&self, frame: ResponseFrame) {
        self.shared
            .replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(Some(frame));
    }

    /// Queue one read that times out without data.
    pub fn push_silence(&self) {
        self.shared
            .replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(None);
    }

    /// Make every subsequent write fail with a broken-pipe error.
    pub fn fail_writes(&self, fail: bool) {
        self.shared.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Every frame written so far, in order.
    pub fn written(&self) -> Vec<[u8; FRAME_LEN]> {
        self.shared
            .written
            .lock()
            .expect("mock write log poisoned")
            .clone()
    }
}
