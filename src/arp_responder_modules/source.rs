use std::io;

pub enum NextFrame<'a> {
    Frame(&'a [u8]),
    /// Nothing arrived before the read timeout.
    Idle,
    EndOfStream,
}

/// A blocking supply of raw link-layer frames.
pub trait FrameSource {
    fn next_frame(&mut self) -> io::Result<NextFrame<'_>>;
}

pub trait FrameTransmitter {
    fn transmit(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// In-memory doubles for driving the capture loop without an interface.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed script, then reports end of stream.
    /// `Ok(None)` reads as a timeout; `Err` reads as a failed receive.
    pub struct MemorySource {
        pending: VecDeque<io::Result<Option<Vec<u8>>>>,
        current: Vec<u8>,
    }

    impl MemorySource {
        pub fn new<I: IntoIterator<Item = Vec<u8>>>(frames: I) -> MemorySource {
            MemorySource::scripted(frames.into_iter().map(|frame| Ok(Some(frame))))
        }

        pub fn scripted<I>(steps: I) -> MemorySource
        where
            I: IntoIterator<Item = io::Result<Option<Vec<u8>>>>,
        {
            MemorySource {
                pending: steps.into_iter().collect(),
                current: Vec::new(),
            }
        }
    }

    impl FrameSource for MemorySource {
        fn next_frame(&mut self) -> io::Result<NextFrame<'_>> {
            match self.pending.pop_front() {
                Some(Ok(Some(frame))) => {
                    self.current = frame;
                    Ok(NextFrame::Frame(&self.current))
                }
                Some(Ok(None)) => Ok(NextFrame::Idle),
                Some(Err(e)) => Err(e),
                None => Ok(NextFrame::EndOfStream),
            }
        }
    }

    /// Keeps every transmitted frame. The first `failures` writes are rejected.
    #[derive(Default)]
    pub struct RecordingTransmitter {
        pub sent: Vec<Vec<u8>>,
        failures: usize,
    }

    impl RecordingTransmitter {
        pub fn new() -> RecordingTransmitter {
            RecordingTransmitter::default()
        }

        pub fn failing(failures: usize) -> RecordingTransmitter {
            RecordingTransmitter {
                sent: Vec::new(),
                failures,
            }
        }
    }

    impl FrameTransmitter for RecordingTransmitter {
        fn transmit(&mut self, bytes: &[u8]) -> io::Result<()> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::new(io::ErrorKind::Other, "transmit rejected"));
            }
            self.sent.push(bytes.to_vec());
            Ok(())
        }
    }
}
