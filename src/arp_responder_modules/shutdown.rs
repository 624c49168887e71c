use crossbeam::channel::{self, Receiver, Sender};
use std::cell::Cell;

/// Stop signal checked by the capture loop between reads.
pub struct Shutdown {
    signal: Receiver<()>,
    seen: Cell<bool>,
}

impl Shutdown {
    /// Requests a stop on SIGINT or SIGTERM.
    pub fn on_ctrl_c() -> Result<Shutdown, ctrlc::Error> {
        let (sender, shutdown) = Shutdown::channel();
        ctrlc::set_handler(move || {
            // receiver already gone means the loop is finished
            let _ = sender.send(());
        })?;
        Ok(shutdown)
    }

    pub fn channel() -> (Sender<()>, Shutdown) {
        let (sender, receiver) = channel::unbounded();
        (sender, Shutdown::from_receiver(receiver))
    }

    #[cfg(test)]
    pub fn never() -> Shutdown {
        Shutdown::from_receiver(channel::never())
    }

    fn from_receiver(signal: Receiver<()>) -> Shutdown {
        Shutdown {
            signal,
            seen: Cell::new(false),
        }
    }

    pub fn requested(&self) -> bool {
        if !self.seen.get() && self.signal.try_recv().is_ok() {
            self.seen.set(true);
        }
        self.seen.get()
    }
}
