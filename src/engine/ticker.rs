//! Redraw ticker: a dedicated thread that calls back after an interval the
//! callback itself chooses.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::io;
use std::ops::ControlFlow;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to the ticker thread.
///
/// Exactly one tick is pending at a time. Each tick returns the delay before
/// the next one, or breaks to end the loop. Dropping the handle disconnects
/// the stop channel, which ends the loop at its next wait.
pub(crate) struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the thread; the first tick fires after `first`.
    pub fn spawn<F>(first: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() -> ControlFlow<(), Duration> + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("livebar-ticker".to_owned())
            .spawn(move || run_loop(&stop_rx, first, &mut tick))?;
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the loop and wait for the thread, unless called from it.
    pub fn stop(mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }
}

fn run_loop<F>(stop: &Receiver<()>, first: Duration, tick: &mut F)
where
    F: FnMut() -> ControlFlow<(), Duration>,
{
    let mut interval = first;
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        match tick() {
            ControlFlow::Continue(next) => interval = next,
            ControlFlow::Break(()) => break,
        }
    }
    tracing::trace!("ticker stopped");
}
