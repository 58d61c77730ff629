//! Auto-iteration: wrap an iterator (or a stream) so each element advances
//! a bar.
//!
//! The total comes from an exact `size_hint`. An element is counted when the
//! consumer asks for the next one, so breaking out of a loop does not count
//! the element being processed. The bar finishes when the source is
//! exhausted or when the wrapper is dropped.

use crate::config::Config;
use crate::engine::{BarHandle, LiveBar, Receipt};

fn exact_len((lower, upper): (usize, Option<usize>)) -> Option<u64> {
    match upper {
        Some(upper) if upper == lower => u64::try_from(lower).ok(),
        _ => None,
    }
}

/// Shared bookkeeping for the iterator and stream wrappers.
#[derive(Debug)]
struct Progress {
    bar: Option<LiveBar>,
    handle: BarHandle,
    pending: bool,
    receipt: Option<Receipt>,
}

impl Progress {
    fn start(total: Option<u64>, config: &Config) -> Self {
        let bar = LiveBar::start(total, config);
        let handle = bar.handle();
        Self {
            bar: Some(bar),
            handle,
            pending: false,
            receipt: None,
        }
    }

    fn count_pending(&mut self) {
        if std::mem::take(&mut self.pending) {
            self.handle.inc();
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            self.receipt = Some(bar.finish());
        }
    }
}

/// Iterator adapter returned by [`track`].
#[derive(Debug)]
pub struct Tracked<I> {
    iter: I,
    progress: Progress,
}

/// Track `iter` with a bar configured by `config`.
pub fn track<I: IntoIterator>(iter: I, config: &Config) -> Tracked<I::IntoIter> {
    let iter = iter.into_iter();
    let total = exact_len(iter.size_hint());
    Tracked {
        iter,
        progress: Progress::start(total, config),
    }
}

impl<I> Tracked<I> {
    /// The bar's handle, e.g. to set its text from inside the loop.
    pub fn handle(&self) -> &BarHandle {
        &self.progress.handle
    }

    /// The receipt, once the source is exhausted.
    pub fn receipt(&self) -> Option<&Receipt> {
        self.progress.receipt.as_ref()
    }
}

impl<I: Iterator> Iterator for Tracked<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.progress.count_pending();
        self.progress.bar.as_ref()?;
        if let Some(item) = self.iter.next() {
            self.progress.pending = true;
            Some(item)
        } else {
            self.progress.finish();
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.progress.bar.is_some() {
            self.iter.size_hint()
        } else {
            (0, Some(0))
        }
    }
}

#[cfg(feature = "stream")]
pub use stream::{track_stream, TrackedStream};

#[cfg(feature = "stream")]
mod stream {
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures_core::Stream;

    use super::{exact_len, Progress};
    use crate::config::Config;
    use crate::engine::{BarHandle, Receipt};

    /// Stream adapter returned by [`track_stream`].
    #[derive(Debug)]
    pub struct TrackedStream<S> {
        stream: S,
        progress: Progress,
    }

    /// Track `stream` with a bar configured by `config`.
    pub fn track_stream<S: Stream + Unpin>(stream: S, config: &Config) -> TrackedStream<S> {
        let total = exact_len(stream.size_hint());
        TrackedStream {
            stream,
            progress: Progress::start(total, config),
        }
    }

    impl<S> TrackedStream<S> {
        /// The bar's handle.
        pub fn handle(&self) -> &BarHandle {
            &self.progress.handle
        }

        /// The receipt, once the stream is exhausted.
        pub fn receipt(&self) -> Option<&Receipt> {
            self.progress.receipt.as_ref()
        }
    }

    impl<S: Stream + Unpin> Stream for TrackedStream<S> {
        type Item = S::Item;

        fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            let this = &mut *self;
            this.progress.count_pending();
            if this.progress.bar.is_none() {
                return Poll::Ready(None);
            }
            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    this.progress.pending = true;
                    Poll::Ready(Some(item))
                }
                Poll::Ready(None) => {
                    this.progress.finish();
                    Poll::Ready(None)
                }
                Poll::Pending => Poll::Pending,
            }
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            self.stream.size_hint()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Capture;

    fn quiet() -> Config {
        Config::new().ctrl_c(false).output(Capture::new().output()).force_tty(false)
    }

    #[test]
    fn test_passes_elements_through() {
        let mut tracked = track(vec![1, 2, 3], &quiet());
        let sum: i32 = tracked.by_ref().sum();
        assert_eq!(sum, 6);
        let receipt = tracked.receipt().unwrap();
        assert_eq!(receipt.total, Some(3));
        assert_eq!(receipt.count, 3);
        assert!(receipt.success);
    }

    #[test]
    fn test_unknown_length() {
        let mut tracked = track((0..10).filter(|n| n % 2 == 0), &quiet());
        assert_eq!(tracked.by_ref().count(), 5);
        let receipt = tracked.receipt().unwrap();
        assert_eq!(receipt.total, None);
        assert_eq!(receipt.count, 5);
    }

    #[test]
    fn test_early_break_finishes_on_drop() {
        let tracked = track(0..10, &quiet());
        let handle = tracked.handle().clone();
        for n in tracked {
            if n == 3 {
                break;
            }
        }
        assert!(!handle.is_running());
        let receipt = handle.receipt().unwrap();
        assert_eq!(receipt.count, 3);
        assert!(receipt.underflow);
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let mut tracked = track(Vec::<u8>::new(), &quiet());
        assert_eq!(tracked.next(), None);
        assert_eq!(tracked.next(), None);
        assert_eq!(tracked.size_hint(), (0, Some(0)));
    }

    #[cfg(feature = "stream")]
    #[test]
    fn test_stream() {
        use futures::StreamExt;

        let mut tracked = track_stream(futures::stream::iter(vec!["a", "b"]), &quiet());
        let items: Vec<_> = futures::executor::block_on(tracked.by_ref().collect());
        assert_eq!(items, ["a", "b"]);
        let receipt = tracked.receipt().unwrap();
        assert_eq!(receipt.total, Some(2));
        assert_eq!(receipt.count, 2);
    }
}
