//! Streaming iteration over a [`SyncSet`](super::SyncSet).
//!
//! [`SyncSet::iter`](super::SyncSet::iter) and
//! [`SyncSet::iterator`](super::SyncSet::iterator) hand elements to the caller
//! one at a time from a background producer thread. The producer holds the
//! set's read lock for its whole lifetime and passes each element through a
//! rendezvous channel, so it only advances when the consumer asks for the
//! next element.
//!
//! # Releasing the Lock
//!
//! While a stream is alive, writers on the same set block. A stream releases
//! its producer and the read lock when any of the following happens:
//!
//! - the stream is exhausted
//! - [`SetIterator::stop`] is called
//! - the stream value is dropped
//!
//! Dropping or stopping a stream joins the producer thread, so nothing
//! outlives the stream value.
//!
//! # Deadlock Warning
//!
//! Do not write to a set from the thread that owns one of its live streams.
//! The write waits for the producer's read lock, and the producer waits for
//! the consumer to take the next element. Reads from that thread are fine,
//! even while another thread's write is queued, because every shared
//! acquisition on a [`SyncSet`](super::SyncSet) is recursive:
//!
//! ```rust,no_run
//! use lockset::set::SyncSet;
//!
//! let set: SyncSet<i32> = [1, 2, 3].into_iter().collect();
//! let mut stream = set.iter();
//! let _ = stream.next();
//! set.add(4); // never returns while `stream` is alive
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use parking_lot::RwLock;

use super::UnsyncSet;

// =============================================================================
// Producer
// =============================================================================

/// The consumer half of a background element stream.
struct Producer<T> {
    receiver: Option<Receiver<T>>,
    handle: Option<JoinHandle<()>>,
}

impl<T> Producer<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn spawn(engine: Arc<RwLock<UnsyncSet<T>>>) -> Self {
        let (sender, receiver) = mpsc::sync_channel(0);

        let handle = thread::spawn(move || {
            let engine = engine.read_recursive();
            for element in &*engine {
                if sender.send(element.clone()).is_err() {
                    tracing::trace!("set stream consumer hung up");
                    return;
                }
            }
            tracing::trace!(
                cardinality = engine.cardinality(),
                "set stream exhausted"
            );
        });

        tracing::trace!("set stream producer spawned");
        Self {
            receiver: Some(receiver),
            handle: Some(handle),
        }
    }
}

impl<T> Producer<T> {
    fn next(&mut self) -> Option<T> {
        let element = self.receiver.as_ref()?.recv().ok();
        if element.is_none() {
            self.finish();
        }
        element
    }

    /// Disconnects from the producer and waits for it to release the lock.
    fn finish(&mut self) {
        // Dropping the receiver fails the producer's pending send.
        drop(self.receiver.take());
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::debug!("set stream producer panicked");
        }
    }

    const fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        self.finish();
    }
}

// =============================================================================
// Iter
// =============================================================================

/// A stream of every element of a [`SyncSet`](super::SyncSet).
///
/// Returned by [`SyncSet::iter`](super::SyncSet::iter). Dropping the stream
/// before it is exhausted cancels it.
///
/// # Examples
///
/// ```rust
/// use lockset::set::SyncSet;
///
/// let set: SyncSet<i32> = [1, 2, 3].into_iter().collect();
///
/// let mut elements: Vec<i32> = set.iter().collect();
/// elements.sort_unstable();
/// assert_eq!(elements, vec![1, 2, 3]);
///
/// // The read lock is gone, so writers proceed
/// assert!(set.add(4));
/// ```
pub struct Iter<T> {
    producer: Producer<T>,
}

impl<T> Iter<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn spawn(engine: Arc<RwLock<UnsyncSet<T>>>) -> Self {
        Self {
            producer: Producer::spawn(engine),
        }
    }
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.producer.next()
    }
}

impl<T> FusedIterator for Iter<T> {}

impl<T> fmt::Debug for Iter<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Iter")
            .field("finished", &self.producer.is_finished())
            .finish()
    }
}

// =============================================================================
// SetIterator
// =============================================================================

/// A cancellable stream of the elements of a [`SyncSet`](super::SyncSet).
///
/// Returned by [`SyncSet::iterator`](super::SyncSet::iterator). Call
/// [`stop`](Self::stop) to end the stream early and release the read lock
/// while keeping the value around; dropping it has the same effect.
///
/// # Examples
///
/// ```rust
/// use lockset::set::SyncSet;
///
/// let set: SyncSet<i32> = (0..100).collect();
/// let mut stream = set.iterator();
///
/// let first = stream.next();
/// assert!(first.is_some());
///
/// stream.stop();
/// assert!(stream.is_stopped());
/// assert_eq!(stream.next(), None);
///
/// set.clear();
/// assert_eq!(set.cardinality(), 0);
/// ```
pub struct SetIterator<T> {
    producer: Producer<T>,
}

impl<T> SetIterator<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn spawn(engine: Arc<RwLock<UnsyncSet<T>>>) -> Self {
        Self {
            producer: Producer::spawn(engine),
        }
    }
}

impl<T> SetIterator<T> {
    /// Ends the stream and waits for the producer to release the read lock.
    ///
    /// Subsequent calls to `next` return `None`. Calling `stop` again has no
    /// effect.
    pub fn stop(&mut self) {
        if !self.producer.is_finished() {
            tracing::trace!("set stream stopped by consumer");
        }
        self.producer.finish();
    }

    /// Returns `true` once the stream is exhausted or stopped.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.producer.is_finished()
    }
}

impl<T> Iterator for SetIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.producer.next()
    }
}

impl<T> FusedIterator for SetIterator<T> {}

impl<T> fmt::Debug for SetIterator<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SetIterator")
            .field("stopped", &self.producer.is_finished())
            .finish()
    }
}

static_assertions::assert_impl_all!(Iter<i32>: Send);
static_assertions::assert_impl_all!(SetIterator<String>: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn engine_of(elements: &[i32]) -> Arc<RwLock<UnsyncSet<i32>>> {
        Arc::new(RwLock::new(elements.iter().copied().collect()))
    }

    #[rstest]
    fn test_iter_yields_every_element() {
        let mut elements: Vec<i32> = Iter::spawn(engine_of(&[1, 2, 3, 4])).collect();
        elements.sort_unstable();
        assert_eq!(elements, vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn test_iter_empty_engine() {
        let mut stream = Iter::spawn(engine_of(&[]));
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);
    }

    #[rstest]
    fn test_exhausted_iter_releases_lock() {
        let engine = engine_of(&[1, 2]);
        let mut stream = Iter::spawn(Arc::clone(&engine));
        while stream.next().is_some() {}

        assert!(engine.try_write().is_some());
    }

    #[rstest]
    fn test_dropped_iter_releases_lock() {
        let engine = engine_of(&[1, 2, 3]);
        let mut stream = Iter::spawn(Arc::clone(&engine));
        let _ = stream.next();
        drop(stream);

        assert!(engine.try_write().is_some());
        assert_eq!(Arc::strong_count(&engine), 1);
    }

    #[rstest]
    fn test_stop_releases_lock_and_is_idempotent() {
        let engine = engine_of(&[1, 2, 3]);
        let mut stream = SetIterator::spawn(Arc::clone(&engine));
        assert!(!stream.is_stopped());
        let _ = stream.next();

        stream.stop();
        stream.stop();

        assert!(stream.is_stopped());
        assert_eq!(stream.next(), None);
        assert!(engine.try_write().is_some());
    }

    #[rstest]
    fn test_unconsumed_stream_holds_read_lock() {
        let engine = engine_of(&[1, 2, 3]);
        let mut stream = SetIterator::spawn(Arc::clone(&engine));
        // Receiving one element proves the producer owns the read lock
        let _ = stream.next();

        assert!(engine.try_write().is_none());
        stream.stop();
        assert!(engine.try_write().is_some());
    }
}
