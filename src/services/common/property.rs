use std::fmt::Debug;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A reactive cell that can be watched for changes.
///
/// When the value changes, all watchers are notified automatically.
/// Each watcher gets the current value immediately when subscribing.
/// Watchers that fall behind only ever see the latest value.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Replace the value and notify all watchers.
    ///
    /// Only notifies if the value is different (requires PartialEq).
    /// Only accessible within the crate to prevent external modification.
    pub(crate) fn set(&self, new_value: T)
    where
        T: PartialEq,
    {
        self.update(|_| new_value);
    }

    /// Derive a replacement from the latest value and store it.
    ///
    /// The closure sees the value held at the instant of the write, so
    /// concurrent single-field updates never overwrite each other with a
    /// stale copy.
    pub(crate) fn update<F>(&self, derive: F)
    where
        T: PartialEq,
        F: FnOnce(&T) -> T,
    {
        self.tx.send_if_modified(|current| {
            let next = derive(current);
            if *current != next {
                *current = next;
                true
            } else {
                false
            }
        });
    }

    /// Get the current value.
    ///
    /// This is a synchronous operation that clones the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Watch for changes to this property.
    ///
    /// The stream immediately yields the current value, then yields
    /// whenever the value changes.
    pub fn watch(&self) -> WatchStream<T> {
        WatchStream::new(self.rx.clone())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
