//! Single-writer broadcast signals
//!
//! The pointer sample and the scroll offset are the only page-wide mutable
//! values. Each is owned by exactly one writer (the pointer tracker, the host
//! scroll listener) and read by any number of consumers on the animation
//! thread. Writers are not `Clone`, so the single-writer rule is enforced by
//! the type system.
//!
//! Dropping or closing the writer tears the signal down: readers keep the
//! last value but report `is_live() == false`.

use std::cell::Cell;
use std::rc::Rc;

struct Slot<T> {
    value: Cell<T>,
    version: Cell<u64>,
    live: Cell<bool>,
}

/// Create a signal with an initial value
pub fn signal<T: Copy>(initial: T) -> (SignalWriter<T>, SignalReader<T>) {
    let slot = Rc::new(Slot {
        value: Cell::new(initial),
        version: Cell::new(0),
        live: Cell::new(true),
    });
    (
        SignalWriter {
            slot: Rc::clone(&slot),
        },
        SignalReader { slot },
    )
}

/// The unique write handle of a signal
pub struct SignalWriter<T: Copy> {
    slot: Rc<Slot<T>>,
}

impl<T: Copy> SignalWriter<T> {
    /// Overwrite the current value
    ///
    /// Writes after `close()` are ignored.
    pub fn set(&self, value: T) {
        if !self.slot.live.get() {
            return;
        }
        self.slot.value.set(value);
        self.slot.version.set(self.slot.version.get().wrapping_add(1));
    }

    /// Current value
    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    /// Create another reader for this signal
    pub fn subscribe(&self) -> SignalReader<T> {
        SignalReader {
            slot: Rc::clone(&self.slot),
        }
    }

    /// Tear the signal down
    pub fn close(&self) {
        self.slot.live.set(false);
    }
}

impl<T: Copy> Drop for SignalWriter<T> {
    fn drop(&mut self) {
        self.close();
    }
}

/// A read handle of a signal
pub struct SignalReader<T: Copy> {
    slot: Rc<Slot<T>>,
}

impl<T: Copy> Clone for SignalReader<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Copy> SignalReader<T> {
    /// Latest written value
    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    /// Number of writes so far, for cheap change detection
    pub fn version(&self) -> u64 {
        self.slot.version.get()
    }

    /// False once the writer has been closed or dropped
    pub fn is_live(&self) -> bool {
        self.slot.live.get()
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for SignalReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalReader")
            .field("value", &self.get())
            .field("version", &self.version())
            .field("live", &self.is_live())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readers_see_latest_write() {
        let (writer, reader) = signal((0.0f32, 0.0f32));
        let second = reader.clone();

        writer.set((10.0, 20.0));
        writer.set((30.0, 40.0));

        assert_eq!(reader.get(), (30.0, 40.0));
        assert_eq!(second.get(), (30.0, 40.0));
        assert_eq!(reader.version(), 2);
    }

    #[test]
    fn test_subscribe_after_writes() {
        let (writer, _reader) = signal(1u32);
        writer.set(7);

        let late = writer.subscribe();
        assert_eq!(late.get(), 7);
    }

    #[test]
    fn test_close_stops_updates() {
        let (writer, reader) = signal(5i32);
        writer.close();
        writer.set(9);

        assert!(!reader.is_live());
        assert_eq!(reader.get(), 5);
        assert_eq!(reader.version(), 0);
    }

    #[test]
    fn test_drop_writer_tears_down() {
        let (writer, reader) = signal(0.5f32);
        writer.set(0.75);
        drop(writer);

        assert!(!reader.is_live());
        assert_eq!(reader.get(), 0.75);
    }
}
