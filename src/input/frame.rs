//! Per-frame coalescing of high-frequency input
//!
//! Pointer-move events arrive far more often than frames are drawn. A
//! [`FrameCoalescer`] keeps at most one pending value: every new value replaces
//! the previous one and the frame flush takes whatever is left.

/// Single-slot, last-write-wins pending update
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    /// Values replaced before a flush reached them
    superseded: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            superseded: 0,
        }
    }
}

impl<T> FrameCoalescer<T> {
    /// Queue `value` for the next flush, dropping any value still pending
    pub fn submit(&mut self, value: T) {
        if self.pending.replace(value).is_some() {
            self.superseded += 1;
        }
    }

    /// Take the pending value, if any
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending value without applying it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut slot = FrameCoalescer::default();
        slot.submit(1);
        slot.submit(2);
        slot.submit(3);

        assert_eq!(slot.superseded(), 2);
        assert_eq!(slot.flush(), Some(3));
        assert_eq!(slot.flush(), None);
    }

    #[test]
    fn test_cancel_discards() {
        let mut slot = FrameCoalescer::default();
        slot.submit("pending");
        slot.cancel();
        assert_eq!(slot.flush(), None);
        assert_eq!(slot.superseded(), 0);
    }
}
