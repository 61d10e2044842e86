//! Single-slot valid/ready sample handshake.
//!
//! [`SampleStream`] is the flow-control primitive connecting a serial
//! state machine to producer/consumer code: one payload slot, a producer
//! `valid` flag, and a consumer `ready` level.
//!
//! # Handshake Contract
//!
//! - `payload` is defined only while `valid` is asserted.
//! - A transfer occurs exactly when `valid` and `ready` hold in the same
//!   cycle; at most one sample is ever in flight.
//! - The producer may overwrite the slot only when it is empty or the
//!   consumer has asserted `ready` for the current cycle — otherwise
//!   [`try_produce()`](SampleStream::try_produce) rejects the new sample
//!   and returns it to the caller.
//! - A consumer that asserts `ready` without taking the payload forfeits
//!   it: the transfer counts as completed and the slot may be overwritten.
//!   [`try_consume()`](SampleStream::try_consume) performs the read and the
//!   release as one step, so consumers driven from ordinary code cannot
//!   observe a half-finished transfer.

use crate::sample::Sample;

/// Single-slot handshake channel carrying one [`Sample`] at a time.
///
/// Deliberately not `Copy`: a stream's slot is unique, and each endpoint
/// component owns exactly one side of it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleStream {
    payload: Sample,
    valid: bool,
    ready: bool,
}

impl SampleStream {
    /// Create an empty stream: no sample pending, consumer not ready.
    pub const fn new() -> Self {
        SampleStream {
            payload: 0,
            valid: false,
            ready: false,
        }
    }

    /// Whether a sample is pending in the slot.
    pub const fn valid(&self) -> bool {
        self.valid
    }

    /// The consumer's current `ready` level.
    pub const fn ready(&self) -> bool {
        self.ready
    }

    /// The pending sample, without completing a transfer.
    pub const fn peek(&self) -> Option<Sample> {
        if self.valid {
            Some(self.payload)
        } else {
            None
        }
    }

    /// Consumer side: declare whether a transfer may complete this cycle.
    ///
    /// The level holds until changed; a producer ticked while `ready` is
    /// high treats the slot as writable even if a sample is still pending.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Producer side: publish a sample into the slot.
    ///
    /// Succeeds when the slot is empty or the consumer is `ready` this
    /// cycle. Returns `Err(word)` — ownership back to the caller — when a
    /// pending sample is stalled in the slot; the pending sample is left
    /// untouched.
    pub fn try_produce(&mut self, word: Sample) -> Result<(), Sample> {
        if self.valid && !self.ready {
            return Err(word);
        }
        self.payload = word;
        self.valid = true;
        Ok(())
    }

    /// Consumer side: complete a transfer, taking the pending sample.
    ///
    /// Returns `None` if no sample is pending. Equivalent to asserting
    /// `ready` and latching `payload` on the same cycle.
    pub fn try_consume(&mut self) -> Option<Sample> {
        if !self.valid {
            return None;
        }
        self.valid = false;
        Some(self.payload)
    }
}

impl Default for SampleStream {
    fn default() -> Self {
        SampleStream::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let s = SampleStream::new();
        assert!(!s.valid());
        assert!(!s.ready());
        assert_eq!(s.peek(), None);
    }

    #[test]
    fn produce_then_consume() {
        let mut s = SampleStream::new();

        s.try_produce(0xBEEF).unwrap();
        assert!(s.valid());
        assert_eq!(s.peek(), Some(0xBEEF));

        assert_eq!(s.try_consume(), Some(0xBEEF));
        assert!(!s.valid());
        assert_eq!(s.try_consume(), None);
    }

    #[test]
    fn peek_does_not_complete_transfer() {
        let mut s = SampleStream::new();
        s.try_produce(7).unwrap();

        assert_eq!(s.peek(), Some(7));
        assert_eq!(s.peek(), Some(7));
        assert!(s.valid());
    }

    #[test]
    fn stalled_slot_rejects_and_returns_word() {
        let mut s = SampleStream::new();
        s.try_produce(1).unwrap();

        // Consumer not ready: the pending sample must survive.
        assert_eq!(s.try_produce(2), Err(2));
        assert_eq!(s.peek(), Some(1));
    }

    #[test]
    fn ready_consumer_allows_overwrite() {
        let mut s = SampleStream::new();
        s.try_produce(1).unwrap();
        s.set_ready(true);

        // The consumer declared acceptance; the transfer of `1` counts as
        // complete even though it never latched the payload.
        s.try_produce(2).unwrap();
        assert_eq!(s.try_consume(), Some(2));
    }

    #[test]
    fn at_most_one_in_flight() {
        let mut s = SampleStream::new();

        s.try_produce(10).unwrap();
        assert_eq!(s.try_produce(11), Err(11));
        assert_eq!(s.try_consume(), Some(10));
        assert_eq!(s.try_consume(), None);

        // Slot free again after the transfer.
        s.try_produce(12).unwrap();
        assert_eq!(s.try_consume(), Some(12));
    }

    #[test]
    fn ready_level_holds_until_changed() {
        let mut s = SampleStream::new();
        s.set_ready(true);
        assert!(s.ready());

        s.try_produce(3).unwrap();
        assert!(s.ready());

        s.set_ready(false);
        assert!(!s.ready());
    }
}
