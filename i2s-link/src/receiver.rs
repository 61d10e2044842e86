//! Serial-to-parallel capture (I2S receive direction).
//!
//! [`I2sReceiver`] watches an externally driven bit clock for rising edges,
//! shifts the serial data line into a W-bit accumulator MSB-first, and
//! publishes each completed word through a single-slot [`SampleStream`].
//!
//! ## Signal contract
//!
//! ```text
//!              ┌──────────────┐
//!  bit_clock ─►│              │
//!  word_select►│ I2sReceiver  ├──► SampleStream (payload, valid / ready)
//!  serial_data►│              │
//!              └──────────────┘
//! ```
//!
//! All three inputs are plain levels sampled once per
//! [`tick()`](I2sReceiver::tick); the receiver's own driving clock is the
//! tick rate itself. While `word_select` is low the bit counter is pinned
//! to zero, so the active frame always starts aligned to a `word_select`
//! rise.
//!
//! ## Overflow policy
//!
//! The receiver never stalls the wire. If a word completes while the
//! previous one is still pending and the consumer is not ready, the
//! *just-completed* word is discarded (drop-newest) and counted in
//! [`RxCounters::words_dropped`]; the pending word stays available.
//!
//! Single-channel capture: words are framed on the `word_select`-high
//! (right-channel) phase. A stereo variant would run a second accumulator
//! and stream on the low phase.

use crate::sample::{Sample, SampleWidth};
use crate::stream::SampleStream;

/// Input signal levels for one receiver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxInputs {
    /// Externally driven bit clock; data is sampled on its rising edge.
    pub bit_clock: bool,
    /// Framing level: high while the active channel's word is on the wire.
    pub word_select: bool,
    /// Serial data line.
    pub serial_data: bool,
}

/// Receiver event counters.
///
/// Every anomaly the receiver handles is a silent, well-defined policy
/// outcome; these counters are the only place the outcomes are visible.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RxCounters {
    words_produced: u32,
    words_dropped: u32,
    partial_discards: u32,
}

impl RxCounters {
    /// Words published into the output stream.
    pub const fn words_produced(&self) -> u32 {
        self.words_produced
    }

    /// Completed words discarded because the slot was stalled.
    pub const fn words_dropped(&self) -> u32 {
        self.words_dropped
    }

    /// Partial accumulations discarded at a `word_select` drop.
    pub const fn partial_discards(&self) -> u32 {
        self.partial_discards
    }
}

/// Bit-clock-synchronous serial receiver.
///
/// Owns the producer side of its output [`SampleStream`]; consumers reach
/// the stream through [`output_mut()`](Self::output_mut) and take words
/// with [`SampleStream::try_consume`].
pub struct I2sReceiver {
    width: SampleWidth,
    /// Previous-tick bit clock level, for rising-edge detection.
    bit_clock_prev: bool,
    /// Bits accumulated in the current frame, `0..W`.
    bit_count: usize,
    shift: Sample,
    /// A word finished on the previous tick and awaits publication.
    word_done: bool,
    output: SampleStream,
    counters: RxCounters,
}

impl I2sReceiver {
    /// Create a receiver for `width`-bit samples.
    pub const fn new(width: SampleWidth) -> Self {
        I2sReceiver {
            width,
            bit_clock_prev: false,
            bit_count: 0,
            shift: 0,
            word_done: false,
            output: SampleStream::new(),
            counters: RxCounters {
                words_produced: 0,
                words_dropped: 0,
                partial_discards: 0,
            },
        }
    }

    /// Advance one cycle of the receiver's driving clock.
    ///
    /// A word that completed on the previous tick is published first,
    /// against this cycle's consumer state: into a free slot, over a slot
    /// whose consumer is ready, or — if the slot is stalled — discarded.
    /// Then the current input levels are processed: `word_select` low pins
    /// the bit counter at zero; a `bit_clock` rising edge while it is high
    /// shifts `serial_data` into the accumulator.
    pub fn tick(&mut self, inputs: RxInputs) {
        if self.word_done {
            self.word_done = false;
            match self.output.try_produce(self.shift) {
                Ok(()) => self.counters.words_produced += 1,
                Err(_) => self.counters.words_dropped += 1,
            }
        }

        let rising = !self.bit_clock_prev && inputs.bit_clock;
        self.bit_clock_prev = inputs.bit_clock;

        if !inputs.word_select {
            if self.bit_count != 0 {
                self.counters.partial_discards += 1;
                self.bit_count = 0;
            }
        } else if rising {
            self.shift =
                ((self.shift << 1) | inputs.serial_data as Sample) & self.width.mask();
            if self.bit_count == self.width.get() - 1 {
                // W-th bit of the frame: the word is complete. The counter
                // wraps here, not at the next power of two, so back-to-back
                // words stay framed for any W.
                self.word_done = true;
                self.bit_count = 0;
            } else {
                self.bit_count += 1;
            }
        }
    }

    /// Configured sample width.
    pub const fn sample_width(&self) -> SampleWidth {
        self.width
    }

    /// Bits accumulated in the current frame.
    pub const fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Event counters.
    pub const fn counters(&self) -> RxCounters {
        self.counters
    }

    /// Output stream, read-only view.
    pub const fn output(&self) -> &SampleStream {
        &self.output
    }

    /// Output stream, consumer side (`set_ready` / `try_consume`).
    pub fn output_mut(&mut self) -> &mut SampleStream {
        &mut self.output
    }
}
