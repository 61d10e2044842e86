//! Parallel-to-serial drive (I2S transmit direction).
//!
//! [`I2sTransmitter`] pulls W-bit words from the consumer side of a
//! single-slot [`SampleStream`], generates its own bit clock, and shifts
//! each word onto the serial data line MSB-first, framed by an externally
//! supplied word-select level.
//!
//! ## Signal contract
//!
//! ```text
//!                    ┌────────────────┐
//!  SampleStream ────►│                ├──► bit_clock
//!  (payload,         │ I2sTransmitter │
//!   valid / ready)   │                ├──► serial_data
//!  word_select ─────►│                │
//!                    └────────────────┘
//! ```
//!
//! Each bit occupies one full clock period: the data line is driven while
//! the clock falls, and the bit counter advances while it rises, so the
//! bit is stable one tick ahead of the rising edge a receiver samples.
//!
//! ## Timing
//!
//! One word takes `2W + 1` ticks: a loading tick (clock parked high), then
//! `W` full clock periods of two ticks each:
//!
//! ```text
//! tick:         0       1       2       3       4      ...   2W
//! phase:      Loaded | Shifting ──────────────────────────► Loaded
//! bit_clock:  ──────┐       ┌───────┐       ┌──     ...   ──────
//!                   └───────┘       └───────┘
//! serial_data:      |── msb ────|── msb-1 ──|──     ...
//! ready:        1       0       0       0       0   ...      1
//! ```
//!
//! The stream's `ready` is asserted in every cycle the machine is not
//! actively shifting, so a producer that keeps the slot topped up achieves
//! back-to-back words with a single loading cycle between them.

use crate::sample::{Sample, SampleWidth};
use crate::stream::SampleStream;

/// Transmit phase. Exactly one holds per tick; the mutually exclusive
/// next-state writes all live in one `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum TxPhase {
    /// `word_select` low: counter cleared, clock parked high.
    Idle,
    /// `word_select` high with no word latched: inviting the stream.
    Loaded,
    /// Clocking a latched word out, one bit per full clock period.
    Shifting,
}

/// Transmitter event counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TxCounters {
    words_sent: u32,
    words_aborted: u32,
    starved_ticks: u32,
}

impl TxCounters {
    /// Words shifted out in full.
    pub const fn words_sent(&self) -> u32 {
        self.words_sent
    }

    /// In-progress words abandoned by a mid-word `word_select` drop.
    pub const fn words_aborted(&self) -> u32 {
        self.words_aborted
    }

    /// Ticks spent loadable with nothing valid in the stream.
    pub const fn starved_ticks(&self) -> u32 {
        self.starved_ticks
    }
}

/// Serial transmitter with an internally generated bit clock.
///
/// Owns the consumer side of its input [`SampleStream`]; producers reach
/// the stream through [`input_mut()`](Self::input_mut) and submit words
/// with [`SampleStream::try_produce`].
pub struct I2sTransmitter {
    width: SampleWidth,
    phase: TxPhase,
    /// Bits not yet fully clocked out, `0..=W`.
    bits_left: usize,
    shift: Sample,
    bit_clock: bool,
    serial_data: bool,
    input: SampleStream,
    counters: TxCounters,
}

impl I2sTransmitter {
    /// Create a transmitter for `width`-bit samples.
    ///
    /// The bit clock powers up at its idle-high level; the data line powers
    /// up low and afterwards always holds the last bit driven.
    pub const fn new(width: SampleWidth) -> Self {
        I2sTransmitter {
            width,
            phase: TxPhase::Idle,
            bits_left: 0,
            shift: 0,
            bit_clock: true,
            serial_data: false,
            input: SampleStream::new(),
            counters: TxCounters {
                words_sent: 0,
                words_aborted: 0,
                starved_ticks: 0,
            },
        }
    }

    /// Advance one cycle of the transmitter's driving clock.
    pub fn tick(&mut self, word_select: bool) {
        if !word_select {
            if matches!(self.phase, TxPhase::Shifting) {
                // Mid-word framing drop: the remaining bits are abandoned
                // with no partial-word delivery.
                self.counters.words_aborted += 1;
            }
            self.phase = TxPhase::Idle;
            self.bits_left = 0;
            self.bit_clock = true;
            self.input.set_ready(true);
            return;
        }

        match self.phase {
            TxPhase::Idle | TxPhase::Loaded => match self.input.try_consume() {
                Some(word) => {
                    self.shift = word & self.width.mask();
                    self.bits_left = self.width.get();
                    self.phase = TxPhase::Shifting;
                    self.input.set_ready(false);
                }
                None => {
                    self.phase = TxPhase::Loaded;
                    self.input.set_ready(true);
                    self.counters.starved_ticks += 1;
                }
            },
            TxPhase::Shifting => {
                let falling = self.bit_clock;
                self.bit_clock = !self.bit_clock;
                if falling {
                    // Low half-period: present the next bit so it is stable
                    // at the rising edge the far end samples.
                    self.serial_data = (self.shift >> (self.width.get() - 1)) & 1 != 0;
                    self.shift = (self.shift << 1) & self.width.mask();
                } else {
                    self.bits_left -= 1;
                    if self.bits_left == 0 {
                        self.phase = TxPhase::Loaded;
                        self.input.set_ready(true);
                        self.counters.words_sent += 1;
                    }
                }
            }
        }
    }

    /// Generated bit clock level (idle-high).
    pub const fn bit_clock(&self) -> bool {
        self.bit_clock
    }

    /// Serial data line level; holds the last driven bit between words.
    pub const fn serial_data(&self) -> bool {
        self.serial_data
    }

    /// Whether a word is currently being clocked out.
    pub const fn is_shifting(&self) -> bool {
        matches!(self.phase, TxPhase::Shifting)
    }

    /// The stream `ready` level: asserted whenever not shifting.
    pub const fn ready(&self) -> bool {
        self.input.ready()
    }

    /// Configured sample width.
    pub const fn sample_width(&self) -> SampleWidth {
        self.width
    }

    /// Event counters.
    pub const fn counters(&self) -> TxCounters {
        self.counters
    }

    /// Input stream, read-only view.
    pub const fn input(&self) -> &SampleStream {
        &self.input
    }

    /// Input stream, producer side (`try_produce`).
    pub fn input_mut(&mut self) -> &mut SampleStream {
        &mut self.input
    }
}
