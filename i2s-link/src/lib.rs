//! # i2s-link
//!
//! A `no_std`, cycle-stepped model of an I2S-style serial audio link:
//! bit-level receiver and transmitter state machines joined to producer and
//! consumer code by a single-slot valid/ready sample handshake.
//!
//! There is no hidden clock and no global state. Each component is an owned
//! value advanced one cycle at a time by an explicit `tick` call; everything
//! observable lives in the signal-level outputs and the event counters.
//!
//! ## Architecture
//!
//! | Component | Module | Purpose |
//! |-----------|--------|---------|
//! | [`SampleStream`] | [`stream`] | Single-slot valid/ready handshake |
//! | [`I2sReceiver`] | [`receiver`] | Serial line → W-bit sample words |
//! | [`I2sTransmitter`] | [`transmitter`] | Sample words → serial line + bit clock |
//! | [`SampleWidth`] | [`sample`] | Validated width configuration |
//!
//! The receiver samples an externally driven bit clock; the transmitter
//! generates its own. Both are framed by a shared word-select level. A full
//! duplex link is two independent instances — the components never touch
//! each other's state.
//!
//! ## Quick start
//!
//! ```
//! use i2s_link::{I2sReceiver, I2sTransmitter, RxInputs, SampleWidth};
//!
//! let width = SampleWidth::new(16)?;
//! let mut tx = I2sTransmitter::new(width);
//! let mut rx = I2sReceiver::new(width);
//!
//! // One inactive cycle aligns the receiver's edge detector with the
//! // transmitter's idle-high clock.
//! tx.tick(false);
//! rx.tick(RxInputs {
//!     bit_clock: tx.bit_clock(),
//!     word_select: false,
//!     serial_data: tx.serial_data(),
//! });
//!
//! tx.input_mut().try_produce(0xA5A5).unwrap();
//!
//! let mut received = None;
//! for _ in 0..40 {
//!     tx.tick(true);
//!     rx.tick(RxInputs {
//!         bit_clock: tx.bit_clock(),
//!         word_select: true,
//!         serial_data: tx.serial_data(),
//!     });
//!     if let Some(word) = rx.output_mut().try_consume() {
//!         received = Some(word);
//!         break;
//!     }
//! }
//! assert_eq!(received, Some(0xA5A5));
//! # Ok::<(), i2s_link::WidthError>(())
//! ```
//!
//! ## Flow control
//!
//! Backpressure through the stream is the only flow-control primitive, and
//! every anomaly is a silent, well-defined policy outcome:
//!
//! - a consumer too slow for the receiver costs the *just-completed* word
//!   (drop-newest), counted in [`RxCounters::words_dropped`];
//! - a producer too slow for the transmitter parks the clock and holds the
//!   data line, counted in [`TxCounters::starved_ticks`];
//! - a mid-word `word_select` drop abandons the partial word on both sides,
//!   counted in [`RxCounters::partial_discards`] /
//!   [`TxCounters::words_aborted`].
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `defmt` | no | `defmt::Format` on public state types |
//! | `serde` | no | `Serialize` on configuration and counter types |

#![no_std]
#![deny(unsafe_code)]

pub mod constants;
pub mod receiver;
pub mod sample;
pub mod stream;
pub mod transmitter;

pub use receiver::{I2sReceiver, RxCounters, RxInputs};
pub use sample::{Sample, SampleWidth, WidthError};
pub use stream::SampleStream;
pub use transmitter::{I2sTransmitter, TxCounters};
