//! Software loopback — transmitter wired straight back to receiver.
//!
//! Clocks a handful of 16-bit samples through a full link simulation and
//! prints what arrives on the far side, together with the event counters.
//! Useful for eyeballing the cycle behavior without any hardware:
//!
//! ```text
//! producer → I2sTransmitter ─ bit_clock / serial_data ─► I2sReceiver → consumer
//! ```

use i2s_link::{I2sReceiver, I2sTransmitter, RxInputs, Sample, SampleWidth};

fn link_tick(tx: &mut I2sTransmitter, rx: &mut I2sReceiver, word_select: bool) {
    tx.tick(word_select);
    rx.tick(RxInputs {
        bit_clock: tx.bit_clock(),
        word_select,
        serial_data: tx.serial_data(),
    });
}

fn main() {
    let width = SampleWidth::new(16).unwrap();
    let mut tx = I2sTransmitter::new(width);
    let mut rx = I2sReceiver::new(width);

    // Settle the receiver's edge detector against the idle-high clock.
    link_tick(&mut tx, &mut rx, false);

    let samples: [Sample; 4] = [0xA5A5, 0x1234, 0x0FF0, 0xBEEF];
    let mut next = 0;
    let mut got = 0;
    let mut cycle = 0u32;

    println!("i2s-link loopback, W = {}", width.get());

    while got < samples.len() {
        if next < samples.len() && !tx.input().valid() {
            tx.input_mut().try_produce(samples[next]).unwrap();
            next += 1;
        }

        link_tick(&mut tx, &mut rx, true);
        cycle += 1;

        if let Some(word) = rx.output_mut().try_consume() {
            println!("cycle {cycle:4}: received {word:#06X}");
            got += 1;
        }
    }

    let tx_stats = tx.counters();
    let rx_stats = rx.counters();
    println!(
        "tx: {} sent, {} aborted, {} starved ticks",
        tx_stats.words_sent(),
        tx_stats.words_aborted(),
        tx_stats.starved_ticks()
    );
    println!(
        "rx: {} produced, {} dropped, {} partial discards",
        rx_stats.words_produced(),
        rx_stats.words_dropped(),
        rx_stats.partial_discards()
    );
}
