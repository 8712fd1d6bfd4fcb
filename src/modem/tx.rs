use super::util::{write_pulse_pause, write_run};
use super::{OokModem, BYTES_PER_SAMPLE, SAMPLE_ZERO};
use crate::command::Command;
use crate::params::Params;
use crate::symbols::{encode, BitString, BIT_LEN};

impl OokModem {
    pub fn write_bit(&self, bit: u8, buf: &mut Vec<u8>) {
        write_pulse_pause(buf, self.bit_timing(bit));
    }

    pub fn write_bits(&self, bits: &BitString, buf: &mut Vec<u8>) {
        for &b in bits.bits() {
            self.write_bit(b, buf);
        }
    }

    pub fn write_flush(&self, buf: &mut Vec<u8>) {
        write_run(buf, SAMPLE_ZERO, self.p.flush_samples);
    }

    /// Flush, `repeats + 1` copies of the command separated by a `0`
    /// continuation bit and a blank gap, flush.
    pub fn write_transmission(&self, cmd: &Command, buf: &mut Vec<u8>) {
        let bits = encode(cmd);
        buf.reserve(self.transmission_samples() * BYTES_PER_SAMPLE);

        self.write_flush(buf);
        let n = self.p.transmissions();
        for i in 0..n {
            self.write_bits(&bits, buf);
            if i + 1 < n {
                self.write_bit(0, buf);
                write_run(buf, SAMPLE_ZERO, self.blank_len);
            }
        }
        self.write_flush(buf);
    }

    pub fn transmission_samples(&self) -> usize {
        self.transmission_samples
    }
}

/// Samples in one transmission, `None` if it (or its byte size) overflows.
pub(super) fn checked_transmission_samples(p: &Params, blank_len: usize) -> Option<usize> {
    let n = p.repeats.checked_add(1)?;
    let sym = p.symbol_len();
    let copies = n.checked_mul(BIT_LEN)?.checked_mul(sym)?;
    let separators = p.repeats.checked_mul(sym.checked_add(blank_len)?)?;
    let samples = p
        .flush_samples
        .checked_mul(2)?
        .checked_add(copies)?
        .checked_add(separators)?;
    samples.checked_mul(BYTES_PER_SAMPLE)?;
    Some(samples)
}
