use crate::params::Params;

mod tx;
mod util;

/// Full-amplitude IQ sample at zero carrier offset.
pub const SAMPLE_FULL: [u8; 2] = [255, 127];
/// Centered (silent) IQ sample.
pub const SAMPLE_ZERO: [u8; 2] = [127, 127];

pub const BYTES_PER_SAMPLE: usize = 2;

/// Pulse/pause split of one symbol slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BitTiming {
    pub pulse: usize,
    pub pause: usize,
}

impl BitTiming {
    pub fn total(&self) -> usize {
        self.pulse + self.pause
    }
}

pub struct OokModem {
    pub p: Params,
    bit0: BitTiming,
    bit1: BitTiming,
    blank_len: usize,
    transmission_samples: usize,
}

impl OokModem {
    pub fn new(p: Params) -> anyhow::Result<Self> {
        if p.bit_rate == 0 {
            anyhow::bail!("Params inconsistent: bit_rate must be > 0");
        }
        if p.bit_rate > p.sample_rate_hz {
            anyhow::bail!(
                "Params inconsistent: bit_rate {} exceeds sample_rate_hz {}",
                p.bit_rate,
                p.sample_rate_hz
            );
        }
        if !(1..=99).contains(&p.duty_cycle_pct) {
            anyhow::bail!("Params inconsistent: duty_cycle_pct must be in 1..=99");
        }
        let bit0 = BitTiming {
            pulse: p.bit0_pulse_len(),
            pause: p.bit0_pause_len(),
        };
        if bit0.pulse == 0 || bit0.pause == 0 {
            anyhow::bail!(
                "Params inconsistent: symbol of {} samples too short for {}% duty cycle",
                p.symbol_len(),
                p.duty_cycle_pct
            );
        }
        let bit1 = BitTiming {
            pulse: bit0.pause,
            pause: bit0.pulse,
        };
        let blank_len = p.blank_len();
        let Some(transmission_samples) = tx::checked_transmission_samples(&p, blank_len) else {
            anyhow::bail!(
                "Params inconsistent: repeats {} with flush_samples {} overflows the transmission size",
                p.repeats,
                p.flush_samples
            );
        };
        Ok(Self {
            p,
            bit0,
            bit1,
            blank_len,
            transmission_samples,
        })
    }

    pub fn symbol_len(&self) -> usize {
        self.p.symbol_len()
    }

    pub fn bit_timing(&self, bit: u8) -> BitTiming {
        if bit == 0 {
            self.bit0
        } else {
            self.bit1
        }
    }

    pub fn blank_len(&self) -> usize {
        self.blank_len
    }
}

#[cfg(test)]
mod tests;
