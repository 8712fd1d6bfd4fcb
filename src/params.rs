use anyhow::Context;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
/// PHY timing of the OOK transmission.
pub struct Params {
    pub sample_rate_hz: u32,
    pub bit_rate: u32,
    /// Pulse share of a `0` bit, in percent. A `1` bit uses the complement.
    pub duty_cycle_pct: u32,
    /// Extra copies sent after the first one.
    pub repeats: usize,
    /// Zero samples before and after each transmission, sized to displace
    /// the transmitter's input FIFO.
    pub flush_samples: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            sample_rate_hz: 150_000,
            bit_rate: 751,
            duty_cycle_pct: 30,
            repeats: 5,
            flush_samples: 32_000,
        }
    }
}

impl Params {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("read params file {path}"))?;
        let params: Params = toml::from_str(&content).context("parse params toml")?;
        Ok(params)
    }

    pub fn symbol_len(&self) -> usize {
        (self.sample_rate_hz / self.bit_rate) as usize
    }

    pub fn bit0_pulse_len(&self) -> usize {
        self.symbol_len() * (self.duty_cycle_pct as usize) / 100
    }

    pub fn bit0_pause_len(&self) -> usize {
        self.symbol_len() - self.bit0_pulse_len()
    }

    /// Silence between two repetitions: 6.5 symbols.
    pub fn blank_len(&self) -> usize {
        6 * self.symbol_len() + self.symbol_len() / 2
    }

    pub fn transmissions(&self) -> usize {
        self.repeats + 1
    }
}
