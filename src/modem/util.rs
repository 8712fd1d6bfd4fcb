use super::{BitTiming, SAMPLE_FULL, SAMPLE_ZERO};

pub(super) fn write_run(buf: &mut Vec<u8>, sample: [u8; 2], n: usize) {
    buf.reserve(n * sample.len());
    for _ in 0..n {
        buf.extend_from_slice(&sample);
    }
}

pub(super) fn write_pulse_pause(buf: &mut Vec<u8>, t: BitTiming) {
    write_run(buf, SAMPLE_FULL, t.pulse);
    write_run(buf, SAMPLE_ZERO, t.pause);
}
