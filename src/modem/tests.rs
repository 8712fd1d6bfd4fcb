use super::*;
use crate::command::{Address, Command, Group};
use crate::symbols::{encode, BIT_LEN};

/// Run-length decode of an IQ byte stream: (is_full, samples).
fn runs(bytes: &[u8]) -> Vec<(bool, usize)> {
    assert_eq!(bytes.len() % BYTES_PER_SAMPLE, 0);
    let mut out: Vec<(bool, usize)> = Vec::new();
    for s in bytes.chunks_exact(BYTES_PER_SAMPLE) {
        let full = match [s[0], s[1]] {
            SAMPLE_FULL => true,
            SAMPLE_ZERO => false,
            other => panic!("unexpected sample {other:?}"),
        };
        match out.last_mut() {
            Some((f, n)) if *f == full => *n += 1,
            _ => out.push((full, 1)),
        }
    }
    out
}

fn a1_on() -> Command {
    Command::new(Group::A, Address::One, true)
}

#[test]
fn bit_timing_has_fixed_duration() -> anyhow::Result<()> {
    let modem = OokModem::new(Params::default())?;
    assert_eq!(modem.symbol_len(), 199);
    assert_eq!(modem.bit_timing(0), BitTiming { pulse: 59, pause: 140 });
    assert_eq!(modem.bit_timing(1), BitTiming { pulse: 140, pause: 59 });
    for bit in [0u8, 1] {
        assert_eq!(modem.bit_timing(bit).total(), modem.symbol_len());
    }

    let p = Params {
        sample_rate_hz: 48_000,
        bit_rate: 1_000,
        duty_cycle_pct: 25,
        ..Params::default()
    };
    let modem = OokModem::new(p)?;
    for bit in [0u8, 1] {
        assert_eq!(modem.bit_timing(bit).total(), 48);
    }
    assert_eq!(modem.bit_timing(0).pulse, 12);
    Ok(())
}

#[test]
fn write_bit_byte_layout() -> anyhow::Result<()> {
    let modem = OokModem::new(Params::default())?;
    let mut buf = Vec::new();
    modem.write_bit(0, &mut buf);
    assert_eq!(buf.len(), 199 * BYTES_PER_SAMPLE);
    assert!(buf[..59 * 2].chunks_exact(2).all(|s| s == [255, 127]));
    assert!(buf[59 * 2..].chunks_exact(2).all(|s| s == [127, 127]));

    buf.clear();
    modem.write_bit(1, &mut buf);
    assert_eq!(runs(&buf), vec![(true, 140), (false, 59)]);
    Ok(())
}

#[test]
fn transmission_framing() -> anyhow::Result<()> {
    let modem = OokModem::new(Params::default())?;
    let p = &modem.p;
    let cmd = a1_on();
    let mut buf = Vec::new();
    modem.write_transmission(&cmd, &mut buf);
    assert_eq!(buf.len(), modem.transmission_samples() * BYTES_PER_SAMPLE);

    let r = runs(&buf);
    assert_eq!(r.first(), Some(&(false, p.flush_samples)));
    // Last bit of an "on" command is a 1: its short pause merges into the flush.
    assert_eq!(r.last(), Some(&(false, 59 + p.flush_samples)));

    let pulses: Vec<usize> = r.iter().filter(|(f, _)| *f).map(|(_, n)| *n).collect();
    assert_eq!(pulses.len(), 6 * BIT_LEN + 5);

    let bits = encode(&cmd);
    let mut expect = Vec::new();
    for i in 0..6 {
        expect.extend_from_slice(bits.bits());
        if i < 5 {
            expect.push(0);
        }
    }
    let got: Vec<u8> = pulses
        .iter()
        .map(|&n| match n {
            59 => 0,
            140 => 1,
            other => panic!("unexpected pulse length {other}"),
        })
        .collect();
    assert_eq!(got, expect);

    // Continuation bit pause followed by the blank gap, once per separator.
    let gap = modem.bit_timing(0).pause + modem.blank_len();
    let gaps = r.iter().filter(|&&(f, n)| !f && n == gap).count();
    assert_eq!(gaps, 5);
    Ok(())
}

#[test]
fn off_command_ends_with_long_pause() -> anyhow::Result<()> {
    let modem = OokModem::new(Params::default())?;
    let mut buf = Vec::new();
    modem.write_transmission(&Command::new(Group::C, Address::Two, false), &mut buf);
    let r = runs(&buf);
    assert_eq!(r.last(), Some(&(false, 140 + modem.p.flush_samples)));
    Ok(())
}

#[test]
fn transmission_is_deterministic() -> anyhow::Result<()> {
    let modem = OokModem::new(Params::default())?;
    for cmd in Command::all() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        modem.write_transmission(&cmd, &mut a);
        modem.write_transmission(&cmd, &mut b);
        assert!(a == b, "cmd={cmd}");
    }
    Ok(())
}

#[test]
fn transmission_appends_to_existing_buffer() -> anyhow::Result<()> {
    let modem = OokModem::new(Params::default())?;
    let mut alone = Vec::new();
    modem.write_transmission(&a1_on(), &mut alone);

    let mut buf = vec![1u8, 2, 3, 4];
    modem.write_transmission(&a1_on(), &mut buf);
    assert_eq!(&buf[..4], &[1, 2, 3, 4]);
    assert!(buf[4..] == alone[..]);
    Ok(())
}

#[test]
fn single_copy_has_no_separator() -> anyhow::Result<()> {
    let p = Params {
        repeats: 0,
        flush_samples: 100,
        ..Params::default()
    };
    let modem = OokModem::new(p)?;
    let mut buf = Vec::new();
    modem.write_transmission(&a1_on(), &mut buf);
    assert_eq!(buf.len(), (200 + BIT_LEN * 199) * BYTES_PER_SAMPLE);
    let pulses = runs(&buf).iter().filter(|(f, _)| *f).count();
    assert_eq!(pulses, BIT_LEN);
    Ok(())
}

#[test]
fn rejects_inconsistent_params() {
    let bad = [
        Params {
            bit_rate: 0,
            ..Params::default()
        },
        Params {
            bit_rate: 200_000,
            ..Params::default()
        },
        Params {
            duty_cycle_pct: 0,
            ..Params::default()
        },
        Params {
            duty_cycle_pct: 100,
            ..Params::default()
        },
        Params {
            sample_rate_hz: 2_000,
            bit_rate: 1_000,
            ..Params::default()
        },
        Params {
            repeats: usize::MAX,
            ..Params::default()
        },
        Params {
            repeats: i64::MAX as usize,
            ..Params::default()
        },
        Params {
            flush_samples: usize::MAX / 2,
            ..Params::default()
        },
    ];
    for p in bad {
        assert!(OokModem::new(p.clone()).is_err(), "params={p:?}");
    }
}

#[test]
fn huge_repeats_from_toml_is_rejected() -> anyhow::Result<()> {
    let p: Params = toml::from_str("repeats = 9223372036854775807\n")?;
    let err = match OokModem::new(p) {
        Ok(_) => anyhow::bail!("overflowing repeats accepted"),
        Err(e) => e,
    };
    assert!(err.to_string().contains("overflows"), "err={err:#}");
    Ok(())
}
