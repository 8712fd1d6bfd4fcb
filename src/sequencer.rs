use std::io::Write;
use std::thread::JoinHandle;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

use crate::command::Command;
use crate::modem::{OokModem, BYTES_PER_SAMPLE};

pub type Sink = Box<dyn Write + Send>;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SubmitError {
    #[error("transmission sequencer is no longer running")]
    Closed,
}

/// Cloneable submission side of a [`Sequencer`].
#[derive(Clone, Debug)]
pub struct SequencerHandle {
    tx: Sender<Command>,
}

impl SequencerHandle {
    /// Blocks until the writer thread takes `cmd`.
    pub fn submit(&self, cmd: Command) -> Result<(), SubmitError> {
        self.tx.send(cmd).map_err(|_| SubmitError::Closed)
    }
}

/// Single writer thread that owns the sink and serializes transmissions.
pub struct Sequencer {
    handle: SequencerHandle,
    join: JoinHandle<anyhow::Result<()>>,
}

impl Sequencer {
    pub fn start(modem: OokModem, sink: Sink) -> anyhow::Result<Self> {
        // Zero capacity: a send completes only once the writer has taken the command.
        let (tx, rx) = crossbeam_channel::bounded::<Command>(0);
        let join = std::thread::Builder::new()
            .name("rf-outlet-sequencer".to_string())
            .spawn(move || {
                let res = writer_loop(&modem, sink, rx);
                if let Err(e) = &res {
                    tracing::error!("sequencer stopped: {e:#}");
                }
                res
            })
            .context("spawn sequencer thread")?;
        Ok(Self {
            handle: SequencerHandle { tx },
            join,
        })
    }

    pub fn handle(&self) -> SequencerHandle {
        self.handle.clone()
    }

    /// Waits until every handle is dropped and the last transmission is
    /// written. Returns the sink error if the writer stopped early.
    pub fn join(self) -> anyhow::Result<()> {
        drop(self.handle);
        match self.join.join() {
            Ok(res) => res,
            Err(_) => anyhow::bail!("sequencer thread panicked"),
        }
    }
}

fn write_out(sink: &mut Sink, buf: &[u8]) -> anyhow::Result<()> {
    sink.write_all(buf).context("write iq samples")?;
    sink.flush().context("flush iq sink")?;
    Ok(())
}

fn writer_loop(modem: &OokModem, mut sink: Sink, rx: Receiver<Command>) -> anyhow::Result<()> {
    let mut buf = Vec::with_capacity(modem.transmission_samples() * BYTES_PER_SAMPLE);

    // Prime the transmitter so it never falls back to its default carrier.
    modem.write_flush(&mut buf);
    write_out(&mut sink, &buf)?;

    for cmd in rx {
        buf.clear();
        modem.write_transmission(&cmd, &mut buf);
        write_out(&mut sink, &buf).with_context(|| format!("transmit {cmd}"))?;
        tracing::debug!(%cmd, bytes = buf.len(), "transmitted");
    }
    Ok(())
}
