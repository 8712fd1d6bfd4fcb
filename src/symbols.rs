use std::fmt;

use crate::command::Command;

// Slot counts, in 2-bit symbols.
pub const GROUP_SLOTS: usize = 4;
pub const ADDRESS_SLOTS: usize = 3;
pub const PAD_SLOTS: usize = 4;

pub const PAD_SYMBOL: [u8; 2] = [0, 1];
pub const MARK_SYMBOL: [u8; 2] = [0, 0];
pub const STATE_ON: [u8; 2] = [1, 1];
pub const STATE_OFF: [u8; 2] = [0, 0];

pub const BIT_LEN: usize = (GROUP_SLOTS + ADDRESS_SLOTS + PAD_SLOTS) * 2 + 2;

/// Bits of one command, one `0`/`1` per byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BitString([u8; BIT_LEN]);

impl BitString {
    pub fn bits(&self) -> &[u8; BIT_LEN] {
        &self.0
    }

    pub fn symbols(&self) -> impl Iterator<Item = [u8; 2]> + '_ {
        self.0.chunks_exact(2).map(|s| [s[0], s[1]])
    }

    pub fn group_symbols(&self) -> impl Iterator<Item = [u8; 2]> + '_ {
        self.symbols().take(GROUP_SLOTS)
    }

    pub fn address_symbols(&self) -> impl Iterator<Item = [u8; 2]> + '_ {
        self.symbols().skip(GROUP_SLOTS).take(ADDRESS_SLOTS)
    }

    pub fn pad_symbols(&self) -> impl Iterator<Item = [u8; 2]> + '_ {
        self.symbols().skip(GROUP_SLOTS + ADDRESS_SLOTS).take(PAD_SLOTS)
    }

    pub fn state_symbol(&self) -> [u8; 2] {
        [self.0[BIT_LEN - 2], self.0[BIT_LEN - 1]]
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            f.write_str(if b == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

fn write_one_hot(out: &mut [u8], slots: usize, selected: usize) {
    for (slot, sym) in out.chunks_exact_mut(2).take(slots).enumerate() {
        let src = if slot == selected {
            MARK_SYMBOL
        } else {
            PAD_SYMBOL
        };
        sym.copy_from_slice(&src);
    }
}

/// One-hot group and address slots, constant padding, then the state symbol.
pub fn encode(cmd: &Command) -> BitString {
    let mut bits = [0u8; BIT_LEN];
    let (group, rest) = bits.split_at_mut(GROUP_SLOTS * 2);
    let (address, rest) = rest.split_at_mut(ADDRESS_SLOTS * 2);
    let (pad, state) = rest.split_at_mut(PAD_SLOTS * 2);

    write_one_hot(group, GROUP_SLOTS, cmd.group.index());
    write_one_hot(address, ADDRESS_SLOTS, cmd.address.index());
    for sym in pad.chunks_exact_mut(2) {
        sym.copy_from_slice(&PAD_SYMBOL);
    }
    state.copy_from_slice(if cmd.state { &STATE_ON } else { &STATE_OFF });

    BitString(bits)
}
