use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Receiver group selected by the DIP switches on the outlet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Group {
    A,
    B,
    C,
    D,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::A, Group::B, Group::C, Group::D];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'A' => Some(Group::A),
            'B' => Some(Group::B),
            'C' => Some(Group::C),
            'D' => Some(Group::D),
            _ => None,
        }
    }
}

/// Outlet within a group.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Address {
    One,
    Two,
    Three,
}

impl Address {
    pub const ALL: [Address; 3] = [Address::One, Address::Two, Address::Three];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn digit(self) -> char {
        (b'1' + self as u8) as char
    }

    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Address::One),
            '2' => Some(Address::Two),
            '3' => Some(Address::Three),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Command {
    pub group: Group,
    pub address: Address,
    pub state: bool,
}

impl Command {
    pub fn new(group: Group, address: Address, state: bool) -> Self {
        Self {
            group,
            address,
            state,
        }
    }

    /// Every command, ordered by group, address, then on before off.
    pub fn all() -> impl Iterator<Item = Command> {
        Group::ALL.into_iter().flat_map(|g| {
            Address::ALL
                .into_iter()
                .flat_map(move |a| [true, false].map(|s| Command::new(g, a, s)))
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.state { '+' } else { '-' };
        write!(f, "{}{}{}", self.group.letter(), self.address.digit(), sign)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseCommandError {
    #[error("command id must be 3 characters, got {0}")]
    Length(usize),
    #[error("unknown group {0:?}, expected A-D")]
    Group(char),
    #[error("unknown address {0:?}, expected 1-3")]
    Address(char),
    #[error("unknown state {0:?}, expected + or -")]
    State(char),
}

/// Parses the `<group><address><sign>` form used by the HTTP API, e.g. `B3-`.
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let &[g, a, st] = chars.as_slice() else {
            return Err(ParseCommandError::Length(chars.len()));
        };
        let group = Group::from_letter(g).ok_or(ParseCommandError::Group(g))?;
        let address = Address::from_digit(a).ok_or(ParseCommandError::Address(a))?;
        let state = match st {
            '+' => true,
            '-' => false,
            other => return Err(ParseCommandError::State(other)),
        };
        Ok(Command::new(group, address, state))
    }
}
