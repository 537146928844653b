// src/core/outcome.rs

//! Discrete outcome labels and their canonical ordering.

use std::fmt;
use std::hash::Hash;

/// A finite set of mutually exclusive measurement outcomes.
///
/// `ALL` fixes the canonical ordering used by cumulative-probability
/// sampling; two implementations that agree on the ordering draw the same
/// outcome from the same uniform value. `values` are the signed observable
/// readings attached to an outcome (for example `+1`/`-1` for a spin),
/// and every outcome of a type reports the same number of them.
pub trait Outcome: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Every outcome, in canonical order.
    const ALL: &'static [Self];
    /// Names of the observables reported by [`Outcome::values`].
    const OBSERVABLES: &'static [&'static str];

    /// Short label used in reports (e.g. `"++"`).
    fn label(&self) -> &'static str;

    /// Observable readings for this outcome.
    fn values(&self) -> &'static [i32];

    /// Position of this outcome in [`Outcome::ALL`].
    fn index(&self) -> usize {
        Self::ALL.iter().position(|o| o == self).unwrap_or(0)
    }
}

/// Result of a spin-1/2 measurement along some axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Spin {
    /// Deflected up, eigenvalue `+1`.
    Up,
    /// Deflected down, eigenvalue `-1`.
    Down,
}

impl Spin {
    /// The eigenvalue `+1` or `-1`.
    pub fn sign(self) -> i32 {
        match self {
            Spin::Up => 1,
            Spin::Down => -1,
        }
    }
}

impl Outcome for Spin {
    const ALL: &'static [Self] = &[Spin::Up, Spin::Down];
    const OBSERVABLES: &'static [&'static str] = &["sigma"];

    fn label(&self) -> &'static str {
        match self {
            Spin::Up => "+",
            Spin::Down => "-",
        }
    }

    fn values(&self) -> &'static [i32] {
        match self {
            Spin::Up => &[1],
            Spin::Down => &[-1],
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}1", self.label())
    }
}

/// Joint result of measuring detector A (first qubit) then detector B (second qubit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointSpin {
    /// A = +1, B = +1
    PlusPlus,
    /// A = +1, B = -1
    PlusMinus,
    /// A = -1, B = +1
    MinusPlus,
    /// A = -1, B = -1
    MinusMinus,
}

impl JointSpin {
    /// Combines two single-detector results.
    pub fn from_pair(a: Spin, b: Spin) -> Self {
        match (a, b) {
            (Spin::Up, Spin::Up) => JointSpin::PlusPlus,
            (Spin::Up, Spin::Down) => JointSpin::PlusMinus,
            (Spin::Down, Spin::Up) => JointSpin::MinusPlus,
            (Spin::Down, Spin::Down) => JointSpin::MinusMinus,
        }
    }

    /// Result seen by detector A.
    pub fn first(self) -> Spin {
        match self {
            JointSpin::PlusPlus | JointSpin::PlusMinus => Spin::Up,
            JointSpin::MinusPlus | JointSpin::MinusMinus => Spin::Down,
        }
    }

    /// Result seen by detector B.
    pub fn second(self) -> Spin {
        match self {
            JointSpin::PlusPlus | JointSpin::MinusPlus => Spin::Up,
            JointSpin::PlusMinus | JointSpin::MinusMinus => Spin::Down,
        }
    }
}

impl Outcome for JointSpin {
    const ALL: &'static [Self] = &[
        JointSpin::PlusPlus,
        JointSpin::PlusMinus,
        JointSpin::MinusPlus,
        JointSpin::MinusMinus,
    ];
    const OBSERVABLES: &'static [&'static str] = &["A", "B"];

    fn label(&self) -> &'static str {
        match self {
            JointSpin::PlusPlus => "++",
            JointSpin::PlusMinus => "+-",
            JointSpin::MinusPlus => "-+",
            JointSpin::MinusMinus => "--",
        }
    }

    fn values(&self) -> &'static [i32] {
        match self {
            JointSpin::PlusPlus => &[1, 1],
            JointSpin::PlusMinus => &[1, -1],
            JointSpin::MinusPlus => &[-1, 1],
            JointSpin::MinusMinus => &[-1, -1],
        }
    }
}

impl fmt::Display for JointSpin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fate of a parity-protected symbol after crossing the channel.
///
/// A single parity bit catches every odd number of flips and misses
/// every non-zero even number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParityOutcome {
    /// No bit flipped.
    Clean,
    /// An odd number of flips, caught by the parity check.
    Detected,
    /// A non-zero even number of flips, invisible to the parity check.
    Undetected,
}

impl ParityOutcome {
    /// Classifies a symbol by how many of its bits flipped.
    pub fn from_flips(flips: u32) -> Self {
        match flips {
            0 => ParityOutcome::Clean,
            n if n % 2 == 1 => ParityOutcome::Detected,
            _ => ParityOutcome::Undetected,
        }
    }
}

impl Outcome for ParityOutcome {
    const ALL: &'static [Self] = &[ParityOutcome::Clean, ParityOutcome::Detected, ParityOutcome::Undetected];
    const OBSERVABLES: &'static [&'static str] = &["corrupted", "detected"];

    fn label(&self) -> &'static str {
        match self {
            ParityOutcome::Clean => "clean",
            ParityOutcome::Detected => "detected",
            ParityOutcome::Undetected => "undetected",
        }
    }

    fn values(&self) -> &'static [i32] {
        match self {
            ParityOutcome::Clean => &[0, 0],
            ParityOutcome::Detected => &[1, 1],
            ParityOutcome::Undetected => &[1, 0],
        }
    }
}

impl fmt::Display for ParityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether a symbol arrived unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Delivery {
    /// The symbol was decoded as sent.
    Intact,
    /// At least one bit flipped on the way.
    Corrupted,
}

impl Outcome for Delivery {
    const ALL: &'static [Self] = &[Delivery::Intact, Delivery::Corrupted];
    const OBSERVABLES: &'static [&'static str] = &["corrupted"];

    fn label(&self) -> &'static str {
        match self {
            Delivery::Intact => "intact",
            Delivery::Corrupted => "corrupted",
        }
    }

    fn values(&self) -> &'static [i32] {
        match self {
            Delivery::Intact => &[0],
            Delivery::Corrupted => &[1],
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_and_index() {
        for (i, o) in JointSpin::ALL.iter().enumerate() {
            assert_eq!(o.index(), i);
            assert_eq!(o.values().len(), JointSpin::OBSERVABLES.len());
        }
        assert_eq!(Spin::Down.index(), 1);
        assert_eq!(ParityOutcome::Undetected.index(), 2);
    }

    #[test]
    fn test_joint_spin_round_trips_through_pair() {
        for &joint in JointSpin::ALL {
            assert_eq!(JointSpin::from_pair(joint.first(), joint.second()), joint);
            assert_eq!(joint.values(), &[joint.first().sign(), joint.second().sign()]);
        }
    }

    #[test]
    fn test_parity_classification() {
        assert_eq!(ParityOutcome::from_flips(0), ParityOutcome::Clean);
        assert_eq!(ParityOutcome::from_flips(1), ParityOutcome::Detected);
        assert_eq!(ParityOutcome::from_flips(2), ParityOutcome::Undetected);
        assert_eq!(ParityOutcome::from_flips(5), ParityOutcome::Detected);
    }
}
