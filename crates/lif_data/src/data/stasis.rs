use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};
use std::str::FromStr;

/// Number of distinct live-neighbor counts in a Moore-8 neighborhood (0..=8).
pub const STASIS_DOMAIN: usize = 9;

const DOMAIN_MASK: u16 = (1 << STASIS_DOMAIN) - 1;
const TABLE_SIZE: usize = 1 << STASIS_DOMAIN;

/// Precomputed facts about one 9-bit mask.
#[derive(Clone, Copy)]
struct MaskEntry {
    count: u8,
    min: u8,
    max: u8,
    members: [u8; STASIS_DOMAIN],
}

const fn build_table() -> [MaskEntry; TABLE_SIZE] {
    let mut table = [MaskEntry {
        count: 0,
        min: 0,
        max: 0,
        members: [0; STASIS_DOMAIN],
    }; TABLE_SIZE];

    let mut mask = 0;
    while mask < TABLE_SIZE {
        let mut entry = MaskEntry {
            count: 0,
            min: 0,
            max: 0,
            members: [0; STASIS_DOMAIN],
        };
        let mut bit = 0;
        while bit < STASIS_DOMAIN {
            if mask & (1 << bit) != 0 {
                if entry.count == 0 {
                    entry.min = bit as u8;
                }
                entry.max = bit as u8;
                entry.members[entry.count as usize] = bit as u8;
                entry.count += 1;
            }
            bit += 1;
        }
        table[mask] = entry;
        mask += 1;
    }
    table
}

static MASK_TABLE: [MaskEntry; TABLE_SIZE] = build_table();

/// The set of live-neighbor counts under which a cell is stable.
///
/// A subset of `{0, ..., 8}` stored as a 9-bit mask. Every query is a single
/// lookup into a table computed at compile time, so the per-cell rule never
/// iterates over bits.
///
/// Values can only be built through checked constructors, so a `StasisSet`
/// never holds a member outside the domain.
///
/// # Examples
/// ```
/// use lif_data::StasisSet;
///
/// let s = StasisSet::from_members([2, 3]).unwrap();
/// assert!(s.contains(2));
/// assert_eq!(s.count(), 2);
/// assert_eq!(s.max(), Some(3));
/// assert_eq!(s.lose_max(), StasisSet::from_members([2]).unwrap());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct StasisSet(u16);

impl StasisSet {
    /// Stable under no neighbor count.
    pub const EMPTY: Self = Self(0);
    /// Stable under every neighbor count; the state of a freshly emptied cell.
    pub const FULL: Self = Self(DOMAIN_MASK);

    /// Builds a set from a raw mask, rejecting bits above 8.
    pub const fn from_bits(bits: u16) -> Option<Self> {
        if bits & !DOMAIN_MASK == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Builds a set from explicit members, rejecting any member above 8.
    pub fn from_members<I: IntoIterator<Item = u8>>(members: I) -> Option<Self> {
        let mut bits = 0u16;
        for m in members {
            if m as usize >= STASIS_DOMAIN {
                return None;
            }
            bits |= 1 << m;
        }
        Some(Self(bits))
    }

    pub fn from_set(set: &BTreeSet<u8>) -> Option<Self> {
        Self::from_members(set.iter().copied())
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    fn entry(self) -> &'static MaskEntry {
        &MASK_TABLE[self.0 as usize]
    }

    /// Whether a cell with `k` live neighbors is stable. Counts beyond the
    /// domain (possible with wider neighborhoods) are never members.
    #[inline]
    pub fn contains(self, k: usize) -> bool {
        k < STASIS_DOMAIN && self.0 & (1 << k) != 0
    }

    #[inline]
    pub fn count(self) -> usize {
        self.entry().count as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn min(self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.entry().min)
        }
    }

    pub fn max(self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.entry().max)
        }
    }

    /// Members in ascending order.
    pub fn members(self) -> &'static [u8] {
        let entry = self.entry();
        &entry.members[..entry.count as usize]
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        self.members().iter().copied()
    }

    pub fn to_set(self) -> BTreeSet<u8> {
        self.iter().collect()
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub fn symmetric_difference(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Returns a copy with `k` added. Out-of-domain indices leave the set unchanged.
    pub fn with_bit_set(self, k: usize) -> Self {
        if k < STASIS_DOMAIN {
            Self(self.0 | (1 << k))
        } else {
            self
        }
    }

    /// Returns a copy with `k` removed.
    pub fn with_bit_cleared(self, k: usize) -> Self {
        if k < STASIS_DOMAIN {
            Self(self.0 & !(1 << k))
        } else {
            self
        }
    }

    /// Drops the smallest member. No-op on the empty set.
    pub fn lose_min(self) -> Self {
        match self.min() {
            Some(m) => self.with_bit_cleared(m as usize),
            None => self,
        }
    }

    /// Drops the largest member. No-op on the empty set.
    pub fn lose_max(self) -> Self {
        match self.max() {
            Some(m) => self.with_bit_cleared(m as usize),
            None => self,
        }
    }
}

impl TryFrom<u16> for StasisSet {
    type Error = String;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| format!("stasis mask {bits:#x} exceeds 9 bits"))
    }
}

impl From<StasisSet> for u16 {
    fn from(s: StasisSet) -> Self {
        s.0
    }
}

impl BitOr for StasisSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for StasisSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitXor for StasisSet {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        self.symmetric_difference(rhs)
    }
}

impl fmt::Display for StasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, m) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, "}}")
    }
}

/// Which member an empty cell gives up when it loses habitability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitabilityPolicy {
    #[default]
    Max,
    Min,
    Random,
}

impl HabitabilityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitabilityPolicy::Max => "max",
            HabitabilityPolicy::Min => "min",
            HabitabilityPolicy::Random => "random",
        }
    }
}

impl fmt::Display for HabitabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitabilityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max" => Ok(HabitabilityPolicy::Max),
            "min" => Ok(HabitabilityPolicy::Min),
            "random" => Ok(HabitabilityPolicy::Random),
            other => Err(format!(
                "unknown habitability policy '{other}' (expected max, min or random)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_bit_arithmetic() {
        for bits in 0..TABLE_SIZE as u16 {
            let s = StasisSet::from_bits(bits).unwrap();
            assert_eq!(s.count(), bits.count_ones() as usize);
            if bits == 0 {
                assert_eq!(s.min(), None);
                assert_eq!(s.max(), None);
            } else {
                assert_eq!(s.min(), Some(bits.trailing_zeros() as u8));
                assert_eq!(s.max(), Some(15 - bits.leading_zeros() as u8));
            }
            let rebuilt: u16 = s.iter().fold(0, |acc, m| acc | (1 << m));
            assert_eq!(rebuilt, bits);
        }
    }

    #[test]
    fn test_set_round_trip_is_a_bijection() {
        for bits in 0..TABLE_SIZE as u16 {
            let s = StasisSet::from_bits(bits).unwrap();
            assert_eq!(StasisSet::from_set(&s.to_set()), Some(s));
        }
    }

    #[test]
    fn test_out_of_domain_rejected() {
        assert!(StasisSet::from_bits(1 << 9).is_none());
        assert!(StasisSet::from_members([0, 9]).is_none());
        assert!(!StasisSet::FULL.contains(9));
        assert_eq!(StasisSet::EMPTY.with_bit_set(12), StasisSet::EMPTY);
    }

    #[test]
    fn test_lose_on_empty_is_noop() {
        assert_eq!(StasisSet::EMPTY.lose_min(), StasisSet::EMPTY);
        assert_eq!(StasisSet::EMPTY.lose_max(), StasisSet::EMPTY);
    }

    #[test]
    fn test_lose_max_from_full() {
        let expected = StasisSet::from_members(0..8).unwrap();
        assert_eq!(StasisSet::FULL.lose_max(), expected);
        assert_eq!(StasisSet::FULL.lose_min(), StasisSet::from_members(1..9).unwrap());
    }

    #[test]
    fn test_set_algebra() {
        let a = StasisSet::from_members([1, 2, 3]).unwrap();
        let b = StasisSet::from_members([3, 4]).unwrap();
        assert_eq!(a & b, StasisSet::from_members([3]).unwrap());
        assert_eq!(a | b, StasisSet::from_members([1, 2, 3, 4]).unwrap());
        assert_eq!(a ^ b, StasisSet::from_members([1, 2, 4]).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(StasisSet::from_members([0, 8]).unwrap().to_string(), "{0, 8}");
        assert_eq!(StasisSet::EMPTY.to_string(), "{}");
    }

    #[test]
    fn test_serde_rejects_wide_mask() {
        let s: StasisSet = serde_json::from_str("7").unwrap();
        assert_eq!(s.count(), 3);
        assert!(serde_json::from_str::<StasisSet>("1024").is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("MAX".parse::<HabitabilityPolicy>(), Ok(HabitabilityPolicy::Max));
        assert_eq!("random".parse::<HabitabilityPolicy>(), Ok(HabitabilityPolicy::Random));
        assert!("median".parse::<HabitabilityPolicy>().is_err());
    }
}
