use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use crate::error::Error;

/// Which endpoints of an interval are inclusive.
///
/// Bit 0 stands for an inclusive start, bit 1 for an inclusive end.
#[derive(Copy, Clone, Default, Eq, Hash, PartialEq, derive_more::IsVariant)]
#[repr(u8)]
#[must_use]
pub enum Bounds {
    /// `[start, end)`.
    #[default]
    StartInclusiveEndExclusive = 0b01,

    /// `(start, end]`.
    StartExclusiveEndInclusive = 0b10,

    /// `[start, end]`.
    BothInclusive = 0b11,

    /// `(start, end)`.
    BothExclusive = 0b00,
}

impl Bounds {
    const START_INCLUSIVE: u8 = 0b01;
    const END_INCLUSIVE: u8 = 0b10;

    pub const ALL: [Self; 4] = [
        Self::StartInclusiveEndExclusive,
        Self::StartExclusiveEndInclusive,
        Self::BothInclusive,
        Self::BothExclusive,
    ];

    const fn from_bits(bits: u8) -> Self {
        match bits & (Self::START_INCLUSIVE | Self::END_INCLUSIVE) {
            0b00 => Self::BothExclusive,
            0b01 => Self::StartInclusiveEndExclusive,
            0b10 => Self::StartExclusiveEndInclusive,
            _ => Self::BothInclusive,
        }
    }

    const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn from_inclusivity(is_start_inclusive: bool, is_end_inclusive: bool) -> Self {
        let mut bits = 0;
        if is_start_inclusive {
            bits |= Self::START_INCLUSIVE;
        }
        if is_end_inclusive {
            bits |= Self::END_INCLUSIVE;
        }
        Self::from_bits(bits)
    }

    #[must_use]
    pub const fn is_start_inclusive(self) -> bool {
        self.bits() & Self::START_INCLUSIVE != 0
    }

    #[must_use]
    pub const fn is_end_inclusive(self) -> bool {
        self.bits() & Self::END_INCLUSIVE != 0
    }

    /// An endpoint stays inclusive only if it is inclusive on both sides.
    pub const fn intersect(self, other: Self) -> Self {
        Self::from_bits(self.bits() & other.bits())
    }

    /// Replace the start inclusivity, keeping the end.
    pub const fn with_start_inclusive(self, is_inclusive: bool) -> Self {
        Self::from_inclusivity(is_inclusive, self.is_end_inclusive())
    }

    /// Replace the end inclusivity, keeping the start.
    pub const fn with_end_inclusive(self, is_inclusive: bool) -> Self {
        Self::from_inclusivity(self.is_start_inclusive(), is_inclusive)
    }

    pub(crate) const fn opening(self) -> char {
        if self.is_start_inclusive() { '[' } else { '(' }
    }

    pub(crate) const fn closing(self) -> char {
        if self.is_end_inclusive() { ']' } else { ')' }
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.opening(), self.closing())
    }
}

impl Debug for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Bounds {
    type Err = Error;

    /// Parse the interval notation: `[)`, `(]`, `[]` or `()`.
    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        match notation {
            "[)" => Ok(Self::StartInclusiveEndExclusive),
            "(]" => Ok(Self::StartExclusiveEndInclusive),
            "[]" => Ok(Self::BothInclusive),
            "()" => Ok(Self::BothExclusive),
            _ => Err(Error::InvalidBounds(notation.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert!(Bounds::default().is_start_inclusive_end_exclusive());
    }

    #[test]
    fn test_inclusivity() {
        assert!(Bounds::StartInclusiveEndExclusive.is_start_inclusive());
        assert!(!Bounds::StartInclusiveEndExclusive.is_end_inclusive());
        assert!(!Bounds::StartExclusiveEndInclusive.is_start_inclusive());
        assert!(Bounds::StartExclusiveEndInclusive.is_end_inclusive());
        assert!(Bounds::BothInclusive.is_start_inclusive());
        assert!(Bounds::BothInclusive.is_end_inclusive());
        assert!(!Bounds::BothExclusive.is_start_inclusive());
        assert!(!Bounds::BothExclusive.is_end_inclusive());
    }

    #[test]
    fn test_from_inclusivity_round_trip() {
        for bounds in Bounds::ALL {
            assert_eq!(
                Bounds::from_inclusivity(bounds.is_start_inclusive(), bounds.is_end_inclusive()),
                bounds,
            );
        }
    }

    #[test]
    fn test_intersect() {
        assert_eq!(
            Bounds::BothInclusive.intersect(Bounds::StartInclusiveEndExclusive),
            Bounds::StartInclusiveEndExclusive,
        );
        assert_eq!(
            Bounds::StartInclusiveEndExclusive.intersect(Bounds::StartExclusiveEndInclusive),
            Bounds::BothExclusive,
        );
        assert_eq!(Bounds::BothInclusive.intersect(Bounds::BothInclusive), Bounds::BothInclusive);
    }

    #[test]
    fn test_with_endpoint_inclusivity() {
        assert_eq!(Bounds::BothExclusive.with_start_inclusive(true), Bounds::StartInclusiveEndExclusive);
        assert_eq!(Bounds::BothInclusive.with_end_inclusive(false), Bounds::StartInclusiveEndExclusive);
    }

    #[test]
    fn test_notation() {
        for bounds in Bounds::ALL {
            assert_eq!(bounds.to_string().parse::<Bounds>(), Ok(bounds));
        }
        assert_eq!("[[".parse::<Bounds>(), Err(Error::InvalidBounds("[[".to_owned())));
    }
}
