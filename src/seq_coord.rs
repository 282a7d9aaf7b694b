use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive interval `[start, end]` on a sequence of length `seq_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeqCoord {
    pub start: usize,
    pub end: usize,
    pub seq_len: usize,
}

impl SeqCoord {
    pub fn new(start: usize, end: usize, seq_len: usize) -> Self {
        debug_assert!(start <= end && end < seq_len, "invalid coord [{start}, {end}] of {seq_len}");
        SeqCoord {
            start,
            end,
            seq_len,
        }
    }

    /// Number of bases covered by the interval
    pub fn length(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_left_extreme(&self) -> bool {
        self.start == 0
    }

    pub fn is_right_extreme(&self) -> bool {
        self.end + 1 == self.seq_len
    }

    pub fn is_extreme(&self) -> bool {
        self.is_left_extreme() || self.is_right_extreme()
    }

    /// The interval covers the whole sequence
    pub fn is_contained(&self) -> bool {
        self.is_left_extreme() && self.is_right_extreme()
    }

    /// Mirror the interval into the reverse-complement frame of the sequence
    pub fn flip(&self) -> Self {
        SeqCoord {
            start: self.seq_len - self.end - 1,
            end: self.seq_len - self.start - 1,
            seq_len: self.seq_len,
        }
    }

    /// Intersection of two intervals on the same sequence, if any
    pub fn intersect(&self, other: &SeqCoord) -> Option<(usize, usize)> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some((start, end))
    }

    /// Bases of `seq` covered by this interval
    pub fn substring<'a>(&self, seq: &'a [u8]) -> &'a [u8] {
        &seq[self.start..=self.end]
    }
}

impl fmt::Display for SeqCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]/{}", self.start, self.end, self.seq_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        let prefix = SeqCoord::new(0, 9, 50);
        assert!(prefix.is_left_extreme());
        assert!(!prefix.is_right_extreme());
        assert_eq!(prefix.length(), 10);

        let suffix = SeqCoord::new(40, 49, 50);
        assert!(suffix.is_right_extreme());
        assert!(!suffix.is_contained());

        assert!(SeqCoord::new(0, 49, 50).is_contained());
        assert!(!SeqCoord::new(5, 10, 50).is_extreme());
    }

    #[test]
    fn test_flip() {
        let c = SeqCoord::new(2, 5, 10);
        let f = c.flip();
        assert_eq!((f.start, f.end), (4, 7));
        assert_eq!(f.flip(), c);
        assert_eq!(SeqCoord::new(0, 3, 10).flip().is_right_extreme(), true);
    }

    #[test]
    fn test_intersect() {
        let a = SeqCoord::new(0, 39, 50);
        let b = SeqCoord::new(10, 49, 50);
        assert_eq!(a.intersect(&b), Some((10, 39)));
        assert_eq!(SeqCoord::new(0, 9, 50).intersect(&SeqCoord::new(10, 20, 50)), None);
    }

    #[test]
    fn test_substring() {
        let seq = b"ACGTACGTAA";
        assert_eq!(SeqCoord::new(2, 4, 10).substring(seq), b"GTA");
    }
}
