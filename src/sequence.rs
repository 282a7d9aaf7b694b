/// Complement a single base. IUPAC codes other than ACGTN are kept unchanged.
#[inline]
pub fn complement_base(base: u8) -> u8 {
    match base {
        b'A' | b'a' => b'T',
        b'T' | b't' => b'A',
        b'C' | b'c' => b'G',
        b'G' | b'g' => b'C',
        b'N' | b'n' => b'N',
        _ => base,
    }
}

/// Compute the reverse complement of a DNA sequence
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&base| complement_base(base)).collect()
}

/// Reverse a sequence without complementing it
pub fn reverse(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().copied().collect()
}

/// Count positions at which two sequences differ, case-insensitively.
/// Any length difference counts as that many additional differences.
pub fn count_mismatches(a: &[u8], b: &[u8]) -> usize {
    let diffs = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| !x.eq_ignore_ascii_case(y))
        .count();
    diffs + a.len().abs_diff(b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"ATCG"), b"CGAT");
        assert_eq!(reverse_complement(b"AAAA"), b"TTTT");
        assert_eq!(reverse_complement(b"GCTA"), b"TAGC");
        assert_eq!(reverse_complement(b"N"), b"N");
        assert_eq!(reverse_complement(b"acgt"), b"ACGT");
    }

    #[test]
    fn test_reverse_complement_is_involution() {
        let seq = b"ATTGCCGATAGGCTTACN";
        assert_eq!(reverse_complement(&reverse_complement(seq)), seq.to_vec());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse(b"ATCG"), b"GCTA");
        assert!(reverse(b"").is_empty());
    }

    #[test]
    fn test_count_mismatches() {
        assert_eq!(count_mismatches(b"ACGT", b"ACGT"), 0);
        assert_eq!(count_mismatches(b"ACGT", b"acgt"), 0);
        assert_eq!(count_mismatches(b"ACGT", b"AGGA"), 2);
        assert_eq!(count_mismatches(b"ACGT", b"ACG"), 1);
    }
}
