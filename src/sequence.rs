//! Reference sequence access.
//!
//! All reference sequence flows through a [`Fetcher`], which wraps a
//! [`Source`] and composes its range queries into the windows needed to draw
//! a tile and to reconstruct reading frames.

pub mod fetcher;
pub mod source;

use omics::coordinate::position::Number;
use tracing::warn;

pub use fetcher::Excess;
pub use fetcher::Fetcher;
pub use fetcher::Side;
pub use source::InMemory;
pub use source::Source;

/// Gets the complement of a nucleotide, preserving case.
pub fn complement(nucleotide: char) -> Option<char> {
    let complement = match nucleotide {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        'a' => 't',
        't' => 'a',
        'c' => 'g',
        'g' => 'c',
        _ => return None,
    };

    Some(complement)
}

/// Reverse complements a nucleotide sequence.
///
/// Symbols other than `A`, `C`, `G` and `T` are kept as they are and logged.
///
/// # Examples
///
/// ```
/// use txtrack::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement("ACCGTa"), "tACGGT");
/// assert_eq!(reverse_complement("ANT"), "ANT");
/// ```
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|nucleotide| {
            complement(nucleotide).unwrap_or_else(|| {
                warn!("cannot complement `{nucleotide}`: keeping it as is");
                nucleotide
            })
        })
        .collect()
}

/// Reflects a chromosome-relative coordinate onto the opposite strand.
///
/// Applying the reflection twice returns the original coordinate.
///
/// # Examples
///
/// ```
/// use txtrack::sequence::reverse_chr_coord;
///
/// assert_eq!(reverse_chr_coord(100, 1000), 900);
/// assert_eq!(reverse_chr_coord(reverse_chr_coord(100, 1000), 1000), 100);
/// ```
pub fn reverse_chr_coord(position: Number, chrom_length: Number) -> Number {
    chrom_length.saturating_sub(position)
}

/// Reflects a half-open interval onto the opposite strand.
///
/// Both ends are reflected and swapped, so `[start, end)` becomes
/// `[length - end, length - start)`.
///
/// # Examples
///
/// ```
/// use txtrack::sequence::reverse_interval;
///
/// assert_eq!(reverse_interval(100, 130, 1000), (870, 900));
/// ```
pub fn reverse_interval(start: Number, end: Number, chrom_length: Number) -> (Number, Number) {
    (
        reverse_chr_coord(end, chrom_length),
        reverse_chr_coord(start, chrom_length),
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn test_reverse_complement_twice_is_identity(sequence in "[ACGTacgtN]{0,64}") {
            prop_assert_eq!(reverse_complement(&reverse_complement(&sequence)), sequence);
        }

        #[test]
        fn test_reflection_twice_is_identity(
            (length, start, end) in (1u64..10_000)
                .prop_flat_map(|length| (Just(length), 0..=length))
                .prop_flat_map(|(length, start)| (Just(length), Just(start), start..=length))
        ) {
            let (a, b) = reverse_interval(start, end, length);
            prop_assert!(a <= b);
            prop_assert_eq!(reverse_interval(a, b, length), (start, end));
        }
    }
}
