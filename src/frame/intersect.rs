//! Masking a tile down to its coding nucleotides.

use omics::coordinate::position::Number;

/// Masks every nucleotide of a tile that is not both exonic and coding.
///
/// `start` is the position of the first nucleotide of `sequence`. The mask has
/// the same length as the sequence; masked nucleotides are `None`.
///
/// # Examples
///
/// ```
/// use txtrack::frame::intersect::mask;
///
/// let masked = mask("ACGTACGT", 10, &[(11, 13), (15, 20)], (12, 17));
///
/// assert_eq!(
///     masked,
///     vec![None, None, Some(b'G'), None, None, Some(b'C'), Some(b'G'), None]
/// );
/// ```
pub fn mask(
    sequence: &str,
    start: Number,
    exons: &[(Number, Number)],
    coding: (Number, Number),
) -> Vec<Option<u8>> {
    sequence
        .bytes()
        .enumerate()
        .map(|(i, nucleotide)| {
            let position = start + i as Number;
            let is_coding = coding.0 <= position && position < coding.1;
            let is_exonic = exons
                .iter()
                .any(|(start, end)| *start <= position && position < *end);

            (is_coding && is_exonic).then_some(nucleotide)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_preserves_length() {
        let masked = mask("ACGTACGTAC", 0, &[], (0, 10));
        assert_eq!(masked.len(), 10);
        assert!(masked.iter().all(Option::is_none));
    }

    #[test]
    fn test_mask_within_a_single_exon() {
        let masked = mask("ACGT", 100, &[(0, 1000)], (0, 1000));
        assert_eq!(
            masked,
            vec![Some(b'A'), Some(b'C'), Some(b'G'), Some(b'T')]
        );
    }
}
