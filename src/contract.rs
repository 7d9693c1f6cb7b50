//! Length reconciliation and offset checks shared by every domain.
//!
//! Mismatched lengths are not errors: an operation processes the minimum
//! length over every sequence it touches and leaves the rest alone. Explicit
//! offsets are different, a bad one is a caller bug and panics before
//! anything is written.

use std::ops::Range;

/// Minimum length over all given slices.
macro_rules! effective_len {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let n = $first.len();
        $( let n = n.min($rest.len()); )*
        n
    }};
}

pub(crate) use effective_len;

/// Block of outputs processed per kernel pass in the batched convolution.
///
/// A multiple of every vector width so each output element sees the same
/// kernel path whether or not it is computed in a batch.
pub(crate) const CONV_BLOCK: usize = 1024;

/// Destination range written by an offset copy or accumulate.
///
/// Panics if `offset` lies past the end of the destination or if
/// `offset + src_len` does not fit in it. A wrapped negative offset is just a
/// very large `usize` and fails the same check.
#[track_caller]
pub(crate) fn offset_range(dst_len: usize, src_len: usize, offset: usize) -> Range<usize> {
    match offset.checked_add(src_len) {
        Some(end) if end <= dst_len => offset..end,
        _ => panic!(
            "offset {offset} with source length {src_len} exceeds destination length {dst_len}"
        ),
    }
}

/// Output length of a valid-mode convolution, before clamping to the
/// output buffer.
pub(crate) const fn valid_len(signal_len: usize, kernel_len: usize) -> usize {
    if kernel_len == 0 || kernel_len > signal_len {
        0
    } else {
        signal_len - kernel_len + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_len_takes_minimum() {
        let a = [0u8; 4];
        let b = [0u8; 7];
        let c = [0u8; 5];
        assert_eq!(effective_len!(a, b, c), 4);
        assert_eq!(effective_len!(b), 7);
        assert_eq!(effective_len!(b, [0u8; 0]), 0);
    }

    #[test]
    fn offset_range_accepts_exact_fit() {
        assert_eq!(offset_range(8, 3, 5), 5..8);
        assert_eq!(offset_range(8, 0, 8), 8..8);
        assert_eq!(offset_range(0, 0, 0), 0..0);
    }

    #[test]
    #[should_panic(expected = "exceeds destination length 8")]
    fn offset_range_rejects_overhang() {
        offset_range(8, 4, 5);
    }

    #[test]
    #[should_panic(expected = "offset 18446744073709551615")]
    #[cfg(target_pointer_width = "64")]
    fn offset_range_rejects_wrapped_negative() {
        offset_range(8, 1, (-1isize) as usize);
    }

    #[test]
    fn valid_len_handles_degenerate_kernels() {
        assert_eq!(valid_len(10, 3), 8);
        assert_eq!(valid_len(3, 3), 1);
        assert_eq!(valid_len(2, 3), 0);
        assert_eq!(valid_len(10, 0), 0);
    }
}
