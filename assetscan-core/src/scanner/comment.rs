//! Comment length normalization.

/// Length of a comment with its line terminators removed.
///
/// Starts from `outer_len` (the full comment, delimiters included) and
/// subtracts one for every `\n` in `content`, plus one more when that `\n`
/// directly follows a `\r`. A `\r` that is not followed by `\n` is not a
/// line terminator and is counted like any other byte.
pub(crate) fn adjusted_length(content: &[u8], outer_len: usize) -> usize {
    let mut adjusted = outer_len;
    for idx in memchr::memchr_iter(b'\n', content) {
        adjusted = adjusted.saturating_sub(1);
        if idx > 0 && content[idx - 1] == b'\r' {
            adjusted = adjusted.saturating_sub(1);
        }
    }
    adjusted
}
