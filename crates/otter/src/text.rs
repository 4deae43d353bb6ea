//! Label width estimation.

use unicode_width::UnicodeWidthStr;

/// Display columns of the widest line of `text`. East Asian wide glyphs
/// (CJK ideographs, full-width forms) count two columns each.
pub fn label_units(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::label_units;

    #[test]
    fn ascii_counts_one_per_char() {
        assert_eq!(label_units("approve"), 7);
    }

    #[test]
    fn cjk_counts_two_per_char() {
        assert_eq!(label_units("承認"), 4);
    }

    #[test]
    fn widest_line_wins() {
        assert_eq!(label_units("ok\nlonger line"), 11);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(label_units(""), 0);
    }
}
