/// Zero-pads `ordinal` to `width` digits; wider numbers are kept as-is.
pub fn create_prefix(ordinal: usize, width: usize) -> String {
    format!("{ordinal:0width$}")
}

pub fn prefixed_name(ordinal: usize, width: usize, separator: &str, original: &str) -> String {
    format!("{}{separator}{original}", create_prefix(ordinal, width))
}

/// Returns the original name when `name` is `<digits><separator><rest>`.
///
/// At least `min_digits` leading digits are required and `rest` must be
/// non-empty, so names that merely start with a number are left alone.
pub fn strip_prefix<'a>(name: &'a str, separator: &str, min_digits: usize) -> Option<&'a str> {
    if separator.is_empty() {
        return None;
    }
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits < min_digits {
        return None;
    }
    let rest = name[digits..].strip_prefix(separator)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::{create_prefix, prefixed_name, strip_prefix};

    #[test]
    fn test_create_prefix() {
        assert_eq!(create_prefix(10, 3), "010");
        assert_eq!(create_prefix(5, 3), "005");
        assert_eq!(create_prefix(100, 2), "100");
    }

    #[test]
    fn prefixed_name_uses_separator() {
        assert_eq!(
            prefixed_name(1, 3, "__", "IMG_20200101.jpg"),
            "001__IMG_20200101.jpg"
        );
        assert_eq!(prefixed_name(42, 4, "-", "a.jpg"), "0042-a.jpg");
    }

    #[test]
    fn strip_prefix_restores_original_name() {
        assert_eq!(strip_prefix("001__a.jpg", "__", 3), Some("a.jpg"));
        assert_eq!(strip_prefix("1234__IMG__1.jpg", "__", 3), Some("IMG__1.jpg"));
        assert_eq!(strip_prefix("0042-a.jpg", "-", 3), Some("a.jpg"));
    }

    #[test]
    fn strip_prefix_ignores_unprefixed_names() {
        assert_eq!(strip_prefix("a.jpg", "__", 3), None);
        assert_eq!(strip_prefix("01__a.jpg", "__", 3), None);
        assert_eq!(strip_prefix("001_a.jpg", "__", 3), None);
        assert_eq!(strip_prefix("001__", "__", 3), None);
        assert_eq!(strip_prefix("20200101.jpg", "__", 3), None);
        assert_eq!(strip_prefix("001__a.jpg", "", 3), None);
    }

    #[test]
    fn prefix_then_strip_is_identity() {
        for name in ["a.jpg", "IMG_0001.JPG", "__odd.jpeg", "2020__x.heic"] {
            let prefixed = prefixed_name(7, 3, "__", name);
            assert_eq!(strip_prefix(&prefixed, "__", 3), Some(name));
        }
    }
}
