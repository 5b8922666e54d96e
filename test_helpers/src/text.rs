//! Text parsing for behavioural step placeholders.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

/// Splits a comma separated placeholder such as `"a, b, c"` into its items.
///
/// An empty placeholder yields no items.
#[must_use]
pub fn parse_list(value: &str) -> Vec<String> {
    let inner = unquote(value);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|item| unquote(item).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{parse_list, unquote};

    #[rstest]
    #[case("'value'", "value")]
    #[case("\"value\"", "value")]
    #[case("  value ", "value")]
    #[case("'mixed\"", "'mixed\"")]
    fn unquote_strips_one_matching_layer(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unquote(input), expected);
    }

    #[rstest]
    #[case("\"a, b, c\"", &["a", "b", "c"])]
    #[case("single", &["single"])]
    #[case("\"\"", &[])]
    fn parse_list_splits_on_commas(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_list(input), expected);
    }
}
