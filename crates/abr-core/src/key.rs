//! Lookup key sanitisation.

/// Strip everything but ASCII letters and digits from a lookup key.
///
/// ABNs and ACNs are commonly written with spaces (`53 004 085 616`); the
/// register only accepts the bare digits. Underscores are removed as well.
pub fn sanitize(input: &str) -> String {
  input.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Normalise a name-search query: trim it and collapse internal runs of
/// whitespace to single spaces.
pub fn normalize_name(input: &str) -> String {
  input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_alphanumerics_only() {
    assert_eq!(sanitize("12345"), "12345");
    assert_eq!(sanitize("123 4_ab5"), "1234ab5");
    assert_eq!(sanitize(" 53-004-085-616\n"), "53004085616");
    assert_eq!(sanitize("_ -"), "");
  }

  #[test]
  fn name_query_is_trimmed_and_collapsed() {
    assert_eq!(normalize_name("  paddy's   constructions\n"), "paddy's constructions");
    assert_eq!(normalize_name("   "), "");
  }
}
