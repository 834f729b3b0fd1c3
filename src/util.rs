//! Small utility helpers used across modules.

/// Total numeric parse for learner input.
/// Returns `Some(v)` only for finite numbers; empty strings, partial numbers,
/// non-numeric text, "inf" and "NaN" all come back as `None`.
/// Validators treat `None` as plain incorrect, never as an error.
pub fn parse_finite(s: &str) -> Option<f64> {
  match s.trim().parse::<f64>() {
    Ok(v) if v.is_finite() => Some(v),
    _ => None,
  }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
#[allow(dead_code)]
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max { s.to_string() } else { format!("{}… ({} bytes total)", &s[..max], s.len()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_finite_accepts_plain_numbers() {
    assert_eq!(parse_finite("6"), Some(6.0));
    assert_eq!(parse_finite("-3.5"), Some(-3.5));
    assert_eq!(parse_finite("  9 "), Some(9.0));
    assert_eq!(parse_finite("1e2"), Some(100.0));
  }

  #[test]
  fn parse_finite_rejects_garbage() {
    assert_eq!(parse_finite(""), None);
    assert_eq!(parse_finite("abc"), None);
    assert_eq!(parse_finite("1.2.3"), None);
    assert_eq!(parse_finite("-"), None);
    assert_eq!(parse_finite("inf"), None);
    assert_eq!(parse_finite("NaN"), None);
  }
}
