//! Signed-term and equation rendering for the drill templates.
//!
//! Example:
//!   a=2, b=-12, c=14  →  "y = 2x² - 12x + 14"
//!   a=1, b=0,  c=5    →  "y = x² + 5"
//!
//! Sign tokens are space-separated from the magnitude ("- 12", "+ 14") and a
//! zero coefficient omits its term entirely. These rules are load-bearing:
//! the step-1 blank shows only a magnitude because its sign glyph is derived
//! here, server-side, from the sign of b/a.

use crate::domain::Problem;

/// Render a signed coefficient as a display token.
/// Zero renders as empty (term omitted); otherwise sign and magnitude are
/// separate tokens. In `leading` position the "+" is dropped for positives.
pub fn signed_term(n: i64, leading: bool) -> String {
    if n == 0 {
        return String::new();
    }
    let abs = n.abs();
    if leading {
        if n > 0 { format!("{abs}") } else { format!("- {abs}") }
    } else if n > 0 {
        format!("+ {abs}")
    } else {
        format!("- {abs}")
    }
}

/// Sign glyph pre-rendered before the step-1 blank; the learner types |b/a| only.
/// b/a == 0 shows "+", matching the glyph slot for a vanished middle term.
pub fn step1_sign(problem: &Problem) -> &'static str {
    if problem.general.b / problem.general.a >= 0 { "+" } else { "-" }
}

/// The general-form equation shown at the top of the drill.
pub fn general_display(problem: &Problem) -> String {
    let (a, b, c) = (problem.general.a, problem.general.b, problem.general.c);

    let mut out = String::from("y = ");
    // Leading coefficient: ±1 drops the magnitude.
    match a {
        1 => out.push_str("x²"),
        -1 => out.push_str("- x²"),
        _ => {
            out.push_str(&signed_term(a, true));
            out.push_str("x²");
        }
    }
    if b != 0 {
        out.push(' ');
        out.push_str(&signed_term(b, false));
        out.push('x');
    }
    if c != 0 {
        out.push(' ');
        out.push_str(&signed_term(c, false));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeneralForm, Problem, StandardForm};

    fn problem(a: i64, p: i64, q: i64) -> Problem {
        Problem {
            general: GeneralForm { a, b: -2 * a * p, c: a * p * p + q },
            standard: StandardForm { a, p, q },
        }
    }

    #[test]
    fn signed_term_tokens() {
        assert_eq!(signed_term(0, false), "");
        assert_eq!(signed_term(0, true), "");
        assert_eq!(signed_term(14, false), "+ 14");
        assert_eq!(signed_term(-12, false), "- 12");
        assert_eq!(signed_term(3, true), "3");
        assert_eq!(signed_term(-3, true), "- 3");
    }

    #[test]
    fn general_display_full_equation() {
        assert_eq!(general_display(&problem(2, 3, -4)), "y = 2x² - 12x + 14");
        assert_eq!(general_display(&problem(-3, -1, 2)), "y = - 3x² - 6x - 1");
    }

    #[test]
    fn general_display_omits_zero_terms() {
        assert_eq!(general_display(&problem(1, 0, 5)), "y = x² + 5");
        assert_eq!(general_display(&problem(1, 0, 0)), "y = x²");
        assert_eq!(general_display(&problem(-1, 0, -7)), "y = - x² - 7");
        // c = a·p² + q = 2·4 − 8 = 0 drops the constant term.
        assert_eq!(general_display(&problem(2, 2, -8)), "y = 2x² - 8x");
    }

    #[test]
    fn step1_sign_tracks_ratio() {
        assert_eq!(step1_sign(&problem(2, 3, 0)), "-"); // b/a = -6
        assert_eq!(step1_sign(&problem(2, -3, 0)), "+"); // b/a = 6
        assert_eq!(step1_sign(&problem(1, 0, 5)), "+"); // b/a = 0
    }
}
