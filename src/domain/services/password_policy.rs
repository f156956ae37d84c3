//! Password generation and heuristic strength scoring.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::domain::models::password::{PasswordStrengthReport, StrengthLevel};

pub const DEFAULT_PASSWORD_LENGTH: usize = 12;
pub const MIN_PASSWORD_LENGTH: usize = 8;
const LONG_PASSWORD_LENGTH: usize = 12;
const MAX_SCORE: i32 = 5;
const VALID_SCORE: u8 = 3;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*(),.?\":{}|<>";

const COMMON_PASSWORDS: [&str; 5] = ["password", "123456", "qwerty", "admin", "user"];

/// Generate a password holding at least one uppercase letter, lowercase
/// letter, digit and symbol.
///
/// The four guaranteed characters are always emitted, so lengths below 4
/// still produce a four character password.
pub fn generate_secure_password(length: usize) -> String {
    let mut rng = SmallRng::from_os_rng();
    generate_secure_password_with(&mut rng, length)
}

pub fn generate_secure_password_with<R: Rng>(rng: &mut R, length: usize) -> String {
    let charset: Vec<u8> = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS].concat();

    let mut chars = vec![
        pick(rng, UPPERCASE),
        pick(rng, LOWERCASE),
        pick(rng, DIGITS),
        pick(rng, SYMBOLS),
    ];
    while chars.len() < length {
        chars.push(pick(rng, &charset));
    }

    chars.shuffle(rng);
    chars.into_iter().collect()
}

fn pick<R: Rng>(rng: &mut R, charset: &[u8]) -> char {
    char::from(charset[rng.random_range(0..charset.len())])
}

/// Score a password against the fixed rule set.
///
/// Never fails: empty or degenerate input still yields a report.
pub fn validate_password_strength(password: &str) -> PasswordStrengthReport {
    let mut feedback = Vec::new();
    let mut score: i32 = 0;
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        feedback.push(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    } else if length >= LONG_PASSWORD_LENGTH {
        score += 2;
    } else {
        score += 1;
    }

    let rules: [(fn(&char) -> bool, &str); 4] = [
        (char::is_ascii_uppercase, "Add at least one uppercase letter"),
        (char::is_ascii_lowercase, "Add at least one lowercase letter"),
        (char::is_ascii_digit, "Add at least one number"),
        (is_symbol, "Add at least one special character"),
    ];
    for (matches, hint) in rules {
        if password.chars().any(|c| matches(&c)) {
            score += 1;
        } else {
            feedback.push(hint.to_string());
        }
    }

    if is_common(password) {
        score -= 2;
        feedback.push("This password is too common".to_string());
    }

    if has_repeated_run(password) {
        score -= 1;
        feedback.push("Avoid repeating the same character three or more times".to_string());
    }

    let score = score.clamp(0, MAX_SCORE) as u8;

    PasswordStrengthReport {
        is_valid: score >= VALID_SCORE && length >= MIN_PASSWORD_LENGTH,
        score,
        feedback,
    }
}

pub fn password_strength_level(score: u8) -> StrengthLevel {
    match score {
        0..=1 => StrengthLevel::VeryWeak,
        2 => StrengthLevel::Weak,
        3 => StrengthLevel::Moderate,
        4 => StrengthLevel::Strong,
        _ => StrengthLevel::VeryStrong,
    }
}

fn is_symbol(c: &char) -> bool {
    c.is_ascii() && SYMBOLS.contains(&(*c as u8))
}

fn is_common(password: &str) -> bool {
    COMMON_PASSWORDS
        .iter()
        .any(|common| password.eq_ignore_ascii_case(common))
}

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Three or more identical characters in a row. Line terminators never count.
fn has_repeated_run(password: &str) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in password.chars() {
        if !LINE_TERMINATORS.contains(&c) && previous == Some(c) {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 1;
        }
        previous = Some(c);
    }
    false
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rstest::rstest;

    use super::*;

    fn has_all_classes(password: &str) -> bool {
        password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| is_symbol(&c))
    }

    #[rstest]
    #[case(4)]
    #[case(5)]
    #[case(DEFAULT_PASSWORD_LENGTH)]
    #[case(64)]
    fn test_generated_password_has_every_class(#[case] length: usize) {
        for _ in 0..50 {
            let password = generate_secure_password(length);
            assert_eq!(password.chars().count(), length);
            assert!(has_all_classes(&password), "missing class in {password}");
        }
    }

    #[test]
    fn test_short_lengths_keep_guaranteed_characters() {
        let password = generate_secure_password(2);
        assert_eq!(password.len(), 4);
        assert!(has_all_classes(&password));
    }

    #[test]
    fn test_generation_is_reproducible_with_seeded_rng() {
        let first = generate_secure_password_with(&mut StdRng::seed_from_u64(7), 16);
        let second = generate_secure_password_with(&mut StdRng::seed_from_u64(7), 16);
        assert_eq!(first, second);
    }

    #[test]
    fn test_common_password_is_penalized() {
        let report = validate_password_strength("password");

        // +1 length, +1 lowercase, -2 denylist
        assert_eq!(report.score, 0);
        assert!(!report.is_valid);
        assert!(report.feedback.contains(&"This password is too common".to_string()));
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        let report = validate_password_strength("ADMIN");
        assert!(report.feedback.contains(&"This password is too common".to_string()));
    }

    #[test]
    fn test_strong_password_is_clamped_to_five() {
        let report = validate_password_strength("Str0ng!Pass123");

        assert_eq!(report.score, 5);
        assert!(report.is_valid);
        assert!(report.feedback.is_empty());
    }

    #[test]
    fn test_empty_password_still_reports() {
        let report = validate_password_strength("");

        assert_eq!(report.score, 0);
        assert!(!report.is_valid);
        assert_eq!(report.feedback.len(), 5);
        assert!(report.feedback[0].contains("at least 8 characters"));
    }

    #[test]
    fn test_repeated_characters_cost_one_point() {
        // +1 length, +1 upper, +1 lower, +1 digit, +1 symbol, -1 repeat
        let report = validate_password_strength("Aaaa1!bc");
        assert_eq!(report.score, 4);
        assert!(report.is_valid);
        assert_eq!(report.feedback.len(), 1);
    }

    #[test]
    fn test_short_password_is_never_valid() {
        // +1 upper, +1 lower, +1 digit, +1 symbol
        let report = validate_password_strength("Ab1!");
        assert_eq!(report.score, 4);
        assert!(!report.is_valid);
    }

    #[rstest]
    #[case("aab", false)]
    #[case("aaab", true)]
    #[case::line_feeds("ab\n\n\nc", false)]
    #[case::carriage_returns("ab\r\r\rc", false)]
    #[case::line_separators("ab\u{2028}\u{2028}\u{2028}c", false)]
    #[case::paragraph_separators("ab\u{2029}\u{2029}\u{2029}c", false)]
    #[case::tabs("ab\t\t\tc", true)]
    #[case("xyz111", true)]
    fn test_repeated_run_detection(#[case] password: &str, #[case] expected: bool) {
        assert_eq!(has_repeated_run(password), expected);
    }

    #[rstest]
    #[case(0, StrengthLevel::VeryWeak)]
    #[case(1, StrengthLevel::VeryWeak)]
    #[case(2, StrengthLevel::Weak)]
    #[case(3, StrengthLevel::Moderate)]
    #[case(4, StrengthLevel::Strong)]
    #[case(5, StrengthLevel::VeryStrong)]
    fn test_strength_levels(#[case] score: u8, #[case] expected: StrengthLevel) {
        assert_eq!(password_strength_level(score), expected);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(password_strength_level(0).to_string(), "Very Weak");
        assert_eq!(password_strength_level(5).to_string(), "Very Strong");
    }
}
