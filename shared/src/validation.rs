//! Input validation functions
//!
//! Pure validators for the fixed username, email, and password patterns
//! accepted by the platform. All of them operate on borrowed strings and
//! never touch storage.

/// Symbols allowed in passwords besides letters and digits.
const PASSWORD_SYMBOLS: &str = r#"~!@#$%^&*()_-+={[}]|\:;"'<,>.?/"#;

/// Validate a username.
///
/// The username must be 3 to 15 characters long, start with a letter, and
/// consist of only letters, digits, or the symbols `._-`. No whitespace.
pub fn is_valid_username(username: &str) -> bool {
    let username_regex = regex_lite::Regex::new(r"^[a-zA-Z][\w.-]{2,14}$").unwrap();
    username_regex.is_match(username)
}

/// Validate an email address.
///
/// Follows the pattern published by w3.org, which willfully violates
/// RFC 5322: stricter before the domain, more tolerant on the domain.
pub fn is_valid_email(email: &str) -> bool {
    let email_regex = regex_lite::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap();
    email_regex.is_match(email)
}

/// Validate a password.
///
/// The password must be 8 to 32 characters long with at least one uppercase
/// letter, one lowercase letter, one digit, and one special character, drawn
/// only from letters, digits, and `PASSWORD_SYMBOLS`. No whitespace.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(8..=32).contains(&len) {
        return false;
    }
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
    {
        return false;
    }
    password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}
