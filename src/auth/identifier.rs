//! Classifies login identifiers. Users can sign in with an email address, a
//! phone number or an organization id; the backend accepts all three in the
//! same `identifier` field, so this is only used for client-side validation.

use regex::Regex;
use std::sync::OnceLock;

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static ORG_ID_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Compiles `pattern` on first use and reuses it afterwards.
fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Phone,
    OrgId,
}

/// Returns the kind of identifier, or `None` when it matches none of them.
#[must_use]
pub fn classify(input: &str) -> Option<IdentifierKind> {
    let input = input.trim();
    if input.contains('@') {
        return is_valid_email(input).then_some(IdentifierKind::Email);
    }
    if is_valid_phone(input) {
        return Some(IdentifierKind::Phone);
    }
    is_valid_org_id(input).then_some(IdentifierKind::OrgId)
}

/// Normalizes an identifier for submission: emails are lowercased and phone
/// numbers lose their separators. Org ids are kept as typed.
#[must_use]
pub fn normalize(input: &str) -> String {
    let input = input.trim();
    match classify(input) {
        Some(IdentifierKind::Email) => input.to_lowercase(),
        Some(IdentifierKind::Phone) => normalize_phone(input),
        Some(IdentifierKind::OrgId) | None => input.to_string(),
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    compiled(&EMAIL_PATTERN, r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .is_some_and(|regex| regex.is_match(email.trim()))
}

/// Optional leading `+` and 10 to 15 digits once spaces, dashes, dots and
/// parentheses are stripped.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    compiled(&PHONE_PATTERN, r"^\+?[0-9]{10,15}$")
        .is_some_and(|regex| regex.is_match(&normalize_phone(phone)))
}

#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

/// 3 to 32 characters of letters, digits, `-` and `_`, with at least one digit.
#[must_use]
pub fn is_valid_org_id(org_id: &str) -> bool {
    let org_id = org_id.trim();
    compiled(&ORG_ID_PATTERN, r"^[A-Za-z0-9][A-Za-z0-9_-]{2,31}$")
        .is_some_and(|regex| regex.is_match(org_id))
        && org_id.chars().any(|ch| ch.is_ascii_digit())
}
