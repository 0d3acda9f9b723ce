//! Common validation utilities

/// Check whether a string looks like an email address.
///
/// Deliberately loose: the address must contain a single `@` with something
/// on both sides. Full RFC validation is left to the mail provider, which
/// is the only party that can really judge deliverability.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

/// Mask an email address for logging.
///
/// Keeps the first character of the local part and the full domain:
/// `reviewer@example.com` becomes `r***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
