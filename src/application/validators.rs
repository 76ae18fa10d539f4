/// Intake precondition: non-empty and contains `@`.
///
/// Deliberately loose. Anything stricter is left to the store.
pub fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@')
}
