//! Data models for the camp marketplace.
//!
//! Field names serialize as camelCase to match the web client.

mod blog;
mod camp;
mod camp_group;
mod camper;
mod identity;
mod reputation;
mod reservation;

pub use blog::*;
pub use camp::*;
pub use camp_group::*;
pub use camper::*;
pub use identity::*;
pub use reputation::*;
pub use reservation::*;

/// Normalise an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }
}
