use sha2::{Digest as _, Sha256};

use crate::error::AppError;

/// Proof that the caller presented the operator password.
///
/// Only [`crate::SeatService::authenticate`] hands these out.
#[derive(Debug)]
#[must_use]
pub struct OperatorToken {
    _private: (),
}

impl OperatorToken {
    pub(crate) const fn issue() -> Self {
        Self { _private: () }
    }
}

/// Digest of the configured operator password.
#[derive(Clone)]
pub(crate) struct OperatorSecret([u8; 32]);

impl OperatorSecret {
    pub(crate) fn new(password: &str) -> Self {
        Self(Sha256::digest(password.as_bytes()).into())
    }

    // fixed size digests, compared without early exit
    pub(crate) fn verify(&self, supplied: &str) -> Result<OperatorToken, AppError> {
        let supplied: [u8; 32] = Sha256::digest(supplied.as_bytes()).into();
        let difference = self
            .0
            .iter()
            .zip(supplied)
            .fold(0_u8, |acc, (left, right)| acc | (left ^ right));
        if difference == 0 {
            Ok(OperatorToken::issue())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_configured_password() {
        let secret = OperatorSecret::new("changeme");
        assert!(secret.verify("changeme").is_ok());
        assert!(matches!(
            secret.verify("changeme "),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(secret.verify(""), Err(AppError::Unauthorized)));
    }
}
