//! Helpers shared across use cases.

use quadbot_domain::DomainError;
use tokio_util::sync::CancellationToken;

/// Bail out with [`DomainError::Cancelled`] if the token has fired.
///
/// Called at phase boundaries so a cancelled turn stops before its next
/// external call rather than mid-flight.
pub fn check_cancelled(token: &CancellationToken) -> Result<(), DomainError> {
    if token.is_cancelled() {
        return Err(DomainError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_passes() {
        assert!(check_cancelled(&CancellationToken::new()).is_ok());
    }

    #[test]
    fn test_cancelled_token_fails() {
        let token = CancellationToken::new();
        token.cancel();
        let err = check_cancelled(&token).unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
    }
}
