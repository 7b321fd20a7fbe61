use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Only 2xx counts as success.
pub fn ensure_success(status: u16) -> Result<(), NetError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(NetError::Status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_is_success() {
        assert!(ensure_success(200).is_ok());
        assert!(ensure_success(204).is_ok());
        assert!(matches!(ensure_success(304), Err(NetError::Status(304))));
        assert!(matches!(ensure_success(404), Err(NetError::Status(404))));
        assert!(matches!(ensure_success(500), Err(NetError::Status(500))));
    }

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(NetError::Status(403).to_string(), "unexpected HTTP status 403");
        assert!(
            NetError::Unsupported("no window".into())
                .to_string()
                .contains("no window")
        );
    }
}
