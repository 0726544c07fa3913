use thiserror::Error;

/// Fatal failure while bringing up the window, the context or the driver.
///
/// Any of these terminates the run with a failing exit status. Mismatching
/// GL state is not an error; it is recorded by `CheckReport`.
#[derive(Debug, Error)]
pub enum InitError {
    /// The event loop, window, surface or GL context could not be created.
    #[error("context creation failed: {0}")]
    ContextCreation(String),

    /// The driver is missing entry points or cannot satisfy the test.
    #[error("driver error: {0}")]
    Driver(String),
}

impl InitError {
    pub fn context(err: impl std::fmt::Display) -> Self {
        Self::ContextCreation(err.to_string())
    }

    pub fn driver(err: impl std::fmt::Display) -> Self {
        Self::Driver(err.to_string())
    }
}

impl From<anyhow::Error> for InitError {
    fn from(err: anyhow::Error) -> Self {
        Self::ContextCreation(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn anyhow_chain_is_flattened() {
        let err: anyhow::Result<()> =
            Err(anyhow::anyhow!("no EGL display")).context("failed to create GL display");
        let err = InitError::from(err.unwrap_err());
        assert_eq!(
            err.to_string(),
            "context creation failed: failed to create GL display: no EGL display"
        );
    }

    #[test]
    fn driver_errors_keep_their_message() {
        let err = InitError::driver("GL_MAX_VERTEX_ATTRIBS is 1");
        assert!(matches!(err, InitError::Driver(_)));
        assert_eq!(err.to_string(), "driver error: GL_MAX_VERTEX_ATTRIBS is 1");
    }
}
