use std::path::PathBuf;

/// SDK tool errors
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("Failed to launch {}: {}", .program.display(), .source)]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected: {0}")]
    UnexpectedOutput(String),
    #[error("Error {}: {}", describe_code(.code), .last_line.as_deref().unwrap_or(""))]
    ExitStatus {
        /// Exit code, `None` when the process was killed by a signal
        code: Option<i32>,
        /// Last line the tool printed
        last_line: Option<String>,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "(signal)".to_string(), |c| c.to_string())
}

impl SdkError {
    /// Build the error for a process that exited unsuccessfully
    pub(crate) fn exit(status: std::process::ExitStatus, last_line: Option<String>) -> Self {
        SdkError::ExitStatus {
            code: status.code(),
            last_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SdkError::UnexpectedOutput("garbage line".into());
        assert_eq!(err.to_string(), "Unexpected: garbage line");

        let err = SdkError::ExitStatus {
            code: Some(1),
            last_line: Some("error: device offline".into()),
        };
        assert_eq!(err.to_string(), "Error 1: error: device offline");
    }
}
