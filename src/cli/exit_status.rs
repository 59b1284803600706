use std::process::ExitCode;

/// Process exit status of a manifest command.
///
/// `0` on success, `1` when `check` (or `init`) could not confirm the expected
/// state, `2` when the run aborted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// The manifest on disk is missing or stale, or `init` found an existing config.
    Failure,
    /// Parse, config or IO error.
    Error,
}

impl ExitStatus {
    /// `Success` when `ok`, otherwise `Failure`.
    pub fn from_outcome(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Failure }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        let code = match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        };
        ExitCode::from(code)
    }
}
