pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod status;

// Internal "interpreter" for `Action`.
mod run;

use crate::{auth::SessionFailure, cli::globals::GlobalArgs};

#[derive(Debug)]
pub enum Action {
    Register(register::Args),
    Login(login::Args),
    Logout,
    Profile,
    Status,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the session cannot be built or the operation fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}

/// Formats a session failure with its field messages, one per line.
pub(crate) fn failure_report(failure: &SessionFailure) -> anyhow::Error {
    let mut report = failure.message.clone();
    for error in failure.field_errors.iter() {
        report.push_str(&format!("\n  {}: {}", error.field, error.message));
    }
    anyhow::anyhow!(report)
}
