use crate::cli::{
    actions::{login, logout, profile, register, status, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let session = globals.session().await?;
    match action {
        Action::Register(args) => register::execute(&session, args).await,
        Action::Login(args) => login::execute(&session, args).await,
        Action::Logout => logout::execute(&session).await,
        Action::Profile => profile::execute(&session).await,
        Action::Status => status::execute(&session),
    }
}
