use crate::auth::{SessionContext, SignInForm};
use crate::cli::actions::{failure_report, status::describe_user};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub identifier: String,
    pub password: SecretString,
}

/// Validates the sign-in form and starts a session.
/// # Errors
/// Returns an error listing invalid fields, or the backend failure message.
pub async fn execute(session: &SessionContext, args: Args) -> Result<()> {
    let credentials = SignInForm {
        identifier: args.identifier,
        password: args.password,
    }
    .validate()
    .map_err(|fields| anyhow!("Please correct the highlighted fields: {fields}"))?;

    let user = session
        .login(&credentials)
        .await
        .map_err(|failure| failure_report(&failure))?;

    println!("Signed in as {}", describe_user(&user));
    Ok(())
}
