use crate::auth::{SessionContext, SignUpForm};
use crate::cli::actions::failure_report;
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub organization_id: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Validates the sign-up form and creates the account.
/// # Errors
/// Returns an error listing invalid fields, or the backend failure message.
pub async fn execute(session: &SessionContext, args: Args) -> Result<()> {
    let form = SignUpForm {
        name: args.name,
        email: args.email,
        mobile: args.mobile,
        organization_id: args.organization_id,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    let data = form
        .validate()
        .map_err(|fields| anyhow!("Please correct the highlighted fields: {fields}"))?;

    debug!("submitting registration");
    let message = session
        .register(&data)
        .await
        .map_err(|failure| failure_report(&failure))?;

    if message.is_empty() {
        println!("Registration complete. You can now sign in.");
    } else {
        println!("{message}");
    }
    Ok(())
}
