use crate::auth::SessionContext;
use crate::cli::actions::failure_report;
use anyhow::{bail, Result};

/// Refreshes the profile from the backend and prints it as JSON.
/// # Errors
/// Returns an error when no session is stored or the backend rejects the request.
pub async fn execute(session: &SessionContext) -> Result<()> {
    if !session.service().is_authenticated() {
        bail!("Not signed in. Run `scireg login` first.");
    }

    let user = session
        .get_profile()
        .await
        .map_err(|failure| failure_report(&failure))?;

    println!("{}", serde_json::to_string_pretty(user.as_value())?);
    Ok(())
}
