use crate::auth::SessionContext;
use anyhow::Result;

/// Signs out; local credentials are removed even when the server is unreachable.
pub async fn execute(session: &SessionContext) -> Result<()> {
    session.logout().await;
    println!("Signed out.");
    Ok(())
}
