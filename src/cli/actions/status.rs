use crate::auth::{SessionContext, UserRecord};
use anyhow::Result;

/// Prints the bootstrapped session state.
pub fn execute(session: &SessionContext) -> Result<()> {
    match session.user() {
        Some(user) => println!("Signed in as {}", describe_user(&user)),
        None => println!("Signed out."),
    }
    Ok(())
}

/// Short human label for a user record: `Name <email>`, whichever parts exist.
#[must_use]
pub fn describe_user(user: &UserRecord) -> String {
    match (user.display_name(), user.email()) {
        (Some(name), Some(email)) => format!("{name} <{email}>"),
        (Some(name), None) => name.to_string(),
        (None, Some(email)) => email.to_string(),
        (None, None) => "unknown user".to_string(),
    }
}
