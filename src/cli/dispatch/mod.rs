use crate::cli::{
    actions::{login, register, Action},
    globals::GlobalArgs,
};
use crate::config::{ClientConfig, RuntimeConfig};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

/// Maps parsed arguments into the action to run and the shared client settings.
/// # Errors
/// Returns an error if a required argument is missing or no subcommand was given.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let (name, sub_m) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    // global args are propagated to the subcommand matches
    let overrides = RuntimeConfig::new(
        sub_m.get_one::<String>("api-url").map(String::as_str),
        sub_m.get_one::<String>("store").map(String::as_str),
    );
    let globals = GlobalArgs::new(ClientConfig::load().with_overrides(overrides));

    let action = match name {
        "register" => {
            let password = required(sub_m, "password")?;
            let confirm_password = sub_m
                .get_one::<String>("confirm-password")
                .cloned()
                .unwrap_or_else(|| password.clone());
            Action::Register(register::Args {
                name: required(sub_m, "name")?,
                email: required(sub_m, "email")?,
                mobile: required(sub_m, "mobile")?,
                organization_id: required(sub_m, "organization-id")?,
                password: SecretString::from(password),
                confirm_password: SecretString::from(confirm_password),
            })
        }
        "login" => Action::Login(login::Args {
            identifier: required(sub_m, "identifier")?,
            password: SecretString::from(required(sub_m, "password")?),
        }),
        "logout" => Action::Logout,
        "profile" => Action::Profile,
        "status" => Action::Status,
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok((action, globals))
}

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}
