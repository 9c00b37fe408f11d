use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .help("Account password")
        .env("SCIREG_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn register_command() -> Command {
    Command::new("register")
        .about("Create a scientist account")
        .arg(
            Arg::new("name")
                .long("name")
                .help("Full name")
                .required(true),
        )
        .arg(
            Arg::new("email")
                .long("email")
                .help("Email address")
                .required(true),
        )
        .arg(
            Arg::new("mobile")
                .long("mobile")
                .help("Mobile phone number")
                .required(true),
        )
        .arg(
            Arg::new("organization-id")
                .long("organization-id")
                .help("Organization ID")
                .env("SCIREG_ORGANIZATION_ID")
                .required(true),
        )
        .arg(password_arg())
        .arg(
            Arg::new("confirm-password")
                .long("confirm-password")
                .help("Password confirmation, defaults to --password"),
        )
}

fn login_command() -> Command {
    Command::new("login")
        .about("Sign in with an email, phone number or organization ID")
        .arg(
            Arg::new("identifier")
                .help("Email, phone number or organization ID")
                .env("SCIREG_IDENTIFIER")
                .required(true),
        )
        .arg(password_arg())
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("scireg")
        .about("Scientist registry authentication client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("SCIREG_GIT_SHA"),
            ")"
        ))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Registry API base URL, example: https://registry.tld/api")
                .env("SCIREG_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .help("Credential store file (default: ~/.scireg/credentials.json)")
                .env("SCIREG_STORE")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SCIREG_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(register_command())
        .subcommand(login_command())
        .subcommand(Command::new("logout").about("Sign out and clear stored credentials"))
        .subcommand(Command::new("profile").about("Refresh and show the signed-in profile"))
        .subcommand(Command::new("status").about("Show whether a session is active"))
}
