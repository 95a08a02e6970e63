// Command-line layer: flag parsing, validation of required combinations,
// selection of the setting category and printing of results. Network
// access goes through the `SettingsService` handed to `execute`, so all
// validation happens before any request is made.

use crate::defaults;
use crate::service::{Result, SettingsService};
use crate::settings::{Category, Change, GetShape, Properties, TargetUsers};
use clap::Parser;
use std::io::Write;
use thiserror::Error;
use tracing::debug;

pub const USAGE: &str = "\
Usage: gmail-settings --username <username> --password <password> --domain <domain>
 --setting <setting> [--disable] [--get true --destination_user <destination_user>]

A simple application that demonstrates how to get or change Gmail settings in a Google Apps email account. Authenticates using the provided login credentials, then retrieves or modifies the settings of the specified account.

Specify username and destination_user as just the name, not the email address.  For example, to change settings for joe@example.com use these options:  --username joe --password your_password --domain example.com

**For changing settings...
Select which setting to change with the setting flag. For example, to change the POP3 settings, use --setting pop (allowed values are filter, sendas, label, forwarding, pop, imap, vacation, signature, general, language, and webclip.)

By default the selected setting will be enabled, but with the --disable flag it will be disabled.

**For retrieving settings...
To retrieve settings, use the --get=true option and mandatorily specify a single --destination_user. For example, to get the signature settings, use --get true --setting signature --destination_user joe (allowed values are label, sendas, forwarding, pop, imap, vacation, and signature).
";

/// Raw flags. Everything is optional here so that missing values end in
/// our usage text rather than clap's own error.
#[derive(Parser, Debug, Default)]
#[command(name = "gmail-settings", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub domain: Option<String>,
    #[arg(long)]
    pub setting: Option<String>,
    #[arg(long = "destination_user")]
    pub destination_user: Option<String>,
    /// Only the value `true` (any case) turns on a get.
    #[arg(long)]
    pub get: Option<String>,
    #[arg(long)]
    pub disable: bool,
    #[arg(long)]
    pub help: bool,
}

/// Reasons to print usage and exit with status 1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("help requested")]
    Help,
    #[error("invalid arguments: {0}")]
    Invalid(String),
    #[error("missing required flag --{0}")]
    Missing(&'static str),
    #[error("unknown setting {0:?}")]
    UnknownSetting(String),
    #[error("Retrieving {0} settings is not supported.")]
    GetNotSupported(Category),
}

/// A validated settings request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub username: String,
    pub password: String,
    pub domain: String,
    pub destination_user: Option<String>,
    pub setting: String,
    pub is_get: bool,
    pub is_enabled: bool,
}

/// The single operation an invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Retrieve { category: Category, user: String },
    Change { change: Change, users: TargetUsers },
}

impl Args {
    /// Parse flags, treating any clap failure as a usage error.
    pub fn parse_from_args<I, T>(args: I) -> std::result::Result<Args, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Args::try_parse_from(args).map_err(|e| UsageError::Invalid(e.to_string().trim().to_string()))
    }
}

impl Request {
    pub fn from_args(args: Args) -> std::result::Result<Request, UsageError> {
        if args.help {
            return Err(UsageError::Help);
        }
        let is_get = args
            .get
            .as_deref()
            .is_some_and(|g| g.eq_ignore_ascii_case("true"));
        let username = args.username.ok_or(UsageError::Missing("username"))?;
        let password = args.password.ok_or(UsageError::Missing("password"))?;
        let domain = args.domain.ok_or(UsageError::Missing("domain"))?;
        let setting = args.setting.ok_or(UsageError::Missing("setting"))?;
        if is_get && args.destination_user.is_none() {
            return Err(UsageError::Missing("destination_user"));
        }
        Ok(Request {
            username,
            password,
            domain,
            destination_user: args.destination_user,
            setting,
            is_get,
            is_enabled: !args.disable,
        })
    }

    /// Resolve the setting name and decide what to do, without touching
    /// the network.
    pub fn plan(&self) -> std::result::Result<Plan, UsageError> {
        let category = Category::from_setting(&self.setting)
            .ok_or_else(|| UsageError::UnknownSetting(self.setting.clone()))?;
        // A write without a destination user targets the caller's own account.
        let user = self
            .destination_user
            .clone()
            .unwrap_or_else(|| self.username.clone());
        if self.is_get {
            if !category.supports_get() {
                return Err(UsageError::GetNotSupported(category));
            }
            return Ok(Plan::Retrieve { category, user });
        }
        Ok(Plan::Change {
            change: defaults::change_for(category, &self.domain, self.is_enabled),
            users: TargetUsers::one(user),
        })
    }
}

/// Text printed before usage for a usage error, if any.
pub fn usage_preamble(err: &UsageError) -> Option<String> {
    match err {
        UsageError::GetNotSupported(_) => Some(format!("{err}\n")),
        _ => None,
    }
}

/// Run the planned operation and print its result to `out`.
pub fn execute<S, W>(plan: &Plan, service: &S, out: &mut W) -> Result<()>
where
    S: SettingsService + ?Sized,
    W: Write,
{
    match plan {
        Plan::Retrieve { category, user } => {
            debug!(%category, %user, "retrieving settings");
            retrieve(*category, user, service, out)
        }
        Plan::Change { change, users } => {
            debug!(category = %change.category(), "changing settings");
            service.apply(users, change)?;
            for user in users.iter() {
                writeln!(out, "Updated {} settings for {}.", change.category(), user)?;
            }
            Ok(())
        }
    }
}

fn retrieve<S, W>(category: Category, user: &str, service: &S, out: &mut W) -> Result<()>
where
    S: SettingsService + ?Sized,
    W: Write,
{
    match category.get_shape() {
        Some(GetShape::Feed) => {
            let heading = match category {
                Category::SendAs => "sendAs setting",
                _ => "label",
            };
            let entries = service.retrieve_feed(user, category)?;
            for (i, entry) in entries.iter().enumerate() {
                writeln!(out, "{} {}:", heading, i + 1)?;
                write_properties(out, entry)?;
            }
        }
        Some(GetShape::Entry) => {
            let entry = service.retrieve_entry(user, category)?;
            writeln!(out, "{} settings:", category)?;
            write_properties(out, &entry)?;
        }
        Some(GetShape::Flag) => {
            let enabled = service.retrieve_imap(user)?;
            writeln!(out, "{} settings:", category)?;
            writeln!(out, "\tenabled: {}", enabled)?;
        }
        Some(GetShape::Text) => {
            let signature = service.retrieve_signature(user)?;
            writeln!(out, "signature:")?;
            writeln!(out, "\tvalue: {}", signature)?;
        }
        // Plan::Retrieve is only built for readable categories.
        None => {}
    }
    Ok(())
}

fn write_properties<W: Write>(out: &mut W, entry: &Properties) -> std::io::Result<()> {
    for (key, value) in entry {
        writeln!(out, "\t{}: {}", key, value)?;
    }
    Ok(())
}
