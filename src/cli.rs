//! Command-line arguments: `tripane [--service-url URL]`.

pub const USAGE: &str = "usage: tripane [--service-url URL]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub service_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("unknown argument: {0}")]
    Unknown(String),
}

impl CliArgs {
    /// Parses arguments after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = CliArgs::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            if arg == "--service-url" {
                let value = args.next().ok_or(CliError::MissingValue("--service-url"))?;
                out.service_url = Some(value);
            } else if let Some(value) = arg.strip_prefix("--service-url=") {
                if value.is_empty() {
                    return Err(CliError::MissingValue("--service-url"));
                }
                out.service_url = Some(value.to_string());
            } else {
                return Err(CliError::Unknown(arg));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli.rs"]
mod tests;
