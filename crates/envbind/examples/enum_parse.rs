//! Example: a custom enum field through `TextDecode`
//!
//!   `LOG_LEVEL=warn LOG_FALLBACK=loud cargo run --package envbind --example enum_parse`

use envbind::{Bindable, BoxError, TextDecode};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl TextDecode for LogLevel {
    fn decode_text(text: &str) -> Result<Self, BoxError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(format!("unknown log level {other:?}").into()),
        }
    }
}

#[derive(Bindable, Debug, Default)]
struct Config {
    #[envvar = "LOG_LEVEL,default=info"]
    pub level: LogLevel,

    #[envvar = "LOG_FALLBACK"]
    pub fallback: Option<LogLevel>,
}

fn main() {
    match Config::from_env() {
        Ok(config) => println!("{config:#?}"),

        Err(e) => {
            // An unknown level is reported with the decoder's own message
            eprintln!("{:?}", miette::Report::from(e));
            std::process::exit(1);
        }
    }
}
