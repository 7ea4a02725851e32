//! Example: a flat configuration struct
//!
//! Run with the required var unset to see the error:
//!   cargo run --package envbind --example basic
//!
//! Run with it set:
//!   `DATABASE_URL=postgres://localhost cargo run --package envbind --example basic`

use std::time::Duration;

use envbind::Bindable;

#[derive(Bindable, Debug, Default)]
struct Config {
    #[envvar = "DATABASE_URL,required"]
    pub db_url: String,

    #[envvar = "PORT,default=8080"]
    pub port: u16,

    #[envvar = "DEBUG,default=false"]
    pub debug: bool,

    #[envvar = "TIMEOUT,default=30s"]
    pub timeout: Duration,

    #[envvar = "ALLOWED_ORIGINS"]
    pub allowed_origins: Vec<String>,

    #[envvar = "MAX_CONNECTIONS"]
    pub max_connections: Option<u32>,
}

fn main() {
    match Config::from_env() {
        Ok(config) => {
            println!("Successfully loaded config!");
            println!("  DATABASE_URL    = {}", config.db_url);
            println!("  PORT            = {} (default: 8080)", config.port);
            println!("  DEBUG           = {} (default: false)", config.debug);
            println!("  TIMEOUT         = {:?} (default: 30s)", config.timeout);
            println!("  ALLOWED_ORIGINS = {:?}", config.allowed_origins);
            println!("  MAX_CONNECTIONS = {:?}", config.max_connections);
        }

        Err(e) => {
            eprintln!("{:?}", miette::Report::from(e));
            std::process::exit(1);
        }
    }
}
