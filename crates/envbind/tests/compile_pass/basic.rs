//! Scalars, lists and optional fields.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use envbind::Bindable;

#[derive(Bindable, Default)]
struct Config {
    #[envvar = "NAME,required"]
    pub name: String,

    #[envvar = "PORT,default=8080"]
    pub port: u16,

    #[envvar = "RATIO"]
    pub ratio: f32,

    #[envvar = "DEBUG"]
    pub debug: bool,

    #[envvar = "TIMEOUT,default=5s"]
    pub timeout: Duration,

    #[envvar = "HOSTS"]
    pub hosts: Vec<String>,

    #[envvar = "LABELS"]
    pub labels: HashMap<String, String>,

    #[envvar = "BIND"]
    pub bind: Option<IpAddr>,

    #[envvar = "DATA_DIR"]
    pub data_dir: PathBuf,

    #[envvar = "-,default=internal"]
    pub internal: String,

    pub untagged: u64,
}

fn main() {
    let _ = Config::from_env();
}
