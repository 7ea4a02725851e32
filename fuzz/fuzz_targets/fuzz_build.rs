#![no_main]

use std::collections::BTreeMap;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use envbind::provider::MapProvider;
use envbind::{Bindable, Builder};

#[derive(Bindable, Debug, Default)]
struct Inner {
    #[envvar = "PORT,required"]
    pub port: u16,

    #[envvar = "HOSTS"]
    pub hosts: Vec<String>,
}

#[derive(Bindable, Debug, Default)]
struct Config {
    #[envvar = "NAME,default=fuzz"]
    pub name: String,

    #[envvar = "TIMEOUT"]
    pub timeout: Duration,

    #[envvar = "LABELS"]
    pub labels: BTreeMap<String, String>,

    #[envvar = ">,prefix=INNER_"]
    pub inner: Option<Inner>,
}

fuzz_target!(|vars: Vec<(&str, &str)>| {
    let provider: MapProvider = vars.into_iter().collect();

    // === A build reports errors, it never panics ===
    match Builder::new().prefix_fallback(true).provider(provider).build::<Config>() {
        Ok(config) => {
            let _ = format!("{config:?}");
        }
        Err(err) => {
            let _ = err.to_string();
        }
    }
});
