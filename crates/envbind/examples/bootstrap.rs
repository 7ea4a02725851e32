//! Example: an init hook that seeds defaults exactly once
//!
//! The `init` hook runs on every build and bind. A guard flag on the
//! instance keeps a second bind from resetting values computed the first
//! time around.
//!
//!   `WORKERS=8 cargo run --package envbind --example bootstrap`

use envbind::{Bindable, BoxError, Hooks};

#[derive(Bindable, Debug, Default)]
#[bind(hooks)]
struct Config {
    #[envvar = "WORKERS"]
    pub workers: usize,

    #[envvar = "NODE_NAME"]
    pub node_name: String,

    seeded: bool,
}

impl Hooks for Config {
    fn init(&mut self) -> Result<(), BoxError> {
        if self.seeded {
            return Ok(());
        }

        self.workers = std::thread::available_parallelism()?.get();
        self.node_name = format!("node-{}", std::process::id());
        self.seeded = true;
        Ok(())
    }

    fn validate(&mut self) -> Result<(), BoxError> {
        if self.workers == 0 {
            return Err("WORKERS must be at least 1".into());
        }
        Ok(())
    }
}

fn main() -> envbind::Result<()> {
    let mut config = Config::from_env()?;
    println!("first build: {config:?}");

    config.node_name = "renamed-by-caller".to_string();
    envbind::init_config(&mut config)?;
    println!("after rebind: {config:?}");

    Ok(())
}
