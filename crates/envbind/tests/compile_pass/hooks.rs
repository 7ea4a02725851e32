//! Hand-written lifecycle hooks.

use envbind::{Bindable, BoxError, Hooks};

#[derive(Bindable, Default)]
#[bind(hooks)]
struct Config {
    #[envvar = "WORKERS,default=4"]
    pub workers: usize,
}

impl Hooks for Config {
    fn init(&mut self) -> Result<(), BoxError> {
        self.workers = 1;
        Ok(())
    }

    fn validate(&mut self) -> Result<(), BoxError> {
        if self.workers == 0 {
            return Err("workers must be positive".into());
        }
        Ok(())
    }
}

fn main() {
    let _ = envbind::new_config::<Config>();
}
