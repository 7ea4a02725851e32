//! Example: nested structs with accumulated prefixes
//!
//!   `APP_DB_HOST=db.internal APP_DB_POOL_SIZE=16 cargo run --package envbind --example nested_prefix`
//!
//! With prefix fallback a missing `APP_DB_PORT` falls back to `APP_PORT`.

use envbind::Bindable;
use envbind::provider::EnvProvider;

#[derive(Bindable, Debug, Default)]
struct Pool {
    #[envvar = "SIZE,default=4"]
    pub size: u32,
}

#[derive(Bindable, Debug, Default)]
struct Database {
    #[envvar = "HOST,required"]
    pub host: String,

    #[envvar = "PORT,default=5432"]
    pub port: u16,

    #[envvar = ">,prefix=POOL_"]
    pub pool: Option<Pool>,
}

#[derive(Bindable, Debug, Default)]
struct Config {
    #[envvar = ">,prefix=DB_"]
    pub db: Database,
}

fn main() {
    let builder = envbind::Builder::new()
        .provider(EnvProvider::with_prefix("APP_"))
        .prefix_fallback(true);

    match builder.env_example::<Config>() {
        Ok(example) => println!("{example}"),
        Err(e) => eprintln!("{:?}", miette::Report::from(e)),
    }

    match builder.build::<Config>() {
        Ok(config) => println!("{config:#?}"),

        Err(e) => {
            eprintln!("{:?}", miette::Report::from(e));
            std::process::exit(1);
        }
    }
}
