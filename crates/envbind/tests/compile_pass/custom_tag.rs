//! Tags in more than one namespace.

use envbind::Bindable;

#[derive(Bindable, Default)]
struct Config {
    #[envvar = "PORT"]
    #[tag(ops = "OPS_PORT,default=9000")]
    pub port: u16,

    #[tag(ops = "OPS_ONLY")]
    pub ops_only: String,
}

fn main() {
    let _ = envbind::Builder::new().tag_key("ops").build::<Config>();
}
