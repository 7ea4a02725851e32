//! Nested structs, with and without `Option`.

use envbind::Bindable;

#[derive(Bindable, Default)]
struct Tls {
    #[envvar = "CERT"]
    pub cert: String,
}

#[derive(Bindable, Default)]
struct Server {
    #[envvar = "PORT"]
    pub port: u16,

    #[envvar = ">,prefix=TLS_"]
    pub tls: Option<Tls>,
}

#[derive(Bindable, Default)]
struct Config {
    #[envvar = ">,prefix=SERVER_"]
    pub server: Server,
}

fn main() {
    let _ = envbind::Builder::new().keys::<Config>();
}
