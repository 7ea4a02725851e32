//! Less common tag combinations and extension types.

#![allow(clippy::pedantic)]

use std::net::IpAddr;
use std::path::PathBuf;

use chrono::{DateTime, Datelike, Utc};
use envbind::provider::MapProvider;
use envbind::{Bindable, BoxError, Builder, TextDecode};

fn builder(vars: &[(&str, &str)]) -> Builder {
    Builder::new().provider(vars.iter().copied().collect::<MapProvider>())
}

#[derive(Bindable, Debug, Default)]
struct NestedConfig {
    #[envvar = "MY_VAL"]
    pub my_val: String,
}

#[derive(Debug, Default)]
struct NotConfig {
    pub my_int8: i8,
}

#[derive(Bindable, Debug, Default)]
struct OddConfig {
    // No external key, only the default
    #[envvar = "-,default=7"]
    pub default_only: i64,

    #[envvar = ">"]
    pub nested: NestedConfig,

    #[envvar = ">,prefix=ALT_"]
    pub alt_nested: Option<NestedConfig>,

    pub ignored_nested: NestedConfig,

    #[envvar = "-"]
    pub ignored_nested2: NestedConfig,

    // Two fields may read the same key
    #[envvar = "MY_INT"]
    pub my_int: i64,

    #[envvar = "MY_INT"]
    pub my_same_int: i64,

    pub not_config: Option<NotConfig>,

    #[envvar = "-,default=192.168.0.42"]
    pub my_ip: Option<IpAddr>,

    #[envvar = "-,default=2000-03-17T13:37:00Z"]
    pub my_time: DateTime<Utc>,

    #[envvar = "MY_PATH"]
    pub my_path: PathBuf,
}

#[test]
fn test_oddities() {
    let cfg: OddConfig = builder(&[
        ("MY_VAL", "my val"),
        ("ALT_MY_VAL", "alt my val"),
        ("MY_INT", "42"),
        ("DEFAULT_ONLY", "99"),
        ("MY_PATH", "/etc/app.toml"),
    ])
    .build()
    .unwrap();

    assert_eq!(cfg.default_only, 7);
    assert_eq!(cfg.nested.my_val, "my val");
    assert_eq!(
        cfg.alt_nested.as_ref().map(|n| n.my_val.as_str()),
        Some("alt my val")
    );
    assert_eq!(cfg.ignored_nested.my_val, "");
    assert_eq!(cfg.ignored_nested2.my_val, "");
    assert_eq!(cfg.my_int, 42);
    assert_eq!(cfg.my_same_int, 42);
    assert!(cfg.not_config.is_none());
    assert_eq!(cfg.my_ip.map(|ip| ip.to_string()).as_deref(), Some("192.168.0.42"));
    assert_eq!(cfg.my_time.day(), 17);
    assert_eq!(cfg.my_time.month(), 3);
    assert_eq!(cfg.my_time.year(), 2000);
    assert_eq!(cfg.my_path, PathBuf::from("/etc/app.toml"));
}

// ============================================================================
// Text Decoding
// ============================================================================

#[derive(Debug, Default, PartialEq, Clone, Copy)]
enum Color {
    #[default]
    Unset,
    Red,
    Green,
    Blue,
}

impl TextDecode for Color {
    fn decode_text(text: &str) -> Result<Self, BoxError> {
        match text.to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            _ => Err(format!("unrecognized color name {text:?}").into()),
        }
    }
}

#[derive(Bindable, Debug, Default)]
struct Palette {
    #[envvar = "PRIMARY,default=red"]
    pub primary: Color,

    #[envvar = "ACCENT"]
    pub accent: Option<Color>,
}

#[test]
fn test_text_decode_enum() {
    let cfg: Palette = builder(&[("ACCENT", "BLUE")]).build().unwrap();

    assert_eq!(cfg.primary, Color::Red);
    assert_eq!(cfg.accent, Some(Color::Blue));
}

#[test]
fn test_text_decode_error_is_verbatim() {
    let err = builder(&[("PRIMARY", "purple")])
        .build::<Palette>()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"error reading "PRIMARY" (unrecognized color name "purple")"#
    );
}

#[test]
fn test_from_str_types_via_macro() {
    #[derive(Debug, Default, PartialEq)]
    struct Port(u16);

    impl std::str::FromStr for Port {
        type Err = std::num::ParseIntError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            s.parse().map(Port)
        }
    }

    envbind::impl_text_decode!(Port);

    #[derive(Bindable, Debug, Default)]
    struct Cfg {
        #[envvar = "PORT"]
        pub port: Port,
    }

    let cfg: Cfg = builder(&[("PORT", "8443")]).build().unwrap();
    assert_eq!(cfg.port, Port(8443));
}

#[test]
#[cfg(feature = "url")]
fn test_url_field() {
    #[derive(Bindable, Debug, Default)]
    struct Cfg {
        #[envvar = "MY_URL"]
        pub my_url: Option<url::Url>,
    }

    let cfg: Cfg = builder(&[("MY_URL", "https://example.com/?p=744")])
        .build()
        .unwrap();

    assert_eq!(
        cfg.my_url.map(String::from).as_deref(),
        Some("https://example.com/?p=744")
    );
}
