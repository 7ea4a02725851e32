//! `Option<T>` fields.

#![allow(clippy::pedantic)]

use std::net::IpAddr;
use std::time::Duration;

use envbind::provider::MapProvider;
use envbind::{Bindable, Builder};

fn builder(vars: &[(&str, &str)]) -> Builder {
    Builder::new().provider(vars.iter().copied().collect::<MapProvider>())
}

#[derive(Bindable, Debug, Default)]
struct OptionConfig {
    #[envvar = "MY_INT"]
    pub my_int: Option<i64>,

    #[envvar = "MY_INT8"]
    pub my_int8: Option<i8>,

    #[envvar = "MY_INT16"]
    pub my_int16: Option<i16>,

    #[envvar = "MY_INT32"]
    pub my_int32: Option<i32>,

    #[envvar = "MY_UINT"]
    pub my_uint: Option<usize>,

    #[envvar = "MY_UINT8"]
    pub my_uint8: Option<u8>,

    #[envvar = "MY_UINT16"]
    pub my_uint16: Option<u16>,

    #[envvar = "MY_UINT32"]
    pub my_uint32: Option<u32>,

    #[envvar = "MY_UINT64"]
    pub my_uint64: Option<u64>,

    #[envvar = "MY_FLOAT32"]
    pub my_float32: Option<f32>,

    #[envvar = "MY_FLOAT64"]
    pub my_float64: Option<f64>,

    #[envvar = "MY_DURATION"]
    pub my_duration: Option<Duration>,

    #[envvar = "MY_STRING"]
    pub my_string: Option<String>,

    #[envvar = "MY_BOOL"]
    pub my_bool: Option<bool>,

    #[envvar = "MY_IP"]
    pub my_ip: Option<IpAddr>,

    #[envvar = "MY_NAMES"]
    pub my_names: Option<Vec<String>>,
}

#[test]
fn test_option_fields() {
    let cfg: OptionConfig = builder(&[
        ("MY_INT", "42"),
        ("MY_INT8", "8"),
        ("MY_INT16", "160"),
        ("MY_INT32", "3200"),
        ("MY_UINT", "142"),
        ("MY_UINT8", "18"),
        ("MY_UINT16", "1160"),
        ("MY_UINT32", "13200"),
        ("MY_UINT64", "164000"),
        ("MY_FLOAT32", "2.718"),
        ("MY_FLOAT64", "3.142"),
        ("MY_DURATION", "3s"),
        ("MY_STRING", "Nobody expects the Spanish Inquisition!"),
        ("MY_BOOL", "tRuE"),
        ("MY_IP", "::1"),
        ("MY_NAMES", "a,b"),
    ])
    .build()
    .unwrap();

    assert_eq!(cfg.my_int, Some(42));
    assert_eq!(cfg.my_int8, Some(8));
    assert_eq!(cfg.my_int16, Some(160));
    assert_eq!(cfg.my_int32, Some(3200));
    assert_eq!(cfg.my_uint, Some(142));
    assert_eq!(cfg.my_uint8, Some(18));
    assert_eq!(cfg.my_uint16, Some(1160));
    assert_eq!(cfg.my_uint32, Some(13200));
    assert_eq!(cfg.my_uint64, Some(164_000));
    assert_eq!(cfg.my_float32, Some(2.718));
    assert_eq!(cfg.my_float64, Some(3.142));
    assert_eq!(cfg.my_duration, Some(Duration::from_secs(3)));
    assert_eq!(
        cfg.my_string.as_deref(),
        Some("Nobody expects the Spanish Inquisition!")
    );
    assert_eq!(cfg.my_bool, Some(true));
    assert!(cfg.my_ip.is_some_and(|ip| ip.is_loopback()));
    assert_eq!(cfg.my_names, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_unset_options_stay_none() {
    let cfg: OptionConfig = builder(&[]).build().unwrap();

    assert_eq!(cfg.my_int, None);
    assert_eq!(cfg.my_string, None);
    assert_eq!(cfg.my_ip, None);
}

#[test]
fn test_option_parse_error() {
    let err = builder(&[("MY_UINT8", "256")])
        .build::<OptionConfig>()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"error reading "MY_UINT8" (overflow error: "256" does not fit in u8)"#
    );
}

#[test]
fn test_option_of_unsupported_type_is_left_unset() {
    #[derive(Bindable, Debug, Default)]
    struct Cfg {
        #[envvar = "NESTED_OPTION"]
        pub nested_option: Option<Option<u8>>,
    }

    let cfg: Cfg = builder(&[("NESTED_OPTION", "8")]).build().unwrap();
    assert_eq!(cfg.nested_option, None);
}

#[test]
fn test_option_default() {
    #[derive(Bindable, Debug, Default)]
    struct Cfg {
        #[envvar = "TIMEOUT,default=250ms"]
        pub timeout: Option<Duration>,
    }

    let cfg: Cfg = builder(&[]).build().unwrap();
    assert_eq!(cfg.timeout, Some(Duration::from_millis(250)));
}
