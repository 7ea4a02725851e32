//! End-to-end build tests.
//!
//! Values come from a `MapProvider`, so these tests never touch the process
//! environment and can run in parallel.

#![allow(clippy::pedantic)]

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use envbind::provider::MapProvider;
use envbind::{Bindable, BoxError, Builder, Error, Hooks};

fn builder(vars: &[(&str, &str)]) -> Builder {
    Builder::new().provider(vars.iter().copied().collect::<MapProvider>())
}

// ============================================================================
// Fixture
// ============================================================================

#[derive(Bindable, Debug, Default)]
#[bind(hooks)]
struct ServiceConfig {
    #[envvar = "MY_INT"]
    pub my_int: i64,

    #[envvar = "MY_UINT,required"]
    pub my_uint: u64,

    #[envvar = "MY_FLOAT"]
    pub my_float: f32,

    #[envvar = "MY_DURATION"]
    pub my_duration: Duration,

    #[envvar = "MY_TIME"]
    pub my_time: DateTime<FixedOffset>,

    #[envvar = "MY_BYTES"]
    pub my_bytes: Vec<u8>,

    #[envvar = "MY_STRING"]
    pub my_string: String,

    #[envvar = "MY_BOOL"]
    pub my_bool: bool,

    #[envvar = "MY_DEFAULT_INT,default=1234"]
    pub my_default_int: i64,

    #[envvar = "MY_MAP"]
    pub my_map: HashMap<String, String>,

    init_called: bool,
    validate_called: bool,
    pub not_set: i64,
}

impl Hooks for ServiceConfig {
    fn init(&mut self) -> Result<(), BoxError> {
        self.my_int = 8081;
        self.my_duration = Duration::from_secs(3);
        self.my_time = DateTime::parse_from_rfc3339("2000-03-17T00:13:37Z")?;
        self.init_called = true;
        Ok(())
    }

    fn validate(&mut self) -> Result<(), BoxError> {
        self.validate_called = true;
        Ok(())
    }
}

// ============================================================================
// Happy Paths
// ============================================================================

#[test]
fn test_init_hook_and_defaults() {
    let cfg: ServiceConfig = builder(&[("MY_UINT", "142")]).build().unwrap();

    assert_eq!(cfg.my_int, 8081);
    assert_eq!(cfg.my_duration, Duration::from_secs(3));
    assert_eq!(cfg.my_time.day(), 17);
    assert!(cfg.my_bytes.is_empty());
    assert_eq!(cfg.my_default_int, 1234);
    assert_eq!(cfg.not_set, 0);
}

#[test]
fn test_values_from_provider() {
    let cfg: ServiceConfig = builder(&[
        ("MY_INT", "42"),
        ("MY_UINT", "142"),
        ("MY_FLOAT", "2.718"),
        ("MY_TIME", "2022-10-10T21:01:16+00:00"),
        ("MY_DURATION", "3s"),
        ("MY_BYTES", "secretPassword"),
        ("MY_STRING", "Nobody expects the Spanish Inquisition!"),
        ("MY_BOOL", "tRuE"),
        ("MY_MAP", "key1:val1,key2:val2,key3:val3"),
    ])
    .build()
    .unwrap();

    assert_eq!(cfg.my_int, 42);
    assert_eq!(cfg.my_uint, 142);
    assert_eq!(cfg.my_float, 2.718);
    assert_eq!(cfg.my_time.second(), 16);
    assert_eq!(cfg.my_duration, Duration::from_secs(3));
    assert_eq!(cfg.my_bytes, b"secretPassword");
    assert_eq!(cfg.my_string, "Nobody expects the Spanish Inquisition!");
    assert!(cfg.my_bool);

    assert_eq!(cfg.my_map.len(), 3);
    assert_eq!(cfg.my_map["key1"], "val1");
    assert_eq!(cfg.my_map["key2"], "val2");
    assert_eq!(cfg.my_map["key3"], "val3");

    assert!(cfg.init_called);
    assert!(cfg.validate_called);
}

#[test]
fn test_duration_forms() {
    let cases = [
        ("3s", Duration::from_secs(3)),
        ("1m", Duration::from_secs(60)),
        ("100ms", Duration::from_millis(100)),
        ("100000000", Duration::from_nanos(100_000_000)),
    ];

    for (raw, expected) in cases {
        let cfg: ServiceConfig = builder(&[("MY_UINT", "1"), ("MY_DURATION", raw)])
            .build()
            .unwrap();

        assert_eq!(cfg.my_duration, expected, "{raw}");
    }
}

#[test]
fn test_provider_overrides_default() {
    let cfg: ServiceConfig = builder(&[("MY_UINT", "1"), ("MY_DEFAULT_INT", "7")])
        .build()
        .unwrap();

    assert_eq!(cfg.my_default_int, 7);
}

#[test]
fn test_bind_into_existing_instance() {
    let mut cfg = ServiceConfig {
        my_string: "kept".to_string(),
        ..ServiceConfig::default()
    };

    builder(&[("MY_UINT", "5")]).bind(&mut cfg).unwrap();

    assert_eq!(cfg.my_uint, 5);
    assert_eq!(cfg.my_string, "kept");
    assert!(cfg.init_called);
    assert!(cfg.validate_called);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_read_errors() {
    let cases = [
        (
            "MY_INT",
            "forty-two",
            r#"error reading "MY_INT" (invalid integer "forty-two": invalid digit found in string)"#,
        ),
        (
            "MY_UINT",
            "-42",
            r#"error reading "MY_UINT" (invalid integer "-42": invalid digit found in string)"#,
        ),
        (
            "MY_FLOAT",
            "pi",
            r#"error reading "MY_FLOAT" (invalid float "pi": invalid float literal)"#,
        ),
        (
            "MY_DURATION",
            "3ly",
            r#"error reading "MY_DURATION" (time: unknown unit "ly" in duration "3ly")"#,
        ),
        (
            "MY_BOOL",
            "supposition",
            r#"error reading "MY_BOOL" (string "supposition" is not a valid boolean value)"#,
        ),
        ("NOT_MY_UINT", "123", r#"missing required var "MY_UINT""#),
    ];

    for (key, value, expected) in cases {
        let err = builder(&[(key, value)])
            .build::<ServiceConfig>()
            .unwrap_err();

        assert_eq!(err.to_string(), expected, "{key}={value}");
    }
}

#[test]
fn test_timestamp_error_is_a_read_error() {
    let err = builder(&[("MY_UINT", "1"), ("MY_TIME", "1999")])
        .build::<ServiceConfig>()
        .unwrap_err();

    match err {
        Error::Read { key, .. } => assert_eq!(key, "MY_TIME"),
        other => panic!("expected a read error, got {other:?}"),
    }
}

#[test]
fn test_invalid_default() {
    #[derive(Bindable, Debug, Default)]
    struct BadIntDefault {
        #[envvar = "MY_INT,default=abc"]
        pub my_int: i64,
    }

    let err = builder(&[]).build::<BadIntDefault>().unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"error setting default value for "MY_INT" (invalid integer "abc": invalid digit found in string)"#
    );
}

#[test]
fn test_validate_hook_failure() {
    #[derive(Bindable, Debug, Default)]
    #[bind(hooks)]
    struct AnswerConfig {
        #[envvar = "answer,default=54"]
        pub answer: i32,
    }

    impl Hooks for AnswerConfig {
        fn validate(&mut self) -> Result<(), BoxError> {
            if self.answer != 42 {
                return Err("what is six times nine?".into());
            }
            Ok(())
        }
    }

    let err = builder(&[]).build::<AnswerConfig>().unwrap_err();
    assert!(matches!(err, Error::Hook(_)));
    assert_eq!(err.to_string(), "what is six times nine?");

    let cfg: AnswerConfig = builder(&[("answer", "42")]).build().unwrap();
    assert_eq!(cfg.answer, 42);
}

#[test]
fn test_init_hook_failure_stops_before_defaults() {
    #[derive(Bindable, Debug, Default)]
    #[bind(hooks)]
    struct Refuses {
        #[envvar = "VALUE,default=abc"]
        pub value: u8,
    }

    impl Hooks for Refuses {
        fn init(&mut self) -> Result<(), BoxError> {
            Err("not today".into())
        }
    }

    let err = builder(&[]).build::<Refuses>().unwrap_err();
    assert_eq!(err.to_string(), "not today");
}

#[test]
fn test_tag_errors_come_before_hooks() {
    #[derive(Bindable, Debug, Default)]
    #[bind(hooks)]
    struct Malformed {
        #[envvar = ",required"]
        pub value: u8,
    }

    impl Hooks for Malformed {
        fn init(&mut self) -> Result<(), BoxError> {
            Err("init should not run".into())
        }
    }

    let err = builder(&[]).build::<Malformed>().unwrap_err();
    assert!(matches!(err, Error::TagSyntax(_)));
}

#[test]
fn test_missing_required_plural() {
    #[derive(Bindable, Debug, Default)]
    struct TwoRequired {
        #[envvar = "FIRST,required"]
        pub first: String,

        #[envvar = "SECOND,required"]
        pub second: String,
    }

    let err = builder(&[]).build::<TwoRequired>().unwrap_err();

    assert_eq!(err.to_string(), "missing required vars: FIRST,SECOND");
    assert_eq!(
        err.missing_keys(),
        Some(&["FIRST".to_string(), "SECOND".to_string()][..])
    );
}

#[test]
fn test_default_does_not_satisfy_required() {
    #[derive(Bindable, Debug, Default)]
    struct DefaultedRequired {
        #[envvar = "LEVEL,required,default=info"]
        pub level: String,
    }

    let err = builder(&[]).build::<DefaultedRequired>().unwrap_err();
    assert_eq!(err.to_string(), r#"missing required var "LEVEL""#);
}

#[test]
fn test_overflow_is_reported() {
    #[derive(Bindable, Debug, Default)]
    struct Narrow {
        #[envvar = "SMALL"]
        pub small: i8,
    }

    let err = builder(&[("SMALL", "300")]).build::<Narrow>().unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"error reading "SMALL" (overflow error: "300" does not fit in i8)"#
    );
}

#[test]
fn test_struct_with_plain_key_is_unsupported() {
    #[derive(Bindable, Debug, Default)]
    struct Leaf {
        #[envvar = "X"]
        pub x: u8,
    }

    #[derive(Bindable, Debug, Default)]
    struct Holder {
        #[envvar = "LEAF"]
        pub leaf: Leaf,
    }

    let err = builder(&[("LEAF", "anything")])
        .build::<Holder>()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"error reading "LEAF" (unsupported type/kind "Leaf/struct")"#
    );
}

#[test]
fn test_diagnostic_renders() {
    let err = builder(&[]).build::<ServiceConfig>().unwrap_err();
    let report = format!("{:?}", miette::Report::from(err));

    assert!(report.contains("envbind::missing_required"));
}

#[test]
fn test_repeated_default_uses_valued_occurrence() {
    #[derive(Bindable, Debug, Default)]
    struct Repeated {
        #[envvar = "LIMIT,default,default=7"]
        pub limit: u32,
    }

    let cfg: Repeated = builder(&[]).build().unwrap();
    assert_eq!(cfg.limit, 7);
}

// ============================================================================
// Panics in user code
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct Explosive;

impl envbind::TextDecode for Explosive {
    fn decode_text(text: &str) -> Result<Self, BoxError> {
        panic!("cannot decode {text}");
    }
}

#[test]
fn test_panicking_decoder_is_internal_error() {
    #[derive(Bindable, Debug, Default)]
    struct Cfg {
        #[envvar = "FUSE"]
        pub fuse: Explosive,
    }

    let err = builder(&[("FUSE", "lit")]).build::<Cfg>().unwrap_err();

    assert!(matches!(err, Error::Internal { .. }));
    assert_eq!(err.to_string(), "builder panic:  cannot decode lit");
}

#[test]
fn test_panicking_hook_is_internal_error() {
    #[derive(Bindable, Debug, Default)]
    #[bind(hooks)]
    struct Tripwire {
        #[envvar = "VALUE,default=1"]
        pub value: u8,
    }

    impl Hooks for Tripwire {
        fn validate(&mut self) -> Result<(), BoxError> {
            panic!("validate blew up");
        }
    }

    let mut cfg = Tripwire::default();
    let err = builder(&[]).bind(&mut cfg).unwrap_err();

    assert!(matches!(err, Error::Internal { .. }));
    assert_eq!(err.to_string(), "builder panic:  validate blew up");
}
