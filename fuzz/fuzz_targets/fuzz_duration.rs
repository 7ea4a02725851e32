#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    match envbind::parse_duration(data) {
        Ok(duration) => {
            // Integer input is taken as nanoseconds
            if let Ok(nanos) = data.parse::<u64>() {
                assert_eq!(duration.as_nanos(), u128::from(nanos));
            }
        }
        Err(err) => {
            let _ = err.to_string();
        }
    }
});
