#![no_main]

use dancer_backend_motion::generate::generate_actions;
use dancer_spec::{AudioFeatures, CalibrationParameters, OverflowPolicy};
use libfuzzer_sys::fuzz_target;

// Arbitrary JSON must either be rejected or produce in-range, time-ordered
// actions under every policy.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(features) = AudioFeatures::from_json(text) else {
        return;
    };
    for policy in OverflowPolicy::ALL {
        let params = CalibrationParameters::default().with_policy(policy);
        if let Ok(actions) = generate_actions(&features, &params) {
            assert!(actions.all_in_range());
            assert!(actions.is_time_ordered());
        }
    }
});
