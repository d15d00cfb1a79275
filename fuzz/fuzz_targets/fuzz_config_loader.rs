#![no_main]

use libfuzzer_sys::fuzz_target;
use stylecfg::config::loader::ConfigLoader;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        let mut loader = ConfigLoader::with_defaults();

        // Only panics matter here
        let _ = loader.load_from_str(yaml_str);
    }
});
