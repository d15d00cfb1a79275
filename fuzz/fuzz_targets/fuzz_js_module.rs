#![no_main]

use libfuzzer_sys::fuzz_target;
use stylecfg::config::export::to_js_module;
use stylecfg::config::loader::ConfigLoader;
use stylecfg::config::model::to_external_schema;

fuzz_target!(|data: &[u8]| {
    let Ok(yaml_str) = std::str::from_utf8(data) else {
        return;
    };

    let mut loader = ConfigLoader::with_defaults();
    if let Ok(result) = loader.load_from_str(yaml_str) {
        let schema = to_external_schema(&result.config);
        let _ = to_js_module(&schema);
    }
});
