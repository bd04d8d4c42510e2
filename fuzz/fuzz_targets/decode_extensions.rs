#![no_main]

use libfuzzer_sys::fuzz_target;
use tlsconf_lib::checklist::verify_extensions;
use tlsconf_lib::{decode, decode_block, encode};

fuzz_target!(|data: &[u8]| {
    if let Ok(records) = decode(data) {
        // Whatever decodes must re-encode to the same bytes.
        let encoded = encode(&records).expect("decoded records re-encode");
        assert_eq!(encoded.as_slice(), data);
        for record in &records {
            let _ = record.known_type();
            let _ = record.to_hex();
        }
    }
    let _ = decode_block(data);
    let _ = verify_extensions(data, &[0x000A, 0x002B], &[0xFF01]);
});
