use proptest::prelude::*;

use btc_script::chunk::encode_chunks;
use btc_script::Script;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn script_hex_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let script = Script::from_bytes(&data);
        let hex_str = script.to_hex();
        let script2 = Script::from_hex(&hex_str).unwrap();
        prop_assert_eq!(script.as_bytes(), script2.as_bytes());
    }

    #[test]
    fn chunk_roundtrip_is_identity(data in prop::collection::vec(any::<u8>(), 0..256)) {
        // Not every random byte string tokenizes (a push can run past the
        // end), but every one that does must re-encode byte-for-byte.
        let script = Script::from_bytes(&data);
        if let Ok(chunks) = script.chunks() {
            prop_assert_eq!(encode_chunks(&chunks), data);
        }
    }

    #[test]
    fn separator_stripping_never_grows(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let script = Script::from_bytes(&data);
        if let Ok(stripped) = script.without_code_separators() {
            prop_assert!(stripped.len() <= script.len());
            // Stripping twice is the same as stripping once.
            prop_assert_eq!(stripped.without_code_separators().unwrap(), stripped);
        }
    }
}
