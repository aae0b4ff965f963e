use proptest::prelude::*;

use btc_primitives::chainhash::Hash;
use btc_primitives::util::{BtcReader, BtcWriter, VarInt};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn varint_roundtrip(value in any::<u64>()) {
        let encoded = VarInt(value).to_bytes();
        prop_assert_eq!(encoded.len(), VarInt(value).length());
        let (decoded, consumed) = VarInt::from_bytes(&encoded).unwrap();
        prop_assert_eq!(decoded.value(), value);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn varslice_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut writer = BtcWriter::new();
        writer.write_varslice(&bytes);
        let data = writer.into_bytes();
        prop_assert_eq!(data.len(), VarInt::from(bytes.len()).length() + bytes.len());

        let mut reader = BtcReader::new(&data);
        prop_assert_eq!(reader.read_varslice().unwrap(), &bytes[..]);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn vector_roundtrip(items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8)) {
        let mut writer = BtcWriter::new();
        writer.write_vector(&items);
        let data = writer.into_bytes();

        let mut reader = BtcReader::new(&data);
        prop_assert_eq!(reader.read_vector().unwrap(), items);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        let hex_str = hash.to_string();
        let hash2 = Hash::from_hex(&hex_str).unwrap();
        prop_assert_eq!(hash.as_bytes(), hash2.as_bytes());
    }
}
