//! Serialization of tables, statistics and configuration.

#![cfg(feature = "serde")]

use symhuff_codec::{
    CodeTable, CompressionStats, Container, FrequencyMap, HuffConfig, HuffEncoder, compress,
    inspect,
};

#[test]
fn test_code_table_json() {
    let freqs = FrequencyMap::from_symbols(&[3, 3, 3, 7, 7, 2, 2, 2, 2, 9, 9, 6]);
    let table = CodeTable::from_frequencies(&freqs, 32).unwrap();

    let json = serde_json::to_string(&table).unwrap();
    let back: CodeTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);

    let json = serde_json::to_string(&freqs).unwrap();
    let back: FrequencyMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, freqs);
}

#[test]
fn test_config_json() {
    let config = HuffConfig::BARE.with_max_code_length(20);
    let json = serde_json::to_string(&config).unwrap();
    let back: HuffConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert_eq!(back.container, Container::Bare);
}

#[test]
fn test_stats_and_info_json() {
    let (_, stats) = HuffEncoder::default()
        .encode_with_stats(&[1, 2, 2, 3, 3, 3])
        .unwrap();
    let json = serde_json::to_string(&stats).unwrap();
    let back: CompressionStats = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stats);

    let info = inspect(&compress(&[1, 2, 2, 3, 3, 3]).unwrap()).unwrap();
    let value = serde_json::to_value(&info).unwrap();
    assert_eq!(value["symbol_count"], 6);
    assert_eq!(value["container"], "Framed");
}

#[test]
fn test_code_json_checked() {
    use symhuff_codec::Code;

    let code: Code = serde_json::from_str(r#"{"bits":5,"len":3}"#).unwrap();
    assert_eq!(code.to_bit_string(), "101");

    assert!(serde_json::from_str::<Code>(r#"{"bits":0,"len":0}"#).is_err());
    assert!(serde_json::from_str::<Code>(r#"{"bits":1,"len":40}"#).is_err());
    assert!(serde_json::from_str::<Code>(r#"{"bits":4,"len":2}"#).is_err());
}

#[test]
fn test_code_table_json_checked() {
    assert!(serde_json::from_str::<CodeTable>(r#"{"5":{"bits":0,"len":0}}"#).is_err());
    assert!(serde_json::from_str::<CodeTable>(r#"{"5":{"bits":1,"len":40}}"#).is_err());

    // "0" is a prefix of "01"
    let json = r#"{"1":{"bits":0,"len":1},"2":{"bits":1,"len":2}}"#;
    assert!(serde_json::from_str::<CodeTable>(json).is_err());

    // duplicate code
    let json = r#"{"1":{"bits":1,"len":1},"2":{"bits":1,"len":1}}"#;
    assert!(serde_json::from_str::<CodeTable>(json).is_err());

    let json = r#"{"1":{"bits":0,"len":1},"2":{"bits":1,"len":1}}"#;
    let table: CodeTable = serde_json::from_str(json).unwrap();
    assert!(table.is_prefix_free());
    assert_eq!(table.len(), 2);
}
