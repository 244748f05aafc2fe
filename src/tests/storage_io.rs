// @file: src/tests/storage_io.rs
// @description: Symbol list reading and dataset CSV layout.
// @author: LAS.

#[cfg(test)]
mod storage_io_tests {
    use crate::core::error::StorageError;
    use crate::core::features::build_features;
    use crate::storage::dataset::write_dataset_to;
    use crate::storage::symbols::{read_symbols, read_symbols_from};
    use crate::tests::support::kline;
    use crate::utils::config::AppConfig;
    use std::path::Path;

    #[test]
    fn test_header_skipped_and_first_column_used() {
        let input = "symbol,base,quote\nBTCUSDT,BTC,USDT\nETHUSDT,ETH,USDT\nSOLUSDT\n";
        let symbols = read_symbols_from(input.as_bytes()).unwrap();
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    }

    #[test]
    fn test_header_only_file_is_empty_list() {
        assert!(read_symbols_from("symbol\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_blank_symbol_cell_is_an_error() {
        let input = "symbol,name\n,Nameless\n";
        assert!(matches!(
            read_symbols_from(input.as_bytes()),
            Err(StorageError::MissingSymbol { .. })
        ));
    }

    #[test]
    fn test_missing_symbols_file_is_io_error() {
        let result = read_symbols(Path::new("definitely/not/here/symbols.csv"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn test_dataset_csv_layout() {
        let klines = vec![
            kline("BTCUSDT", 0, "42000.10", "2", "1.5", 3),
            kline("BTCUSDT", 1, "42100.00", "0", "0", 1),
        ];
        let rows = build_features(&klines).unwrap();

        let mut buf: Vec<u8> = Vec::new();
        write_dataset_to(&mut buf, &rows, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "timestamp,close,volume,price,is_buyer,delta,cvd,imbalance,tape_speed,open_interest,funding_rate,volume_profile,success"
        );
        assert_eq!(lines[1], "2024-01-01 00:00:00,42000.10,2,42000.1,1,2,2,0.75,4,0,0,0,1");
        assert_eq!(lines[2], "2024-01-01 01:00:00,42100.00,0,42100,0,-0,2,0.5,4,0,0,0,");
    }

    #[test]
    fn test_undefined_values_are_empty_cells() {
        // One candle spans zero hours, so tape_speed is inf; there is no next close either
        let rows = build_features(&[kline("BTCUSDT", 0, "100", "4", "1", 9)]).unwrap();
        assert!(rows[0].tape_speed.is_infinite());

        let mut buf: Vec<u8> = Vec::new();
        write_dataset_to(&mut buf, &rows, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "2024-01-01 00:00:00,100,4,100,0,-4,-4,0.25,,0,0,0,");
    }

    #[test]
    fn test_default_paths_match_script_layout() {
        let config = AppConfig::default();
        assert_eq!(config.symbols_file, "symbols.csv");
        assert_eq!(config.output_file, "historical_data.csv");
        assert_eq!(config.start_date, "1 Jan, 2017");
        assert_eq!(config.end_date, None);
        assert!(!config.include_symbol_column);
        assert!(config.interval().is_ok());
    }
}
