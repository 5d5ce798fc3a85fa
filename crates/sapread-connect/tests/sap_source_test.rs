//! SAP Source Integration Tests
//!
//! Discovery and read run against the in-memory session; the connectivity
//! check runs against a real DuckDB engine that cannot reach the extension
//! repository.

use futures::StreamExt;
use sapread_connect::connectors::sap::{discover_catalog, read_streams};
use sapread_connect::testing::{field, MockSession};
use sapread_connect::{
    CheckStatus, ConfiguredCatalog, ConnectorError, Message, MessageWriter, Record,
    SapReadTableConfig, SapReadTableSource, Source, SyncMode,
};
use serde_json::json;

fn sap_system() -> MockSession {
    MockSession::new()
        .with_table(
            "T2",
            "Second table",
            vec![
                field("MANDT", "Client", "CLNT", "3", "0"),
                field("AMOUNT", "Amount", "CURR", "13", "2"),
            ],
        )
        .with_rows(
            "T2",
            vec![
                vec![json!("100"), json!("10.50")],
                vec![json!("100"), json!("99.99")],
            ],
        )
        .with_table(
            "T1",
            "First table",
            vec![
                field("MANDT", "Client", "CLNT", "3", "0"),
                field("COUNTER", "Counter", "INT4", "10", "0"),
                field("NAME", "Name", "CHAR", "12", "0"),
            ],
        )
        .with_rows(
            "T1",
            vec![
                vec![json!("100"), json!(1), json!("alpha")],
                vec![json!("100"), json!(2), json!("beta")],
                vec![json!("100"), json!(3), json!("gamma")],
            ],
        )
        .with_table("MARA", "General Material Data", vec![])
}

fn unreachable_config(host: &str) -> SapReadTableConfig {
    serde_json::from_value(json!({
        "custom_extension_repository": "/nonexistent/erpl/repository",
        "extension_name": "erpl",
        "sap_ashost": host,
        "sap_sysnr": "00",
        "sap_user": "DEVELOPER",
        "sap_password": "init1234",
        "sap_client": "001",
        "sap_lang": "EN",
        "table_selection": "T*"
    }))
    .unwrap()
}

#[cfg(test)]
mod discovery_tests {
    use super::*;

    #[test]
    fn test_selection_yields_sorted_streams() {
        let catalog = discover_catalog(&sap_system(), "T*").unwrap();

        assert_eq!(catalog.stream_names().collect::<Vec<_>>(), ["T1", "T2"]);
        for stream in &catalog.streams {
            assert!(!stream.property_names().is_empty());
            assert_eq!(stream.supported_sync_modes, vec![SyncMode::FullRefresh]);
        }
    }

    #[test]
    fn test_schema_properties_follow_field_order() {
        let catalog = discover_catalog(&sap_system(), "T1").unwrap();
        let t1 = catalog.find_stream("T1").unwrap();

        assert_eq!(t1.property_names(), ["MANDT", "COUNTER", "NAME"]);
        assert_eq!(
            t1.json_schema["properties"]["NAME"],
            json!({"type": "string", "length": 12, "decimals": 0, "description": "Name"})
        );
        assert_eq!(t1.json_schema["properties"]["COUNTER"]["type"], "integer");
    }

    #[test]
    fn test_empty_selection_result() {
        let catalog = discover_catalog(&sap_system(), "ZZ*").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_unsupported_field_type_aborts() {
        let session =
            sap_system().with_table("T9", "Broken", vec![field("X", "", "BOGUS", "1", "0")]);
        match discover_catalog(&session, "T*") {
            Err(ConnectorError::UnsupportedType(tag)) => assert_eq!(tag, "BOGUS"),
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_message_roundtrips_into_configured_catalog() {
        let catalog = discover_catalog(&sap_system(), "T*").unwrap();

        let mut writer = MessageWriter::new(Vec::new());
        writer
            .write(&Message::Catalog {
                catalog: catalog.clone(),
            })
            .unwrap();
        let line: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        let configured: ConfiguredCatalog = serde_json::from_value(json!({
            "streams": [{"stream": line["catalog"]["streams"][1].clone()}]
        }))
        .unwrap();
        assert_eq!(configured.streams[0].stream, catalog.streams[1]);
    }
}

#[cfg(test)]
mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_discover_then_read_everything() {
        let session = sap_system();
        let catalog = discover_catalog(&session, "T*").unwrap();
        let configured = ConfiguredCatalog::from_catalog(&catalog);

        let records: Vec<Record> = read_streams(session, configured)
            .map(|r| r.unwrap())
            .collect()
            .await;

        assert_eq!(records.len(), 5);
        assert!(records[..3].iter().all(|r| r.stream == "T1"));
        assert!(records[3..].iter().all(|r| r.stream == "T2"));

        let t1 = catalog.find_stream("T1").unwrap();
        for record in &records[..3] {
            assert_eq!(record.field_names().collect::<Vec<_>>(), t1.property_names());
        }
        assert_eq!(records[1].data["NAME"], json!("beta"));
        assert_eq!(records[4].data["AMOUNT"], json!("99.99"));
    }

    #[tokio::test]
    async fn test_failure_after_two_rows() {
        let session = sap_system().fail_after("T1", 2);
        let catalog = discover_catalog(&session, "T1").unwrap();

        let results: Vec<_> = read_streams(session, ConfiguredCatalog::from_catalog(&catalog))
            .collect()
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().data["COUNTER"], json!(1));
        assert_eq!(results[1].as_ref().unwrap().data["COUNTER"], json!(2));
        match &results[2] {
            Err(ConnectorError::Read { stream, .. }) => assert_eq!(stream, "T1"),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_table_without_rows() {
        let session = sap_system();
        let catalog = discover_catalog(&session, "MARA").unwrap();
        let mut records = read_streams(session, ConfiguredCatalog::from_catalog(&catalog));
        assert!(records.next().await.is_none());
    }
}

#[cfg(test)]
mod check_tests {
    use super::*;

    #[tokio::test]
    async fn test_check_unreachable_repository_reports_failure() {
        let result = SapReadTableSource::new()
            .check(&unreachable_config("bad-host"))
            .await;

        assert_eq!(result.status, CheckStatus::Failed);
        assert!(result.message.starts_with("ERPL connection test failed: "));
        assert!(result.message.len() > "ERPL connection test failed: ".len());
    }

    #[tokio::test]
    async fn test_check_is_idempotent() {
        let source = SapReadTableSource::new();
        let config = unreachable_config("bad-host");

        let first = source.check(&config).await;
        let second = source.check(&config).await;
        assert_eq!(first.status, second.status);
    }

    #[test]
    fn test_spec_protocol_payload() {
        let spec = SapReadTableSource::spec().to_protocol();
        let props = &spec["connectionSpecification"]["properties"];

        assert_eq!(spec["supportsIncremental"], false);
        assert_eq!(props["sap_password"]["format"], "password");
        assert!(props.get("custom_extension_repository").is_some());
    }
}
