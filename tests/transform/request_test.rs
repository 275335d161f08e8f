use prism::config::TransformSettings;
use prism::model::{QueryType, ResultType};
use prism::transform::{
    transform_json, transform_request, transform_requests, TransformError, TransformOptions,
    TransformRequest, TransformedData, Transformer,
};
use serde_json::{json, Value};

// Raw text rather than `json!`, which would sort the column keys.
const REQUEST: &str = r#"{
    "aliasToMemberNameMap": {
        "orders__created_at_day": "Orders.createdAt.day",
        "orders__amount": "Orders.amount",
        "orders__is_paid": "Orders.isPaid"
    },
    "annotation": {
        "Orders.createdAt.day": {"type": "time", "title": "Orders Created at"},
        "Orders.amount": {"type": "number", "format": "currency"},
        "Orders.isPaid": {"type": "boolean"}
    },
    "data": [
        {"orders__created_at_day": {"$date": "2021-02-01T00:00:00Z"}, "orders__amount": 12.5, "orders__is_paid": true},
        {"orders__created_at_day": "2021-02-02 00:00:00", "orders__amount": null, "orders__is_paid": false}
    ],
    "query": {
        "measures": ["Orders.amount"],
        "dimensions": ["Orders.isPaid"],
        "timeDimensions": [{
            "dimension": "Orders.createdAt",
            "granularity": "day",
            "dateRange": ["2021-02-01", "2021-02-02"]
        }]
    },
    "queryType": "QUERY_TYPE"RES_TYPE
}"#;

fn request(query_type: &str, res_type: Option<&str>) -> String {
    let res_type = res_type.map_or(String::new(), |t| format!(r#", "resType": "{}""#, t));
    REQUEST
        .replace("QUERY_TYPE", query_type)
        .replace("RES_TYPE", &res_type)
}

fn decode(json: &str) -> TransformRequest {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_decode_wire_names() {
    let req = decode(&request("compareDateRangeQuery", Some("compact")));
    assert_eq!(req.query_type, QueryType::CompareDateRange);
    assert_eq!(req.result_type, Some(ResultType::Compact));
    assert_eq!(req.data.len(), 2);
    assert_eq!(
        req.data[0].aliases().collect::<Vec<_>>(),
        vec!["orders__created_at_day", "orders__amount", "orders__is_paid"]
    );

    let req = decode(&request("blendingQuery", None));
    assert_eq!(req.query_type, QueryType::Blending);
    assert_eq!(req.result_type, None);
}

#[test]
fn test_vanilla_json() {
    let out = transform_json(&request("regularQuery", None)).unwrap();
    insta::assert_snapshot!(out, @r###"[{"Orders.createdAt.day":"2021-02-01T00:00:00.000","Orders.createdAt":"2021-02-01T00:00:00.000","Orders.amount":12.5,"Orders.isPaid":true},{"Orders.createdAt.day":"2021-02-02T00:00:00.000","Orders.createdAt":"2021-02-02T00:00:00.000","Orders.amount":null,"Orders.isPaid":false}]"###);
}

#[test]
fn test_compact_json() {
    let out = transform_json(&request("compareDateRangeQuery", Some("compact"))).unwrap();
    let out: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        out["members"],
        json!([
            "Orders.createdAt.day",
            "Orders.createdAt",
            "Orders.amount",
            "Orders.isPaid",
            "compareDateRange"
        ])
    );
    assert_eq!(
        out["dataset"][1],
        json!([
            "2021-02-02T00:00:00.000",
            "2021-02-02T00:00:00.000",
            null,
            false,
            "2021-02-01 - 2021-02-02"
        ])
    );
}

#[test]
fn test_batch() {
    let requests = vec![
        decode(&request("regularQuery", None)),
        decode(&request("blendingQuery", Some("compact"))),
    ];
    let out = transform_requests(&requests).unwrap();
    assert_eq!(out.len(), 2);
    assert!(matches!(out[0], TransformedData::Vanilla(_)));
    assert!(matches!(out[1], TransformedData::Compact { .. }));

    let batch = format!(
        "[{}, {}]",
        request("regularQuery", None),
        request("regularQuery", Some("compact"))
    );
    let out: Value = serde_json::from_str(&transform_json(&batch).unwrap()).unwrap();
    assert!(out[0].is_array());
    assert!(out[1]["members"].is_array());
}

#[test]
fn test_batch_fails_as_a_whole() {
    let hidden = request("regularQuery", None).replace(
        r#""Orders.isPaid": {"type": "boolean"}"#,
        r#""Orders.status": {"type": "string"}"#,
    );
    let requests = vec![decode(&request("regularQuery", None)), decode(&hidden)];

    let err = transform_requests(&requests).unwrap_err();
    assert!(matches!(
        err,
        TransformError::HiddenMember { ref alias, .. } if alias == "orders__is_paid"
    ));
}

#[test]
fn test_transformer_uses_configured_result_type() {
    let settings = TransformSettings {
        result_type: ResultType::Compact,
        debug_logging: false,
    };
    let transformer = Transformer::new(TransformOptions::from(&settings));

    let req = decode(&request("regularQuery", None));
    assert!(matches!(
        transformer.transform(&req).unwrap(),
        TransformedData::Compact { .. }
    ));
    assert!(matches!(
        transform_request(&req).unwrap(),
        TransformedData::Vanilla(_)
    ));

    // An explicit resType wins over the configured default.
    let req = decode(&request("regularQuery", Some("default")));
    assert!(matches!(
        transformer.transform(&req).unwrap(),
        TransformedData::Vanilla(_)
    ));
}

#[test]
fn test_malformed_requests() {
    assert!(matches!(
        transform_json("not json"),
        Err(TransformError::InvalidRequest(_))
    ));

    let bad_value = request("regularQuery", None).replace(
        r#""orders__amount": 12.5"#,
        r#""orders__amount": [1, 2]"#,
    );
    assert!(matches!(
        transform_json(&bad_value),
        Err(TransformError::InvalidRequest(_))
    ));
}

#[test]
fn test_relative_date_range_rejected() {
    let req = request("compareDateRangeQuery", None).replace(
        r#""dateRange": ["2021-02-01", "2021-02-02"]"#,
        r#""dateRange": "last week""#,
    );
    let err = transform_json(&req).unwrap_err();
    assert!(matches!(err, TransformError::UnboundedDateRange { .. }));
}
