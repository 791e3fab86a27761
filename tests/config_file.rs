use numlabel::config;
use numlabel::{ConfigError, NegativeStyle, PositiveStyle, ScaleCut};
use std::fs;
use tempfile::tempdir;

#[test]
fn load_full_configuration_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.json");
    fs::write(
        &path,
        r#"{
            "accuracy": 0.1,
            "prefix": "$",
            "suffix": " total",
            "big_mark": ",",
            "style_positive": "plus",
            "style_negative": "parens",
            "scale_cut": [["", 0], ["K", 1000], ["M", 1000000]],
            "trim": true
        }"#,
    )
    .unwrap();

    let fmt = config::from_path(&path).unwrap();
    assert_eq!(fmt.style_positive(), PositiveStyle::Plus);
    assert_eq!(fmt.style_negative(), NegativeStyle::Parens);
    assert_eq!(fmt.big_mark(), ",");
    assert_eq!(fmt.scale_cut().unwrap().labels().count(), 3);

    let out = fmt.format(&[-1500.0, 2_500_000.0, 0.0]);
    assert_eq!(
        out,
        [
            Some("($1.5K total)".to_string()),
            Some("+$2.5M total".to_string()),
            Some("$0.0 total".to_string()),
        ]
    );
}

#[test]
fn named_tables_in_documents() {
    let fmt = config::from_json_str(r#"{"scale_cut": "si:m"}"#).unwrap();
    assert_eq!(fmt.scale_cut(), Some(&ScaleCut::si("m")));

    let fmt = config::from_json_str(r#"{"scale_cut": "short_space"}"#).unwrap();
    assert_eq!(
        fmt.format(&[2e3, 3e3]),
        [Some("2 K".to_string()), Some("3 K".to_string())]
    );
}

#[test]
fn invalid_documents_report_config_errors() {
    let cases = [
        (r#"{"style_positive": "loud"}"#, "InvalidStyle"),
        (r#"{"scale_cut": [0, 1000]}"#, "UnlabeledScaleCut"),
        (r#"{"scale_cut": {"K": 1000}}"#, "ScaleCutMissingZero"),
        (r#"{"scale_cut": {"": 0, "K": "lots"}}"#, "NonNumericThreshold"),
        (r#"{"scale_cut": {"": 0, "K": null}}"#, "MissingThreshold"),
        (r#"{"scale_cut": {}}"#, "EmptyScaleCut"),
        (r#"{"accuracy": -1}"#, "InvalidAccuracy"),
        (r#"{"scale": 0}"#, "InvalidScale"),
        (r#"{"locale": "zz_unknown"}"#, "UnknownLocale"),
        (r#"{"scale_cut": "gigantic"}"#, "UnknownScaleCut"),
    ];
    for (doc, expected) in cases {
        let err = config::from_json_str(doc).unwrap_err();
        let cfg = err
            .downcast_ref::<ConfigError>()
            .unwrap_or_else(|| panic!("{doc}: not a ConfigError: {err:#}"));
        assert!(format!("{cfg:?}").starts_with(expected), "{doc}: {cfg:?}");
    }
}

#[test]
fn malformed_json_is_not_a_config_error() {
    let err = config::from_json_str("{ not json").unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_none());
}

#[test]
fn missing_file_mentions_path() {
    let err = config::from_path("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("here.json"));
}
