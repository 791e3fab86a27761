use numlabel::{
    ConfigError, NumberFormat, ScaleCut, cut_long_scale, cut_short_scale, cut_si, scale_cut,
};

fn strs(labels: Vec<Option<String>>) -> Vec<String> {
    labels
        .into_iter()
        .map(|l| l.unwrap_or_else(|| "NA".into()))
        .collect()
}

#[test]
fn bucket_matches_threshold_interval() {
    let breaks = cut_short_scale(false);
    let thresholds: Vec<f64> = breaks.thresholds().collect();
    let labels: Vec<&str> = breaks.labels().collect();
    let scale = 1.0;
    let x = [
        -0.5, 0.0, 1.0, 999.0, 1000.0, -1000.0, 54321.0, 999_999.0, 1e6, -3.2e7, 1e9, 7.7e11,
        1e12, 4e15,
    ];
    let plan = scale_cut(&x, &breaks, scale, None, "");
    for (i, &v) in x.iter().enumerate() {
        let a = (v * scale).abs();
        let bucket = thresholds
            .iter()
            .rposition(|&t| t <= a)
            .unwrap();
        assert_eq!(plan.bucket[i], bucket, "value {v}");
        assert_eq!(plan.suffix[i], labels[bucket], "value {v}");
        let expected_scale = if bucket == 0 || v == 0.0 {
            scale
        } else {
            scale / thresholds[bucket]
        };
        assert_eq!(plan.scale[i], expected_scale, "value {v}");
    }
}

#[test]
fn each_bucket_gets_its_own_accuracy() {
    let fmt = NumberFormat::builder()
        .scale_cut(cut_short_scale(false))
        .build()
        .unwrap();
    // K bucket needs one decimal, M bucket needs none
    assert_eq!(
        strs(fmt.format(&[1200.0, 1300.0, 2e6, 5e6])),
        ["1.2K", "1.3K", "2M", "5M"]
    );
}

#[test]
fn explicit_accuracy_applies_to_every_bucket() {
    let fmt = NumberFormat::builder()
        .scale_cut(cut_short_scale(false))
        .accuracy(0.01)
        .build()
        .unwrap();
    assert_eq!(strs(fmt.format(&[5.0, 1234.0])), ["5.00", "1.23K"]);
}

#[test]
fn long_scale_billion_is_ten_to_the_twelve() {
    let fmt = NumberFormat::builder()
        .scale_cut(cut_long_scale(false))
        .build()
        .unwrap();
    assert_eq!(strs(fmt.format(&[2e9, 3e12])), ["2 000M", "3B"]);
}

#[test]
fn si_units() {
    let fmt = NumberFormat::builder().scale_cut(cut_si("g")).build().unwrap();
    assert_eq!(
        strs(fmt.format(&[0.0005, 0.002, 1500.0, 2500.0])),
        ["500 \u{00b5}g", "2 mg", "1.5 kg", "2.5 kg"]
    );
    assert_eq!(strs(fmt.format(&[0.0, 5.0])), ["0 g", "5 g"]);
}

#[test]
fn scale_is_combined_with_bucket_divisor() {
    // values in thousands of dollars
    let fmt = NumberFormat::builder()
        .scale(1e3)
        .scale_cut(cut_short_scale(false))
        .build()
        .unwrap();
    assert_eq!(strs(fmt.format(&[1.5, 2.5, 3000.0])), ["1.5K", "2.5K", "3M"]);
}

#[test]
fn missing_and_infinite_values_do_not_pick_a_suffix() {
    let fmt = NumberFormat::builder()
        .scale_cut(cut_short_scale(false))
        .build()
        .unwrap();
    assert_eq!(
        fmt.format(&[f64::NAN, f64::NEG_INFINITY, 2e3]),
        [None, Some("-Inf".to_string()), Some("2K".to_string())]
    );
}

#[test]
fn custom_tables() {
    let bytes = ScaleCut::new([("B", 0.0), ("kB", 1e3), ("MB", 1e6)]).unwrap();
    let fmt = NumberFormat::builder()
        .scale_cut(bytes)
        .big_mark(",")
        .build()
        .unwrap();
    assert_eq!(strs(fmt.format(&[512.0, 2000.0, 4000.0])), ["512B", "2kB", "4kB"]);

    assert_eq!(
        ScaleCut::new([("K", 1e3)]),
        Err(ConfigError::ScaleCutMissingZero { smallest: 1e3 })
    );
}
