use lex_charts::performance::{plan_aggregation, plan_sampling};
use lex_charts::{
    BivariateChartSelector, ChartType, ColumnDataType, ColumnStatisticalProfile,
    CorrelationDirection, CorrelationProfile, CorrelationStrength, DatasetShape,
    DistributionAnalyzer, OutlierSeverity, RecommendationRanker, RelationshipType,
    ScaleRecommender, UnivariateChartSelector,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

const MIN_PROPTEST_CASES: u32 = 256;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|parsed| parsed.max(MIN_PROPTEST_CASES))
        .unwrap_or(MIN_PROPTEST_CASES)
}

fn chart_type() -> impl Strategy<Value = Option<ChartType>> {
    prop::option::of(prop::sample::select(vec![
        ChartType::Histogram,
        ChartType::DensityPlot,
        ChartType::BarChart,
        ChartType::ScatterPlot,
        ChartType::HexbinPlot,
        ChartType::LineChart,
        ChartType::Heatmap,
    ]))
}

fn data_type() -> impl Strategy<Value = ColumnDataType> {
    prop::sample::select(vec![
        ColumnDataType::NumericFloat,
        ColumnDataType::NumericInteger,
        ColumnDataType::Categorical,
        ColumnDataType::Boolean,
        ColumnDataType::Datetime,
        ColumnDataType::Text,
        ColumnDataType::Unknown("geo-point".to_string()),
    ])
}

/// Structurally valid profiles with any mix of optional statistics.
fn column_profile() -> impl Strategy<Value = ColumnStatisticalProfile> {
    (0u64..2_000_000, data_type())
        .prop_flat_map(|(total, data_type)| {
            (
                Just(total),
                Just(data_type),
                0..=total,
                prop::option::of((-5.0f64..5.0, -3.0f64..12.0, 0..=total)),
                prop::option::of((-1_000.0f64..1_000.0, 0.0f64..1_000_000.0)),
                prop::option::of(prop::collection::vec(0u64..10_000, 1..30)),
            )
        })
        .prop_map(|(total, data_type, unique, stats, range, counts)| {
            let mut profile = ColumnStatisticalProfile::new("col", data_type, total, unique);
            if let Some((skewness, kurtosis, outliers)) = stats {
                profile = profile.with_statistics(skewness, kurtosis, outliers);
            }
            if let Some((min, width)) = range {
                profile = profile.with_range(min, min + width);
            }
            if let Some(counts) = counts {
                profile = profile.with_frequencies(
                    counts
                        .into_iter()
                        .enumerate()
                        .map(|(i, count)| (format!("c{i}"), count)),
                );
            }
            profile
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        .. ProptestConfig::default()
    })]

    #[test]
    fn univariate_confidence_stays_in_unit_interval(profile in column_profile()) {
        let outcome = UnivariateChartSelector::default()
            .select(&profile)
            .expect("generated profiles are valid");
        let rec = &outcome.recommendation;

        prop_assert!((0.0..=1.0).contains(&rec.confidence.value()));
        for alternative in &rec.alternatives {
            prop_assert!((0.0..=1.0).contains(&alternative.confidence.value()));
        }
        if !outcome.warnings.is_empty() {
            prop_assert!(rec.is_fallback());
        }
    }

    #[test]
    fn ranks_are_consecutive_and_descending(
        profile in column_profile(),
        max_alternatives in 1usize..6,
        rows in 1u64..5_000_000,
    ) {
        let outcome = UnivariateChartSelector::default()
            .select(&profile)
            .expect("generated profiles are valid");
        let ranker = RecommendationRanker::new(max_alternatives, Default::default());
        let ranked = ranker.rank(&outcome.recommendation, DatasetShape::new(rows, 1));

        let ranks: Vec<usize> = ranked.entries.iter().map(|e| e.rank).collect();
        let expected: Vec<usize> = (1..=ranked.entries.len()).collect();
        prop_assert_eq!(ranks, expected);
        prop_assert!(ranked.entries.len() <= max_alternatives + 1);
        prop_assert_eq!(ranked.entries.iter().filter(|e| e.is_primary).count(), 1);
        for pair in ranked.entries.windows(2) {
            prop_assert!(pair[0].confidence.value() >= pair[1].confidence.value());
        }
    }

    #[test]
    fn bivariate_confidence_stays_in_unit_interval(
        points in 0u64..5_000_000,
        strength in prop::sample::select(vec![
            CorrelationStrength::Weak,
            CorrelationStrength::Moderate,
            CorrelationStrength::Strong,
            CorrelationStrength::VeryStrong,
        ]),
        linear in any::<bool>(),
        x_type in data_type(),
        y_type in data_type(),
    ) {
        let x = ColumnStatisticalProfile::new("x", x_type, points, points.min(10));
        let y = ColumnStatisticalProfile::new("y", y_type, points, points.min(10));
        let correlation = CorrelationProfile {
            variable1: "x".to_string(),
            variable2: "y".to_string(),
            strength,
            direction: CorrelationDirection::Positive,
            significance: 0.01,
            relationship_type: if linear {
                RelationshipType::Linear
            } else {
                RelationshipType::NonLinear
            },
            sample_size1: points,
            sample_size2: points,
        };

        let rec = BivariateChartSelector::default()
            .select(&x, &y, &correlation)
            .expect("generated pairs are valid")
            .recommendation;
        prop_assert!((0.0..=1.0).contains(&rec.confidence.value()));
        prop_assert_eq!(rec.columns.len(), 2);
    }

    #[test]
    fn sample_never_exceeds_row_count(rows in 0u64..50_000_000, chart in chart_type()) {
        let sampling = plan_sampling(rows, chart);
        prop_assert!(sampling.sample_size <= rows);
        prop_assert_eq!(sampling.sampling_required, rows > 1_000);
    }

    #[test]
    fn data_reduction_grows_with_points(
        points in 0u64..100_000_000,
        extra in 0u64..100_000_000,
        target in 1u64..100_000,
        chart in chart_type(),
    ) {
        let smaller = plan_aggregation(points, chart, target);
        let larger = plan_aggregation(points + extra, chart, target);

        prop_assert!(smaller.data_reduction <= larger.data_reduction);
        prop_assert!((0.0..=95.0).contains(&larger.data_reduction));
        prop_assert!(larger.reduction_factor >= 1.0);
    }

    #[test]
    fn outlier_severity_grows_with_outlier_count(
        total in 1u64..1_000_000,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let severity = |share: f64| {
            let outliers = (total as f64 * share).floor() as u64;
            let profile =
                ColumnStatisticalProfile::new("v", ColumnDataType::NumericFloat, total, total)
                    .with_statistics(0.0, 0.0, outliers);
            DistributionAnalyzer::analyze(&profile).outlier_severity
        };

        prop_assert!(severity(low) <= severity(high));
        prop_assert!(severity(0.0) == OutlierSeverity::None);
    }

    #[test]
    fn scale_domain_is_ordered(
        a in -1.0e9f64..1.0e9,
        b in -1.0e9f64..1.0e9,
        log_hint in any::<bool>(),
    ) {
        let hint = log_hint.then_some(lex_charts::Transformation::Log);
        let scale = ScaleRecommender::recommend(a, b, hint);
        prop_assert!(scale.domain[0] <= scale.domain[1]);
        prop_assert_eq!(scale.domain[0], a.min(b));
        prop_assert_eq!(scale.domain[1], a.max(b));
    }
}
