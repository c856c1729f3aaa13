use flighttrace_core::reducer::{reduce, ReductionBounds};
use flighttrace_core::{FlightSample, PipelineError, Stage, TimeValue};

fn samples(n: usize) -> Vec<FlightSample> {
    (0..n)
        .map(|idx| FlightSample {
            time: TimeValue::Ordinal(idx),
            latitude: idx as f64,
            longitude: -(idx as f64),
            altitude: 100.0 + idx as f64,
            roll: None,
            pitch: None,
            heading: None,
        })
        .collect()
}

fn ordinals(reduced: &[FlightSample]) -> Vec<usize> {
    reduced
        .iter()
        .filter_map(|sample| sample.time.as_ordinal())
        .collect()
}

#[test]
fn two_hundred_fifty_rows_reduce_to_ten() {
    let bounds = ReductionBounds::default();
    assert_eq!(bounds.target_points(250), 10);
    assert_eq!(bounds.stride(250), 25);

    let reduction = reduce(&samples(250), bounds).expect("reduce");
    assert_eq!(reduction.samples.len(), 10);
    assert_eq!(reduction.stride, 25);
    assert!(!reduction.fell_back);
    assert_eq!(
        ordinals(&reduction.samples),
        vec![0, 25, 50, 75, 100, 125, 150, 175, 200, 225]
    );
}

#[test]
fn reduced_values_are_copied_verbatim() {
    let input = samples(1000);
    let reduction = reduce(&input, ReductionBounds::default()).expect("reduce");
    for sample in &reduction.samples {
        let idx = sample.time.as_ordinal().expect("ordinal");
        assert_eq!(sample, &input[idx]);
    }
}

#[test]
fn output_length_stays_within_bounds_from_twenty_rows() {
    let bounds = ReductionBounds::default();
    for n in (20..3000).chain((9_900..10_300).step_by(7)).chain([20_099, 20_199, 50_000]) {
        let reduction = reduce(&samples(n), bounds).expect("reduce");
        let len = reduction.samples.len();
        assert!((10..=100).contains(&len), "n={n} produced {len} points");
    }
}

#[test]
fn small_tables_use_stride_one() {
    for n in 2..20 {
        let reduction = reduce(&samples(n), ReductionBounds::default()).expect("reduce");
        assert_eq!(reduction.stride, 1);
        assert_eq!(reduction.samples.len(), n);
    }
}

#[test]
fn large_tables_are_capped_at_max_points() {
    let reduction = reduce(&samples(10_099), ReductionBounds::default()).expect("reduce");
    assert_eq!(reduction.target, 100);
    assert_eq!(reduction.stride, 100);
    assert_eq!(reduction.samples.len(), 100);
}

#[test]
fn decimation_to_one_point_falls_back_to_full_table() {
    let bounds = ReductionBounds {
        min_points: 1,
        max_points: 100,
        divisor: 100,
    };
    let reduction = reduce(&samples(5), bounds).expect("reduce");
    assert!(reduction.fell_back);
    assert_eq!(reduction.samples.len(), 5);
}

#[test]
fn fewer_than_two_rows_is_insufficient() {
    for n in [0, 1] {
        match reduce(&samples(n), ReductionBounds::default()) {
            Err(PipelineError::InsufficientData { stage, rows }) => {
                assert_eq!(stage, Stage::Reducer);
                assert_eq!(rows, n);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }
}
