use chrono::NaiveDate;
use flighttrace_core::frames::{build_frames, endpoint_markers, frame_indices, hover_text};
use flighttrace_core::{FlightSample, TimeValue};

fn sample(time: TimeValue) -> FlightSample {
    FlightSample {
        time,
        latitude: 37.618805,
        longitude: -122.375416,
        altitude: 4.5,
        roll: Some(1.234),
        pitch: None,
        heading: Some(90.0),
    }
}

fn track(n: usize) -> Vec<FlightSample> {
    (0..n).map(|idx| sample(TimeValue::Ordinal(idx))).collect()
}

#[test]
fn hover_text_has_fixed_layout() {
    let time = NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 36, 14))
        .expect("valid time");
    let text = hover_text(&sample(TimeValue::Timestamp(time)));
    assert_eq!(
        text,
        "Time: 1900-01-01 09:36:14<br>Roll: 1.23°<br>Pitch: N/A<br>Heading: 90.00°<br>\
         Longitude: -122.375416<br>Latitude: 37.618805<br>Altitude: 4.50 m"
    );
}

#[test]
fn hover_text_for_row_order_time_shows_the_index() {
    let text = hover_text(&sample(TimeValue::Ordinal(12)));
    assert!(text.starts_with("Time: 12<br>"));
}

#[test]
fn frame_indices_are_strictly_increasing_and_bounded() {
    for len in 2..400 {
        let indices = frame_indices(len, 50);
        assert_eq!(indices.len(), (len - 1).min(50), "len={len}");
        assert_eq!(indices.first(), Some(&1));
        assert_eq!(indices.last(), Some(&(len - 1)));
        assert!(indices.windows(2).all(|w| w[0] < w[1]), "len={len}");
    }
}

#[test]
fn frame_prefixes_grow_monotonically() {
    let samples = track(120);
    let frames = build_frames(samples.len(), 50);

    for pair in frames.windows(2) {
        let previous = pair[0].trajectory(&samples);
        let next = pair[1].trajectory(&samples);
        assert!(next.len() > previous.len());
        assert_eq!(&next[..previous.len()], previous);
    }

    let last = frames.last().expect("at least one frame");
    assert_eq!(last.trajectory(&samples).len(), samples.len());
    assert_eq!(last.current(&samples), samples.last());
}

#[test]
fn each_frame_marks_its_own_index_as_current() {
    let samples = track(5);
    for frame in build_frames(samples.len(), 50) {
        assert_eq!(frame.prefix_end_index, frame.current_index);
        assert_eq!(frame.frame_name, format!("frame{}", frame.current_index));
        assert_eq!(
            frame.trajectory(&samples).last(),
            frame.current(&samples)
        );
    }
}

#[test]
fn start_and_end_markers_use_first_and_last_points() {
    let samples = track(7);
    let (start, end) = endpoint_markers(&samples).expect("markers");
    assert_eq!(start.label, "Start");
    assert_eq!(start.sample_index, 0);
    assert_eq!(end.label, "End");
    assert_eq!(end.sample_index, 6);
    assert_eq!(end.hover, hover_text(&samples[6]));
    assert!(endpoint_markers(&[]).is_none());
}
