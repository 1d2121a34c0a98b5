use itinerary_timeline::TimelineError;
use itinerary_timeline::api::{
    DEFAULT_ZOOM_PREFERENCE_KEY, MemoryPreferenceStore, PreferenceStore, ZoomPreference,
    load_zoom_preference, store_zoom_preference,
};

#[test]
fn preference_serializes_as_number_or_fit() {
    assert_eq!(
        ZoomPreference::DayWidth(90.0).to_json().expect("serialize"),
        "90.0"
    );
    assert_eq!(ZoomPreference::Fit.to_json().expect("serialize"), "\"fit\"");
}

#[test]
fn preference_parses_numbers_and_fit() {
    assert_eq!(
        ZoomPreference::from_json_str("120").expect("number"),
        ZoomPreference::DayWidth(120.0)
    );
    assert_eq!(
        ZoomPreference::from_json_str("\"fit\"").expect("fit"),
        ZoomPreference::Fit
    );
}

#[test]
fn invalid_preferences_are_rejected() {
    for input in ["\"zoomed\"", "0", "-30", "null", "{\"fit\":true}", "not json"] {
        let err = ZoomPreference::from_json_str(input).expect_err("invalid preference");
        assert!(matches!(err, TimelineError::Preference(_)), "{input}: {err}");
    }
}

#[test]
fn memory_store_round_trips_through_helpers() {
    let mut store = MemoryPreferenceStore::new();
    assert!(store.is_empty());
    assert_eq!(load_zoom_preference(&store, DEFAULT_ZOOM_PREFERENCE_KEY), None);

    store_zoom_preference(&mut store, DEFAULT_ZOOM_PREFERENCE_KEY, ZoomPreference::Fit)
        .expect("store fit");
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get(DEFAULT_ZOOM_PREFERENCE_KEY).as_deref(),
        Some("\"fit\"")
    );
    assert_eq!(
        load_zoom_preference(&store, DEFAULT_ZOOM_PREFERENCE_KEY),
        Some(ZoomPreference::Fit)
    );

    store_zoom_preference(
        &mut store,
        DEFAULT_ZOOM_PREFERENCE_KEY,
        ZoomPreference::DayWidth(40.0),
    )
    .expect("store width");
    assert_eq!(store.len(), 1);
    assert_eq!(
        load_zoom_preference(&store, DEFAULT_ZOOM_PREFERENCE_KEY),
        Some(ZoomPreference::DayWidth(40.0))
    );
}

#[test]
fn corrupt_stored_value_reads_as_absent() {
    let mut store = MemoryPreferenceStore::new();
    store.set(DEFAULT_ZOOM_PREFERENCE_KEY, "\"wide\"".to_owned());
    assert_eq!(load_zoom_preference(&store, DEFAULT_ZOOM_PREFERENCE_KEY), None);
}
