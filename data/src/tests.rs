#[cfg(test)]
mod tests {
    use crate::{DataError, EnsembleData, EnsembleSource, Observation, SeriesData};

    fn sample_ensemble() -> EnsembleData {
        let mut data = EnsembleData::new();
        data.push_series(SeriesData::new(
            "real-0",
            vec![0.0, 1.0, 2.0],
            vec![10.0, 12.0, 11.0],
        ))
        .unwrap();
        data.push_series(SeriesData::new(
            "real-1",
            vec![0.0, 1.0, 2.0],
            vec![9.0, 13.0, 10.5],
        ))
        .unwrap();
        data.push_observation(Observation::new("obs-0", 1.0, 12.5, 0.5));
        data.set_refcase(SeriesData::new(
            "refcase",
            vec![0.0, 1.0, 2.0],
            vec![10.0, 12.5, 10.8],
        ))
        .unwrap();
        data
    }

    #[test]
    fn series_sample_count_truncates_to_shorter_axis() {
        let series = SeriesData::new("s", vec![0.0, 1.0, 2.0], vec![5.0, 6.0]);
        assert_eq!(series.sample_count(), 2);
        assert_eq!(series.point(1), Some([1.0, 6.0]));
        assert_eq!(series.point(2), None);
    }

    #[test]
    fn empty_series_is_empty() {
        let series = SeriesData::new("s", vec![], vec![1.0]);
        assert!(series.is_empty());
    }

    #[test]
    fn push_series_rejects_duplicates() {
        let mut data = sample_ensemble();
        let err = data
            .push_series(SeriesData::new("real-0", vec![], vec![]))
            .unwrap_err();
        assert!(matches!(err, DataError::DuplicateSeries(name) if name == "real-0"));
    }

    #[test]
    fn push_series_rejects_empty_name() {
        let mut data = EnsembleData::new();
        let err = data
            .push_series(SeriesData::new("", vec![0.0], vec![0.0]))
            .unwrap_err();
        assert!(matches!(err, DataError::EmptyName));
    }

    #[test]
    fn names_keep_display_order() {
        let data = sample_ensemble();
        assert_eq!(data.series_names(), vec!["real-0", "real-1"]);
    }

    #[test]
    fn samples_by_name() {
        let data = sample_ensemble();
        let (xs, ys) = data.samples("real-1").unwrap();
        assert_eq!(xs, &[0.0, 1.0, 2.0]);
        assert_eq!(ys, &[9.0, 13.0, 10.5]);
        assert!(data.samples("missing").is_none());
    }

    #[test]
    fn has_series_data_ignores_empty_series() {
        let mut data = EnsembleData::new();
        assert!(!data.has_series_data());
        data.push_series(SeriesData::new("empty", vec![], vec![]))
            .unwrap();
        assert!(!data.has_series_data());
        data.push_series(SeriesData::new("one", vec![0.0], vec![1.0]))
            .unwrap();
        assert!(data.has_series_data());
    }

    #[test]
    fn extent_covers_observation_error_bounds() {
        let data = sample_ensemble();
        let ([x_min, x_max], [y_min, y_max]) = data.extent().unwrap();
        assert_eq!(x_min, 0.0);
        assert_eq!(x_max, 2.0);
        assert_eq!(y_min, 9.0);
        // obs-0 reaches 12.5 + 0.5 = 13.0, same as real-1's peak
        assert_eq!(y_max, 13.0);
    }

    #[test]
    fn extent_of_empty_ensemble_is_none() {
        assert!(EnsembleData::new().extent().is_none());
    }

    #[test]
    fn extent_skips_non_finite_samples() {
        let mut data = EnsembleData::new();
        data.push_series(SeriesData::new(
            "s",
            vec![0.0, f64::NAN, 2.0],
            vec![1.0, f64::INFINITY, 3.0],
        ))
        .unwrap();
        let ([x_min, x_max], [y_min, y_max]) = data.extent().unwrap();
        assert_eq!((x_min, x_max), (0.0, 2.0));
        assert_eq!((y_min, y_max), (1.0, 3.0));
    }

    #[test]
    fn json_round_trip_restores_lookup_index() {
        let data = sample_ensemble();
        let json = data.to_json_string().unwrap();
        let restored = EnsembleData::from_json_str(&json).unwrap();
        assert_eq!(restored.series_names(), data.series_names());
        assert!(restored.find_series("real-1").is_some());
        assert_eq!(restored.observations().len(), 1);
        assert_eq!(restored.refcase().unwrap().name, "refcase");
    }
}
