#[cfg(test)]
mod tests {
    use crate::core::table::{GameReportRow, GameReportTable};
    use crate::error::ReportError;
    use crate::services::aggregate_table::{build_aggregate_table, placement_samples};

    fn periods(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn row(
        sponsor: &str,
        placement: &str,
        shots: u64,
        duration: &str,
        screen: &str,
        period_cells: &[&str],
    ) -> GameReportRow {
        GameReportRow {
            sponsor: sponsor.to_string(),
            placement: placement.to_string(),
            total_shots: shots,
            total_duration: duration.to_string(),
            avg_screen: screen.to_string(),
            period_durations: period_cells.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn game(id: &str, period_labels: &[&str], rows: Vec<GameReportRow>) -> GameReportTable {
        GameReportTable {
            game_id: id.to_string(),
            periods: periods(period_labels),
            rows,
        }
    }

    #[test]
    fn test_screen_average_is_mean_of_means() {
        let a = game(
            "A",
            &["1 Top"],
            vec![row("Nike", "LeftBoard", 100, "00:01:40", "50.00%", &["00:01:40"])],
        );
        let b = game(
            "B",
            &["1 Top"],
            vec![row("Nike", "LeftBoard", 2, "00:00:02", "70.00%", &["00:00:02"])],
        );

        let aggregate = build_aggregate_table(&[a, b], &periods(&["1 Top"])).unwrap();
        let line = aggregate.row("LeftBoard").unwrap();
        assert_eq!(line.avg_screen, "60.00%");
        assert_eq!(line.avg_shots, 51);
        assert_eq!(line.avg_total_duration, "00:00:51");
    }

    #[test]
    fn test_sponsors_sharing_a_placement_are_combined_within_game() {
        let a = game(
            "A",
            &["Q1"],
            vec![
                row("Nike", "LeftBoard", 3, "00:00:10", "10.00%", &["00:00:10"]),
                row("Adidas", "LeftBoard", 2, "00:00:20", "30.00%", &["00:00:20"]),
            ],
        );

        let samples = placement_samples(&a, &periods(&["Q1"])).unwrap();
        let left = &samples["LeftBoard"];
        assert_eq!(left.shots, 5);
        assert_eq!(left.duration_ms, 30_000);
        assert_eq!(left.avg_screen, 20.0);
        assert_eq!(left.period_ms, vec![30_000]);
    }

    #[test]
    fn test_period_mean_skips_inactive_games() {
        let a = game(
            "A",
            &["Q1", "Q2"],
            vec![row("Nike", "Board", 1, "00:00:10", "5.00%", &["00:00:10", ""])],
        );
        let b = game(
            "B",
            &["Q1", "Q2"],
            vec![row("Nike", "Board", 1, "00:00:30", "5.00%", &["00:00:20", "00:00:10"])],
        );
        let c = game(
            "C",
            &["Q1", "Q2"],
            vec![row("Nike", "Board", 1, "00:00:40", "5.00%", &["00:00:40", ""])],
        );

        let aggregate =
            build_aggregate_table(&[a, b, c], &periods(&["Q1", "Q2"])).unwrap();
        let line = aggregate.row("Board").unwrap();
        // Q1: (10 + 20 + 40) / 3 ≈ 23.3s → 24s
        assert_eq!(line.avg_period_durations[0], "00:00:24");
        // Q2: only game B had activity
        assert_eq!(line.avg_period_durations[1], "00:00:10");
    }

    #[test]
    fn test_period_without_any_activity_is_zero_placeholder() {
        let a = game(
            "A",
            &["Q1", "Q2"],
            vec![row("Nike", "Board", 1, "00:00:10", "5.00%", &["00:00:10", ""])],
        );

        let aggregate = build_aggregate_table(&[a], &periods(&["Q1", "Q2"])).unwrap();
        let line = aggregate.row("Board").unwrap();
        assert_eq!(line.avg_period_durations[1], "00:00:00");
        assert_eq!(aggregate.headers()[5], "Avg Q2");
    }

    #[test]
    fn test_missing_period_column_counts_as_empty() {
        let a = game(
            "A",
            &["Q1"],
            vec![row("Nike", "Board", 1, "00:00:10", "5.00%", &["00:00:10"])],
        );
        let b = game(
            "B",
            &["OT"],
            vec![row("Nike", "Board", 1, "00:00:06", "5.00%", &["00:00:06"])],
        );

        let aggregate = build_aggregate_table(&[a, b], &periods(&["Q1", "OT"])).unwrap();
        let line = aggregate.row("Board").unwrap();
        assert_eq!(line.avg_period_durations, vec!["00:00:10", "00:00:06"]);
    }

    #[test]
    fn test_placement_order_is_first_appearance() {
        let a = game(
            "A",
            &[],
            vec![
                row("Nike", "Zone B", 1, "00:00:01", "1.00%", &[]),
                row("Nike", "Zone A", 1, "00:00:01", "1.00%", &[]),
            ],
        );
        let b = game(
            "B",
            &[],
            vec![row("Nike", "Alpha", 1, "00:00:01", "1.00%", &[])],
        );

        let aggregate = build_aggregate_table(&[a, b], &[]).unwrap();
        let names: Vec<&str> = aggregate.rows.iter().map(|r| r.placement.as_str()).collect();
        assert_eq!(names, vec!["Zone A", "Zone B", "Alpha"]);
    }

    #[test]
    fn test_placement_missing_from_a_game_averages_over_present_games() {
        let a = game(
            "A",
            &[],
            vec![row("Nike", "Board", 4, "00:00:04", "10.00%", &[])],
        );
        let b = game("B", &[], vec![]);

        let aggregate = build_aggregate_table(&[a, b], &[]).unwrap();
        assert_eq!(aggregate.row("Board").unwrap().avg_shots, 4);
    }

    #[test]
    fn test_unparseable_cell_is_malformed_table() {
        let a = game(
            "A",
            &[],
            vec![row("Nike", "Board", 1, "ten seconds", "5.00%", &[])],
        );
        let err = build_aggregate_table(&[a], &[]).unwrap_err();
        assert!(matches!(err, ReportError::MalformedTable(_)));

        let b = game("B", &[], vec![row("Nike", "Board", 1, "", "lots", &[])]);
        assert!(build_aggregate_table(&[b], &[]).is_err());
    }

    #[test]
    fn test_no_tables_yields_empty_aggregate() {
        let aggregate = build_aggregate_table(&[], &periods(&["Q1"])).unwrap();
        assert!(aggregate.rows.is_empty());
        assert_eq!(aggregate.periods, vec!["Q1"]);
    }
}
