use std::path::PathBuf;

use campuslens::api::Profile;
use campuslens::engine::marginal::{MarginalTable, Strategy};
use campuslens::engine::session::{Effect, LoadStatus, Msg, RefreshOutcome, SessionState};
use campuslens::{DashboardConfig, DashboardError};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_profile() -> Profile {
    let raw = std::fs::read_to_string(fixture_path("school_profile.json"))
        .expect("Failed to read fixture file");
    serde_json::from_str(&raw).expect("Failed to parse fixture")
}

/// Select an entity and feed the fixture back as its fetch result.
fn session_with_fixture() -> SessionState {
    let mut session = SessionState::new(&DashboardConfig::default());
    let effect = session
        .update(Msg::SelectEntity("Florida Polytechnic University".to_string()))
        .expect("Selecting an entity cannot fail");
    let Effect::Fetch(req) = effect else {
        panic!("Selecting an entity should issue a fetch, got {:?}", effect);
    };
    session
        .update(Msg::ProfileLoaded {
            request: req.id,
            result: Ok(fixture_profile()),
        })
        .expect("Fixture should apply cleanly");
    session
}

#[test]
fn test_fixture_drives_every_view_from_one_snapshot() {
    let session = session_with_fixture();
    assert_eq!(session.status(), &LoadStatus::Ready);

    let summary = session.summary();
    assert_eq!(summary.baseline_text(), "62.50%");
    assert_eq!(summary.added_text(), "+0.00%");

    let cards = session.cards();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].feature, "facilities");
    assert_eq!(cards[0].bar_width, 100.0);
    assert_eq!(cards[2].gain_text, "-1.10%");
    assert_eq!(cards[2].current_badge, "80%");

    // Default step of 5 drops the delta=1 point
    let trend = session.trend();
    let labels: Vec<&str> = trend.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["5%", "10%", "15%", "20%", "25%", "30%"]);
    let legend: Vec<&str> = trend.legend.iter().map(|e| e.feature.as_str()).collect();
    assert_eq!(legend, vec!["food", "facilities", "clubs"]);

    let MarginalTable::Rows(lines) = session.marginal_table() else {
        panic!("Fixture has marginal rows");
    };
    let strategies: Vec<Strategy> = lines.iter().map(|l| l.strategy).collect();
    assert_eq!(
        strategies,
        vec![Strategy::Strategic, Strategy::QuickWin, Strategy::LongTerm]
    );
    assert_eq!(lines[0].jump, "+0.284%");
}

#[test]
fn test_step_change_reuses_held_sweep() {
    let mut session = session_with_fixture();
    let effect = session.update(Msg::SetStep(10)).unwrap();
    assert_eq!(effect, Effect::None, "Changing step must not refetch");
    let deltas: Vec<f64> = session.filtered_sweep().iter().map(|p| p.delta).collect();
    assert_eq!(deltas, vec![10.0, 20.0, 30.0]);

    session.update(Msg::SetStep(1)).unwrap();
    assert_eq!(session.filtered_sweep(), session.profile().sweep);
}

#[test]
fn test_selection_scores_against_fixture() {
    let mut session = session_with_fixture();
    session.update(Msg::ToggleFeature("facilities".into())).unwrap();
    session.update(Msg::ToggleFeature("food".into())).unwrap();
    session.update(Msg::ToggleFeature("parking".into())).unwrap();

    let summary = session.summary();
    assert!((summary.total - 66.6).abs() < 1e-9, "got {}", summary.total);
    assert_eq!(summary.added_text(), "+4.10%");
    assert_eq!(summary.active_count, 2);
}

#[test]
fn test_delta_edits_then_overlapping_fetches() {
    let mut session = session_with_fixture();
    session.update(Msg::ToggleFeature("food".into())).unwrap();

    for (t, v) in [(0.0, 30.0), (100.0, 35.0), (200.0, 40.0)] {
        session
            .update(Msg::EditDelta { value: v, now_ms: t })
            .unwrap();
    }
    assert_eq!(session.poll_debounce(699.0), None);
    let first = session.poll_debounce(700.0).expect("Refresh due at 700ms");
    assert!((first.delta - 0.4).abs() < 1e-12);

    // A second burst issues a newer fetch before the first one answers
    session
        .update(Msg::EditDelta { value: 45.0, now_ms: 800.0 })
        .unwrap();
    let second = session.poll_debounce(1300.0).expect("Refresh due at 1300ms");

    let mut newer = fixture_profile();
    newer.baseline_score = 64.0;
    assert_eq!(
        session.apply_profile(second.id, Ok(newer)),
        Ok(RefreshOutcome::Applied)
    );
    assert_eq!(
        session.apply_profile(first.id, Ok(fixture_profile())),
        Ok(RefreshOutcome::Stale)
    );
    assert_eq!(session.profile().baseline_score, 64.0);
    assert!(
        session.selection().contains("food"),
        "Delta refresh keeps the selection"
    );
}

#[test]
fn test_transport_failure_is_reported_and_old_data_stays() {
    let mut session = session_with_fixture();
    let req = session.begin_refresh().expect("Entity is loaded");
    let err = session
        .update(Msg::ProfileLoaded {
            request: req.id,
            result: Err(DashboardError::Network("connection refused".into())),
        })
        .unwrap_err();
    assert_eq!(err, DashboardError::Network("connection refused".into()));
    assert!(matches!(session.status(), LoadStatus::Failed(_)));
    assert_eq!(session.cards().len(), 3);
}
