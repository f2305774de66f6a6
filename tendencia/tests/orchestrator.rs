use std::sync::Arc;

use tendencia::{
    BatchSeries, ErrorTag, FailureKind, FetchParams, RawSeries, Tendencia, TrendsError,
};
use tendencia_mock::{FixtureProvider, MockBehavior, ScriptController, ScriptedProvider};

fn scripted() -> (Tendencia, ScriptController) {
    let (provider, controller) = ScriptedProvider::new_with_controller("scripted");
    let t = Tendencia::builder()
        .provider(provider)
        .build()
        .expect("valid config");
    (t, controller)
}

fn batch(entries: &[(&str, &[u32])]) -> BatchSeries {
    entries
        .iter()
        .map(|(q, values)| ((*q).to_string(), RawSeries::dense(values.iter().copied())))
        .collect()
}

fn queries(qs: &[&str]) -> Vec<String> {
    qs.iter().map(|q| (*q).to_string()).collect()
}

#[tokio::test(start_paused = true)]
async fn four_queries_fetch_as_two_ordered_batches() {
    let (t, controller) = scripted();
    controller
        .push(MockBehavior::Return(batch(&[
            ("a", &[20, 20]),
            ("b", &[50, 50]),
            ("c", &[10, 10]),
        ])))
        .await;
    controller
        .push(MockBehavior::Return(batch(&[("d", &[25, 25])])))
        .await;

    let resp = t
        .interest_over_time(&queries(&["a", "b", "c", "d"]), FetchParams::default())
        .await
        .unwrap();

    assert_eq!(
        controller.calls().await,
        vec![queries(&["a", "b", "c"]), queries(&["d"])]
    );
    let order: Vec<&str> = resp.items.iter().map(|m| m.query.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c", "d"]);

    // Scores are relative to the strongest query of the whole request.
    let scores: Vec<f64> = resp.items.iter().map(|m| m.score).collect();
    assert_eq!(scores, vec![40.0, 100.0, 20.0, 50.0]);
    assert!(resp.items.iter().all(|m| m.error.is_none()));
}

#[tokio::test(start_paused = true)]
async fn failed_batch_degrades_to_tagged_zeroed_metrics() {
    let (t, controller) = scripted();
    controller
        .push(MockBehavior::Return(batch(&[
            ("a", &[20, 20]),
            ("b", &[50, 50]),
            ("c", &[10, 10]),
        ])))
        .await;
    // Second batch exhausts all rate-limit retries (initial call + 4 retries).
    controller
        .push_repeated(MockBehavior::Fail(TrendsError::RateLimited), 5)
        .await;

    let resp = t
        .interest_over_time(&queries(&["a", "b", "c", "d"]), FetchParams::default())
        .await
        .unwrap();

    assert_eq!(controller.call_count().await, 6);

    let d = &resp.items[3];
    assert_eq!(d.query, "d");
    assert_eq!(d.error, Some(ErrorTag::RateLimited));
    assert_eq!(d.avg, 0.0);
    assert_eq!(d.last, 0);
    assert_eq!(d.max, 0);
    assert!(d.sparkline.is_empty());
    assert_eq!(d.score, 0.0);

    // The surviving batch still gets real metrics and scores.
    assert_eq!(resp.items[1].score, 100.0);
    assert_eq!(resp.items[0].score, 40.0);
}

#[tokio::test(start_paused = true)]
async fn transient_exhaustion_carries_the_failure_kind() {
    let (t, controller) = scripted();
    controller
        .push_repeated(MockBehavior::Fail(TrendsError::network("reset")), 5)
        .await;

    let resp = t
        .interest_over_time(&queries(&["solo"]), FetchParams::default())
        .await
        .unwrap();

    assert_eq!(
        resp.items[0].error,
        Some(ErrorTag::Transient(FailureKind::Network))
    );
    assert_eq!(resp.items[0].score, 0.0);
}

#[tokio::test(start_paused = true)]
async fn empty_input_fails_fast_without_provider_calls() {
    let (t, controller) = scripted();

    for input in [vec![], queries(&["", "   ", "\t"])] {
        let err = t
            .interest_over_time(&input, FetchParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TrendsError::Validation(_)));
    }
    assert_eq!(controller.call_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn normalization_trims_dedups_neighbors_and_caps() {
    let (provider, controller) = ScriptedProvider::new_with_controller("scripted");
    let t = Tendencia::builder()
        .provider(provider)
        .max_queries(3)
        .batch_size(3)
        .build()
        .unwrap();
    controller
        .push(MockBehavior::Return(batch(&[
            ("mate", &[10]),
            ("asado", &[20]),
            ("tango", &[30]),
        ])))
        .await;

    let raw = queries(&["  mate ", "mate", "", "asado", "tango", "dropped"]);
    let resp = t.interest_over_time(&raw, FetchParams::default()).await.unwrap();

    assert_eq!(
        controller.calls().await,
        vec![queries(&["mate", "asado", "tango"])]
    );
    assert_eq!(resp.items.len(), 3);
    assert_eq!(resp.items[0].query, "mate");
}

#[tokio::test(start_paused = true)]
async fn query_without_data_is_zeroed_but_untagged() {
    let (t, controller) = scripted();
    // Provider answers but omits "quiet" entirely.
    controller
        .push(MockBehavior::Return(batch(&[("loud", &[40, 60])])))
        .await;

    let resp = t
        .interest_over_time(&queries(&["loud", "quiet"]), FetchParams::default())
        .await
        .unwrap();

    let quiet = &resp.items[1];
    assert_eq!(quiet.avg, 0.0);
    assert!(quiet.error.is_none());
    assert_eq!(quiet.score, 0.0);
    assert_eq!(resp.items[0].score, 100.0);
}

#[tokio::test(start_paused = true)]
async fn response_echoes_request_scope() {
    let (t, controller) = scripted();
    controller
        .push(MockBehavior::Return(batch(&[("q", &[1])])))
        .await;

    let params = FetchParams {
        geo: "UY".to_string(),
        timeframe: "today 3-m".to_string(),
        ..FetchParams::default()
    };
    let resp = t
        .interest_over_time(&queries(&["q"]), params)
        .await
        .unwrap();
    assert_eq!(resp.geo, "UY");
    assert_eq!(resp.timeframe, "today 3-m");
}

#[tokio::test(start_paused = true)]
async fn response_serializes_error_tags_and_omits_absent_ones() {
    let (provider, controller) = ScriptedProvider::new_with_controller("scripted");
    let t = Tendencia::builder()
        .provider(provider)
        .batch_size(1)
        .build()
        .unwrap();
    controller
        .push(MockBehavior::Return(batch(&[("ok", &[10, 20])])))
        .await;
    controller
        .push_repeated(MockBehavior::Fail(TrendsError::RateLimited), 5)
        .await;

    let resp = t
        .interest_over_time(&queries(&["ok", "down"]), FetchParams::default())
        .await
        .unwrap();
    let json = serde_json::to_value(&resp).unwrap();

    assert!(json["items"][0].get("error").is_none());
    assert_eq!(json["items"][1]["error"], serde_json::json!("rate_limited"));
    assert_eq!(json["geo"], "AR");
}

#[tokio::test(start_paused = true)]
async fn identical_scripts_produce_identical_responses() {
    let mut runs = Vec::new();
    for _ in 0..2 {
        let (t, controller) = scripted();
        controller
            .push(MockBehavior::Return(batch(&[
                ("a", &[5, 15]),
                ("b", &[30, 10]),
            ])))
            .await;
        let resp = t
            .interest_over_time(&queries(&["a", "b"]), FetchParams::default())
            .await
            .unwrap();
        runs.push(resp);
    }
    assert_eq!(runs[0], runs[1]);
}

#[tokio::test(start_paused = true)]
async fn fixture_provider_end_to_end() {
    let t = Tendencia::builder()
        .provider(Arc::new(FixtureProvider::new()))
        .build()
        .unwrap();

    let resp = t
        .interest_over_time(&queries(&["mate", "asado", "NODATA"]), FetchParams::default())
        .await
        .unwrap();

    assert_eq!(resp.items.len(), 3);
    assert!(resp.items.iter().any(|m| m.score == 100.0));
    let nodata = resp.items.iter().find(|m| m.query == "NODATA").unwrap();
    assert_eq!(nodata.avg, 0.0);
    assert!(nodata.error.is_none());
    assert!(resp.items.iter().all(|m| m.sparkline.len() <= 26));
}
