use super::*;
use crate::fixtures::{BBox, FixtureStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn store() -> FixtureStore {
    FixtureStore::embedded().unwrap()
}

fn exact_mean_co2(store: &FixtureStore) -> f64 {
    let total: f64 = store.features().iter().map(|f| f.properties.co2).sum();
    total / store.len() as f64
}

/// A bbox over Antarctica; no fixture is anchored there.
fn empty_bbox() -> BBox {
    BBox::new(0.0, -89.0, 1.0, -88.0)
}

fn predict_parts(response: AgentResponse) -> PredictResponse {
    match response {
        AgentResponse::Predict(p) => p,
        other => panic!("Expected predict response, got {:?}", other),
    }
}

fn cluster_parts(response: AgentResponse) -> ClusterResponse {
    match response {
        AgentResponse::Cluster(c) => c,
        other => panic!("Expected cluster response, got {:?}", other),
    }
}

#[test]
fn test_baseline_is_exact_mean_over_full_region() {
    let store = store();
    let baseline = regional_baseline(&store, &BBox::WORLD);
    assert_eq!(baseline.sample_count, store.len());
    assert_eq!(baseline.mean_co2, exact_mean_co2(&store));
}

#[test]
fn test_baseline_falls_back_when_region_empty() {
    let baseline = regional_baseline(&store(), &empty_bbox());
    assert_eq!(baseline.sample_count, 0);
    assert_eq!(baseline.mean_co2, BASELINE_CO2_PPM);
}

#[test]
fn test_predict_without_jitter_matches_mean() {
    let store = store();
    // 0.5 -> zero delta; 0.0 for each trend point; 0.5 -> confidence 0.75
    let mut rng = ScriptedRandom::new([0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5]).unwrap();
    let p = predict_parts(predict(&store, &BBox::WORLD, &mut rng).unwrap());

    let expected = (exact_mean_co2(&store) * 10.0).round() / 10.0;
    assert_eq!(p.payload.predicted_co2_ppm, expected);
    assert_eq!(p.payload.confidence, 0.75);
    assert_eq!(p.status, ResponseStatus::Ok);
}

#[test]
fn test_predict_exact_output_for_empty_region() {
    // 0.75 -> delta +2.0; trend draws 0.25 -> +0.5; confidence draw 0.0 -> 0.6
    let mut rng = ScriptedRandom::new([0.75, 0.25, 0.25, 0.25, 0.25, 0.25, 0.0]).unwrap();
    let p = predict_parts(predict(&store(), &empty_bbox(), &mut rng).unwrap());

    assert_eq!(p.payload.predicted_co2_ppm, 412.0);
    assert_eq!(p.payload.trend, [405.5, 407.3, 409.1, 410.9, 412.7]);
    assert_eq!(p.payload.confidence, 0.6);
    assert_eq!(p.chart_data.y, p.payload.trend);
    assert_eq!(
        p.text,
        "Predicted average CO₂ level in selected region: 412 ppm (+2 ppm vs baseline). Confidence: 0.6."
    );
}

#[test]
fn test_predict_negative_delta_has_no_plus_sign() {
    // 0.0 -> delta -4.0
    let mut rng = ScriptedRandom::new([0.0]).unwrap();
    let p = predict_parts(predict(&store(), &empty_bbox(), &mut rng).unwrap());
    assert_eq!(p.payload.predicted_co2_ppm, 406.0);
    assert!(p.text.contains("(-4 ppm vs baseline)"));
}

#[test]
fn test_predict_ties_round_toward_positive_infinity() {
    // 0.46875 -> delta -0.25 exactly
    let mut rng = ScriptedRandom::new([0.46875, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let p = predict_parts(predict(&store(), &empty_bbox(), &mut rng).unwrap());
    assert_eq!(p.payload.predicted_co2_ppm, 409.8);
    assert!(p.text.contains("(-0.2 ppm vs baseline)"), "{}", p.text);

    assert_eq!(synth::round_to(2.5, 0), 3.0);
    assert_eq!(synth::round_to(-2.5, 0), -2.0);
    assert_eq!(synth::round_to(0.125, 2), 0.13);
    assert!(synth::round_to(-0.04, 1).is_sign_positive());
}

#[test]
fn test_scripted_random_rejects_bad_samples() {
    assert!(ScriptedRandom::new(Vec::new()).is_err());
    assert!(ScriptedRandom::new([0.2, 1.0]).is_err());
    assert!(ScriptedRandom::constant(-0.1).is_err());

    let mut rng = ScriptedRandom::new([0.1, 0.9]).unwrap();
    assert_eq!([rng.next_unit(), rng.next_unit(), rng.next_unit()], [0.1, 0.9, 0.1]);
}

#[test]
fn test_predict_empty_region_stays_within_jitter_of_baseline() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let p = predict_parts(predict(&store(), &empty_bbox(), &mut rng).unwrap());
        let v = p.payload.predicted_co2_ppm;
        assert!(v.is_finite());
        assert!((406.0..=414.0).contains(&v), "predicted {} out of range", v);
    }
}

#[test]
fn test_predict_shape_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let p = predict_parts(predict(&store(), &BBox::WORLD, &mut rng).unwrap());
        assert_eq!(p.payload.trend.len(), 5);
        assert_eq!(p.chart_data.x, ["2019", "2020", "2021", "2022", "2023"]);
        assert!(
            (0.6..=0.9).contains(&p.payload.confidence),
            "confidence {} out of range",
            p.payload.confidence
        );
    }
}

#[test]
fn test_cluster_partitions_every_country_once() {
    let store = store();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let c = cluster_parts(cluster(&store, &mut rng));
        let clusters = &c.payload.clusters;

        let ids: Vec<u8> = clusters.iter().map(|c| c.cluster_id).collect();
        let labels: Vec<&str> = clusters.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(labels, CLUSTER_LABELS.to_vec());

        let mut members: Vec<&str> = clusters
            .iter()
            .flat_map(|c| c.members.iter().map(String::as_str))
            .collect();
        members.sort_unstable();
        let mut expected = store.countries();
        expected.sort_unstable();
        assert_eq!(members, expected);

        let counts: Vec<usize> = clusters.iter().map(|c| c.members.len()).collect();
        assert_eq!(c.chart_data.clusters_count.to_vec(), counts);
    }
}

#[test]
fn test_cluster_uses_uniform_draw_not_round_robin() {
    // Every draw lands in the top bucket.
    let mut rng = ScriptedRandom::constant(0.99).unwrap();
    let c = cluster_parts(cluster(&store(), &mut rng));
    let total = store().countries().len();
    assert_eq!(c.chart_data.clusters_count, [0, 0, total]);
    assert_eq!(
        c.text,
        format!(
            "Found 3 clusters based on air quality indicators: 0 regions with low pollution, 0 with moderate levels, and {} at high risk.",
            total
        )
    );
}

#[test]
fn test_cluster_bucket_boundaries() {
    let features: Vec<serde_json::Value> = ["A", "B", "C"]
        .iter()
        .enumerate()
        .map(|(i, country)| {
            json!({
                "type": "Feature",
                "id": format!("f{}", i),
                "properties": {
                    "name": country, "country": country, "co2": 400.0, "ghg": 1.0,
                    "pm25": 10.0, "ozone": 0.03, "air_pollution_index": 50.0
                },
                "geometry": { "type": "Polygon", "coordinates": [[[i, 0]]] }
            })
        })
        .collect();
    let doc = json!({ "type": "FeatureCollection", "features": features });
    let store = FixtureStore::from_json(&doc.to_string()).unwrap();

    let mut rng = ScriptedRandom::new([0.0, 0.34, 0.67]).unwrap();
    let c = cluster_parts(cluster(&store, &mut rng));
    assert_eq!(c.payload.clusters[0].members, vec!["A"]);
    assert_eq!(c.payload.clusters[1].members, vec!["B"]);
    assert_eq!(c.payload.clusters[2].members, vec!["C"]);
}

#[test]
fn test_action_parsing() {
    assert_eq!("predict".parse::<AgentAction>().unwrap(), AgentAction::Predict);
    assert_eq!("cluster".parse::<AgentAction>().unwrap(), AgentAction::Cluster);
    assert_eq!(
        "forecast".parse::<AgentAction>().unwrap_err(),
        AgentError::InvalidAction("forecast".to_string())
    );
}

#[test]
fn test_request_from_value_checks_action_first() {
    let err = AgentRequest::from_value(json!({ "action": "explain" })).unwrap_err();
    assert_eq!(err, AgentError::InvalidAction("explain".to_string()));

    let located = json!({ "location": { "bbox": [0, 0, 1, 1], "center": [0, 0] } });
    let err = AgentRequest::from_value(located).unwrap_err();
    assert_eq!(err, AgentError::InvalidAction(String::new()));

    let err = AgentRequest::from_value(json!({
        "action": "predict",
        "location": { "bbox": "everywhere", "center": [0, 0] }
    }))
    .unwrap_err();
    assert!(matches!(err, AgentError::InvalidRequest(_)));
}

#[test]
fn test_request_drops_unknown_layers() {
    let request = AgentRequest::from_value(json!({
        "action": "predict",
        "location": { "bbox": [0, 0, 1, 1], "center": [0, 0] },
        "layers": ["no2", "pm25", "ozone", "methane"]
    }))
    .unwrap();
    assert_eq!(request.layers, vec![crate::LayerKind::Pm25, crate::LayerKind::Ozone]);
}

#[test]
fn test_cluster_request_needs_no_location() {
    let request = AgentRequest::from_value(json!({ "action": "cluster" })).unwrap();
    assert_eq!(request.location, None);
    assert!(request.layers.is_empty());

    let predict = AgentRequest::from_value(json!({ "action": "predict" })).unwrap();
    assert!(matches!(predict.bbox(), Err(AgentError::InvalidRequest(_))));
}

#[test]
fn test_request_wire_format() {
    let request = AgentRequest::from_value(json!({
        "action": "predict",
        "location": { "bbox": [-10, -5, 10, 5], "center": [0, 0] },
        "layers": ["co2", "air_pollution"],
        "context": { "selectedFeatureIds": ["in-dl"] }
    }))
    .unwrap();

    assert_eq!(request.action, AgentAction::Predict);
    assert_eq!(request.bbox().unwrap(), &BBox::new(-10.0, -5.0, 10.0, 5.0));
    assert_eq!(request.layers, vec![crate::LayerKind::Co2, crate::LayerKind::AirPollution]);
    assert_eq!(request.context.selected_feature_ids, vec!["in-dl"]);

    // layers and context are optional
    let minimal = AgentRequest::from_value(json!({
        "action": "cluster",
        "location": { "bbox": [0, 0, 0, 0], "center": [0, 0] }
    }))
    .unwrap();
    assert!(minimal.layers.is_empty());
    assert!(minimal.context.selected_feature_ids.is_empty());
}

#[test]
fn test_response_wire_format() {
    let mut rng = ScriptedRandom::constant(0.5).unwrap();
    let predicted = predict(&store(), &empty_bbox(), &mut rng).unwrap();
    let predict_json = serde_json::to_value(predicted).unwrap();
    assert_eq!(predict_json["status"], "ok");
    assert_eq!(predict_json["action"], "predict");
    assert!(predict_json["payload"]["predicted_co2_ppm"].is_number());
    assert_eq!(predict_json["chartData"]["x"][0], "2019");
    assert_eq!(predict_json["chartData"]["y"].as_array().unwrap().len(), 5);

    let cluster_json = serde_json::to_value(cluster(&store(), &mut rng)).unwrap();
    assert_eq!(cluster_json["action"], "cluster");
    assert_eq!(cluster_json["payload"]["clusters"][2]["label"], "High Risk");
    assert_eq!(cluster_json["chartData"]["clustersCount"].as_array().unwrap().len(), 3);

    let back: AgentResponse = serde_json::from_value(cluster_json).unwrap();
    assert_eq!(back.action(), AgentAction::Cluster);
}

#[tokio::test]
async fn test_service_rejects_unknown_action() {
    let service = AgentService::new(Arc::new(store()), Duration::ZERO);
    let err = service
        .handle_json(br#"{"action":"explain","location":{"bbox":[0,0,1,1],"center":[0,0]}}"#)
        .await
        .unwrap_err();
    assert_eq!(err, AgentError::InvalidAction("explain".to_string()));
}

#[tokio::test]
async fn test_service_rejects_malformed_json() {
    let service = AgentService::new(Arc::new(store()), Duration::ZERO);
    let err = service.handle_json(b"{not json").await.unwrap_err();
    assert!(matches!(err, AgentError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_service_uses_injected_random_source() {
    let service = AgentService::with_random(
        Arc::new(store()),
        Duration::ZERO,
        ScriptedRandom::new([0.75, 0.25, 0.25, 0.25, 0.25, 0.25, 0.0]).unwrap(),
    );
    let request = AgentRequest {
        action: AgentAction::Predict,
        location: Some(Location {
            bbox: empty_bbox(),
            center: [0.5, -88.5],
        }),
        layers: vec![],
        context: RequestContext::default(),
    };

    let p = predict_parts(service.handle(&request).await.unwrap());
    assert_eq!(p.payload.predicted_co2_ppm, 412.0);
}

#[tokio::test]
async fn test_service_applies_simulated_latency() {
    let service = AgentService::new(Arc::new(store()), Duration::from_millis(50));
    let started = std::time::Instant::now();
    service
        .handle_json(br#"{"action":"cluster","location":{"bbox":[0,0,1,1],"center":[0,0]}}"#)
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_service_predict_without_location_fails() {
    let service = AgentService::new(Arc::new(store()), Duration::ZERO);
    let err = service.handle_json(br#"{"action":"predict"}"#).await.unwrap_err();
    assert!(matches!(err, AgentError::InvalidRequest(_)));
}
