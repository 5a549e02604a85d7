use best_time::config::AppConfig;
use best_time::error::PredictError;
use best_time::features::{
    count_hashtags, normalize, FeatureExtractor, LinearClassifier, LiteBundle, ModelMode,
    RawScores, SentimentScores, Vectorizer,
};
use best_time::load_feature_extractor;
use serde_json::json;

fn vectorizer(vocabulary: serde_json::Value) -> Vectorizer {
    serde_json::from_value(json!({ "vocabulary": vocabulary })).expect("vectorizer fixture")
}

fn classifier(classes: &[&str], weights: Vec<Vec<f64>>, intercepts: Vec<f64>) -> LinearClassifier {
    serde_json::from_value(json!({
        "classes": classes,
        "weights": weights,
        "intercepts": intercepts,
    }))
    .expect("classifier fixture")
}

fn raw_scores(toxicity: f64) -> RawScores {
    RawScores {
        topic: "Technology".to_string(),
        language: "en".to_string(),
        sentiment: SentimentScores {
            positive: 0.7,
            negative: 0.1,
            neutral: 0.2,
        },
        toxicity,
    }
}

#[test]
fn hashtags_count_word_tokens_only() {
    assert_eq!(count_hashtags("Excited about AI! #tech"), 1);
    assert_eq!(count_hashtags("#a #b"), 2);
    assert_eq!(count_hashtags("# none"), 0);
    assert_eq!(count_hashtags("##x"), 1);
    assert_eq!(count_hashtags("inline#tag"), 1);
    assert_eq!(count_hashtags("#_ok #"), 1);
    assert_eq!(count_hashtags(""), 0);
}

#[test]
fn normalize_derives_caption_stats() {
    let features = normalize("Excited about AI! #tech", &raw_scores(0.0));
    assert_eq!(features.content_length, 23);
    assert_eq!(features.num_hashtags, 1);
    assert_eq!(features.topic, "Technology");
    assert_eq!(features.language, "en");
}

#[test]
fn normalize_scales_toxicity_once() {
    let features = normalize("anything", &raw_scores(0.5));
    assert!((features.toxicity_score - 50.0).abs() < 1e-9);
}

#[test]
fn normalize_is_idempotent() {
    let raw = raw_scores(0.31);
    let first = normalize("same caption #tag", &raw);
    let second = normalize("same caption #tag", &raw);
    assert_eq!(first, second);
}

#[test]
fn sentiment_mapping_matches_by_substring() {
    let classes = vec![
        "negative".to_string(),
        "neutral".to_string(),
        "positive".to_string(),
    ];
    let scores = SentimentScores::from_classes(&classes, &[0.1, 0.2, 0.7]);
    assert!((scores.positive - 0.7).abs() < 1e-9);
    assert!((scores.negative - 0.1).abs() < 1e-9);
    assert!((scores.neutral - 0.2).abs() < 1e-9);
    assert_eq!(scores.category(), "pos");
}

#[test]
fn sentiment_mapping_falls_back_to_position() {
    let classes = vec!["0".to_string(), "1".to_string(), "2".to_string()];
    let scores = SentimentScores::from_classes(&classes, &[0.5, 0.3, 0.2]);
    assert!((scores.negative - 0.5).abs() < 1e-9);
    assert!((scores.neutral - 0.3).abs() < 1e-9);
    assert!((scores.positive - 0.2).abs() < 1e-9);
    assert_eq!(scores.category(), "neg");
}

#[test]
fn sentiment_mapping_defaults_unmapped_buckets_to_zero() {
    let classes = vec!["compound".to_string()];
    let scores = SentimentScores::from_classes(&classes, &[0.4]);
    assert!((scores.negative - 0.4).abs() < 1e-9);
    assert_eq!(scores.positive, 0.0);
    assert_eq!(scores.neutral, 0.0);

    // An extra class past index 2 with no recognizable name is dropped.
    let classes = vec![
        "down".to_string(),
        "flat".to_string(),
        "up".to_string(),
        "extra".to_string(),
    ];
    let scores = SentimentScores::from_classes(&classes, &[0.1, 0.2, 0.3, 0.9]);
    assert!((scores.negative - 0.1).abs() < 1e-9);
    assert!((scores.neutral - 0.2).abs() < 1e-9);
    assert!((scores.positive - 0.3).abs() < 1e-9);
}

#[test]
fn sentiment_category_ties_prefer_scan_order() {
    let tied = SentimentScores {
        positive: 0.5,
        negative: 0.5,
        neutral: 0.0,
    };
    assert_eq!(tied.category(), "pos");

    let tied = SentimentScores {
        positive: 0.2,
        negative: 0.5,
        neutral: 0.5,
    };
    assert_eq!(tied.category(), "neg");
}

#[test]
fn vectorizer_counts_tokens() {
    let vectorizer = vectorizer(json!({ "love": 0, "ai": 1 }));
    let counts = vectorizer.transform("I love love AI!");
    assert_eq!(counts, vec![2.0, 1.0]);
    assert_eq!(vectorizer.transform("nothing known"), vec![0.0, 0.0]);
}

#[test]
fn classifier_predicts_argmax_class() {
    let model = classifier(
        &["Food", "Technology"],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        vec![0.0, 0.0],
    );
    assert_eq!(model.predict(&[1.0, 0.0]), Some("Technology"));
    assert_eq!(model.predict(&[0.0, 1.0]), Some("Food"));
    // Exact tie keeps the first class.
    assert_eq!(model.predict(&[0.0, 0.0]), Some("Food"));

    let probabilities = model.predict_proba(&[1.0, 0.0]);
    let total: f64 = probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(probabilities[1] > probabilities[0]);
}

#[test]
fn lite_bundle_rejects_mismatched_shapes() {
    let vec2 = vectorizer(json!({ "a": 0, "b": 1 }));
    let fits = classifier(&["x", "y"], vec![vec![0.0, 0.0], vec![0.0, 0.0]], vec![0.0, 0.0]);
    let wrong_dim = classifier(&["x", "y"], vec![vec![0.0], vec![0.0]], vec![0.0, 0.0]);

    let result = LiteBundle::new(vec2.clone(), wrong_dim, fits.clone(), fits.clone());
    assert!(matches!(result, Err(PredictError::Configuration(_))));

    let no_classes = classifier(&[], vec![], vec![]);
    let result = LiteBundle::new(vec2, no_classes, fits.clone(), fits);
    assert!(matches!(result, Err(PredictError::Configuration(_))));
}

#[test]
fn lite_extraction_produces_canonical_features() {
    let bundle = LiteBundle::new(
        vectorizer(json!({ "great": 0, "awful": 1 })),
        classifier(
            &["Food", "Technology"],
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            vec![0.0, 0.0],
        ),
        classifier(
            &["negative", "neutral", "positive"],
            vec![vec![0.0, 2.0], vec![0.0, 0.0], vec![2.0, 0.0]],
            vec![0.0, 0.0, 0.0],
        ),
        classifier(
            &["clean", "toxic"],
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
            vec![0.0, 0.0],
        ),
    )
    .expect("bundle fixture");

    let features = bundle.extract("great great #day");
    assert_eq!(features.topic, "Technology");
    assert_eq!(features.language, "en");
    assert_eq!(features.content_length, 16);
    assert_eq!(features.num_hashtags, 1);
    assert_eq!(features.sentiment_category, "pos");
    assert!(features.sentiment_positive > features.sentiment_negative);
    // Uninformative binary toxicity head sits at 0.5, scaled to the 0-100 range.
    assert!((features.toxicity_score - 50.0).abs() < 1e-9);
}

#[test]
fn dispatcher_requires_artifacts_or_endpoint() {
    let mut config = AppConfig::default();
    config.models.dir = std::env::temp_dir().join("best-time-missing-artifacts");
    config.nlp.endpoint = None;

    let result = load_feature_extractor(&config);
    assert!(matches!(result, Err(PredictError::Configuration(_))));

    config.nlp.endpoint = Some("http://localhost:9000".to_string());
    let extractor = load_feature_extractor(&config).expect("heavy extractor");
    assert_eq!(extractor.mode(), ModelMode::Heavy);
}

#[test]
fn dispatcher_prefers_lite_artifacts() {
    let dir = std::env::temp_dir().join(format!("best-time-lite-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create artifact dir");

    let classifier_json = json!({
        "classes": ["negative", "neutral", "positive"],
        "weights": [[0.0], [0.0], [0.0]],
        "intercepts": [0.0, 0.0, 0.0],
    });
    let binary_json = json!({
        "classes": ["clean", "toxic"],
        "weights": [[0.0], [0.0]],
        "intercepts": [0.0, 0.0],
    });
    let files = [
        ("vectorizer.json", json!({ "vocabulary": { "ai": 0 } })),
        ("topic_model.json", classifier_json.clone()),
        ("sentiment_model.json", classifier_json),
        ("toxicity_model.json", binary_json),
    ];
    for (name, payload) in files {
        std::fs::write(dir.join(name), payload.to_string()).expect("write artifact");
    }

    let mut config = AppConfig::default();
    config.models.dir = dir.clone();
    // Lite wins even with an endpoint configured.
    config.nlp.endpoint = Some("http://localhost:9000".to_string());

    let extractor = load_feature_extractor(&config).expect("lite extractor");
    assert_eq!(extractor.mode(), ModelMode::Lite);
    assert!(matches!(extractor, FeatureExtractor::Lite(_)));

    let _ = std::fs::remove_dir_all(dir);
}
