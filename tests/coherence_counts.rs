use std::sync::Arc;

use subset_frequency::{
    summarize_unweighted, summarize_weighted, Aggregation, CorpusAdapter, CountedSubsets, InMemoryCorpus,
    Segmentation, SegmentationDefinition, SubsetFrequencyDeterminer,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn topic_corpus() -> InMemoryCorpus {
    InMemoryCorpus::from_documents(vec![
        vec!["game", "team", "season"],
        vec!["game", "team", "player"],
        vec!["team", "player", "coach"],
        vec!["market", "stock", "price"],
        vec!["stock", "price", "trade", "game"],
        vec!["season", "coach"],
    ])
    .unwrap()
}

/// log(P(w_i, w_j) + eps) / P(w_j) over one-preceding pairs
fn umass_like(counted: &CountedSubsets, documents: u32) -> Vec<f64> {
    counted
        .segments
        .iter()
        .zip(&counted.conditions)
        .flat_map(|(&segment, conditions)| {
            conditions.iter().map(move |&condition| {
                let joint = counted.probability(segment | condition, documents).unwrap();
                let cond = counted.probability(condition, documents).unwrap();
                if cond == 0.0 {
                    f64::NAN
                } else {
                    ((joint + 1e-12) / cond).ln()
                }
            })
        })
        .collect()
}

#[test]
fn scores_topics_end_to_end() {
    init_tracing();
    let corpus = Arc::new(topic_corpus());
    let determiner = SubsetFrequencyDeterminer::new(corpus.clone());
    let documents = determiner.number_of_documents().unwrap();
    assert_eq!(documents, 6);

    let topics = vec![
        vec!["game", "team", "player"],
        vec!["stock", "price", "market"],
        vec!["unicorn", "game", "coach"],
    ];
    let counted = determiner
        .determine_counts_with(&topics, Segmentation::OnePreceding)
        .unwrap();
    assert_eq!(counted.len(), 3);

    // game: docs 0,1,4   team: 0,1,2   player: 1,2
    let sports = &counted[0];
    assert_eq!(sports.count(0b001), Some(3));
    assert_eq!(sports.count(0b011), Some(2));
    assert_eq!(sports.count(0b110), Some(2));
    assert_eq!(sports.count(0b111), Some(1));

    // unicorn never occurs
    let mixed = &counted[2];
    assert_eq!(mixed.count(0b001), Some(0));
    assert_eq!(mixed.count(0b110), Some(0));
    assert_eq!(mixed.count(0b111), Some(0));

    let sports_scores = umass_like(sports, documents);
    let finance_scores = umass_like(&counted[1], documents);
    let mixed_scores = umass_like(mixed, documents);
    assert_eq!(sports_scores.len(), 3);

    let sports_score = summarize_unweighted(&sports_scores);
    let finance_score = summarize_unweighted(&finance_scores);
    assert!(finance_score > sports_score);

    // pairs conditioned on unicorn are undefined
    assert!(summarize_unweighted(&mixed_scores).is_nan());
    let weights = vec![1.0; mixed_scores.len()];
    let weighted = summarize_weighted(&mixed_scores, &weights).unwrap();
    assert!(weighted.is_finite());
    assert_eq!(weighted, mixed_scores[2]);
}

#[test]
fn dyn_adapter_and_explicit_definitions() {
    let adapter: Arc<dyn CorpusAdapter> = Arc::new(topic_corpus());
    let determiner = SubsetFrequencyDeterminer::new(adapter);
    let word_sets = vec![vec!["season", "coach"], vec!["season", "coach"]];
    let definitions = vec![
        SegmentationDefinition::single(0b01, 0b10),
        SegmentationDefinition::single(0b10, 0b01),
    ];
    let counted = determiner.determine_counts(&word_sets, &definitions).unwrap();
    assert!(counted[0].shares_counts_with(&counted[1]));
    assert_eq!(counted[0].segments, vec![0b01]);
    assert_eq!(counted[1].segments, vec![0b10]);
    // season: 0,5   coach: 2,5
    assert_eq!(&counted[0].counts[1..], &[2, 2, 1]);
    assert_eq!(counted[0].word_count(), 2);
}

#[test]
fn counted_subsets_survive_transport() {
    let determiner = SubsetFrequencyDeterminer::new(topic_corpus());
    let counted = determiner
        .determine_counts_with(&[vec!["team", "coach", "season"]], Segmentation::OneAll)
        .unwrap();
    let bytes = serde_cbor::to_vec(&counted).unwrap();
    let decoded: Vec<CountedSubsets> = serde_cbor::from_slice(&bytes).unwrap();
    assert_eq!(decoded, counted);

    let aggregation: Aggregation = "sigma_a".parse().unwrap();
    let bytes = serde_cbor::to_vec(&aggregation).unwrap();
    assert_eq!(serde_cbor::from_slice::<Aggregation>(&bytes).unwrap(), Aggregation::ArithmeticMean);
}
