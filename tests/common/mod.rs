use instalearn::config::EngineConfig;
use instalearn::storage::{KvMap, StoragePair};
use instalearn::words::WordEntry;
use instalearn::LearningEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn sample_words(n: usize) -> Vec<WordEntry> {
    (0..n)
        .map(|i| {
            let mut w = WordEntry::new(format!("de{i}"), format!("nl{i}"));
            w.id = format!("w{i}");
            w
        })
        .collect()
}

pub fn storage_with(
    synced: Vec<(&str, serde_json::Value)>,
    local: Vec<(&str, serde_json::Value)>,
) -> StoragePair {
    let pair = StoragePair::in_memory();
    pair.synced
        .set(
            synced
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<KvMap>(),
        )
        .unwrap();
    pair.local
        .set(
            local
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<KvMap>(),
        )
        .unwrap();
    pair
}

pub fn test_engine(words: Vec<WordEntry>) -> LearningEngine {
    test_engine_with(EngineConfig::default(), words)
}

pub fn test_engine_with(config: EngineConfig, words: Vec<WordEntry>) -> LearningEngine {
    let mut engine = LearningEngine::load(config, StoragePair::in_memory());
    engine.set_custom_words(words);
    engine
}
