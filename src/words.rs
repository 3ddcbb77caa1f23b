use serde::{Deserialize, Serialize};

use crate::state::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    Word,
    Phrase,
}

impl Default for WordKind {
    fn default() -> Self {
        WordKind::Word
    }
}

/// A translation pair. Identity is the stable `id`, minted when the entry is
/// created; everything except the enrichment fields is immutable after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    #[serde(default)]
    pub id: String,
    pub german: String,
    pub dutch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: WordKind,
}

impl WordEntry {
    pub fn new(german: impl Into<String>, dutch: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            german: german.into(),
            dutch: dutch.into(),
            emoji: None,
            example: None,
            image: None,
            kind: WordKind::Word,
        }
    }

    /// The text shown as the question for the given direction.
    pub fn source_text(&self, direction: Direction) -> &str {
        match direction {
            Direction::GermanToDutch => &self.german,
            Direction::DutchToGerman => &self.dutch,
        }
    }

    /// The text expected as the answer for the given direction.
    pub fn target_text(&self, direction: Direction) -> &str {
        match direction {
            Direction::GermanToDutch => &self.dutch,
            Direction::DutchToGerman => &self.german,
        }
    }
}

/// The ordered vocabulary list. Guarantees every entry carries a non-empty,
/// unique id so progress can be keyed stably.
#[derive(Debug, Clone, Default)]
pub struct WordStore {
    entries: Vec<WordEntry>,
}

impl WordStore {
    pub fn from_entries(mut entries: Vec<WordEntry>) -> Self {
        for entry in entries.iter_mut() {
            if entry.id.is_empty() {
                entry.id = uuid::Uuid::new_v4().to_string();
            }
        }
        Self { entries }
    }

    pub fn defaults() -> Self {
        Self {
            entries: default_words(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn by_id(&self, id: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|w| w.id == id)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }
}

/// Built-in seed vocabulary, used whenever no custom list is stored. Ids are
/// deterministic so persisted progress stays attached across restarts.
pub fn default_words() -> Vec<WordEntry> {
    const SEED: &[(&str, &str, &str, &str)] = &[
        ("Hund", "Hond", "🐕", "Der Hund spielt im Garten"),
        ("Katze", "Kat", "🐱", "Die Katze schläft auf dem Sofa"),
        ("Haus", "Huis", "🏠", "Das Haus ist sehr groß"),
        ("Wasser", "Water", "💧", "Ich trinke viel Wasser"),
        ("Brot", "Brood", "🍞", "Das Brot ist frisch"),
        ("Milch", "Melk", "🥛", "Die Milch ist kalt"),
        ("Apfel", "Appel", "🍎", "Der Apfel ist rot"),
        ("Buch", "Boek", "📖", "Ich lese ein Buch"),
        ("Tisch", "Tafel", "🪑", "Der Tisch ist aus Holz"),
        ("Fenster", "Raam", "🪟", "Das Fenster ist offen"),
        ("Tür", "Deur", "🚪", "Die Tür ist geschlossen"),
        ("Fahrrad", "Fiets", "🚲", "Ich fahre mit dem Fahrrad"),
        ("Straße", "Straat", "🛣️", "Die Straße ist lang"),
        ("Stadt", "Stad", "🏙️", "Die Stadt ist groß"),
        ("Baum", "Boom", "🌳", "Der Baum ist hoch"),
        ("Blume", "Bloem", "🌸", "Die Blume ist schön"),
        ("Sonne", "Zon", "☀️", "Die Sonne scheint"),
        ("Mond", "Maan", "🌙", "Der Mond ist voll"),
        ("Stern", "Ster", "⭐", "Der Stern leuchtet"),
        ("Himmel", "Hemel", "🌤️", "Der Himmel ist blau"),
        ("Wolke", "Wolk", "☁️", "Die Wolke ist weiß"),
        ("Schnee", "Sneeuw", "❄️", "Der Schnee ist weiß"),
        ("Feuer", "Vuur", "🔥", "Das Feuer ist heiß"),
        ("Erde", "Aarde", "🌍", "Die Erde ist rund"),
        ("Meer", "Zee", "🌊", "Das Meer ist tief"),
        ("Fluss", "Rivier", "🏞️", "Der Fluss fließt schnell"),
        ("Wald", "Bos", "🌲", "Der Wald ist dunkel"),
        ("Garten", "Tuin", "🏡", "Der Garten ist grün"),
        ("Küche", "Keuken", "🍳", "Die Küche ist sauber"),
        ("Arbeit", "Werk", "💼", "Die Arbeit ist wichtig"),
        ("Schule", "School", "🏫", "Die Schule beginnt um acht"),
        ("Freund", "Vriend", "👫", "Mein Freund ist nett"),
        ("Mutter", "Moeder", "👩", "Meine Mutter kocht gut"),
        ("Vater", "Vader", "👨", "Mein Vater arbeitet viel"),
        ("Bruder", "Broer", "👦", "Mein Bruder ist älter"),
        ("Schwester", "Zus", "👧", "Meine Schwester singt gern"),
        ("Liebe", "Liefde", "❤️", "Die Liebe ist stark"),
        ("Zeit", "Tijd", "⏰", "Die Zeit vergeht schnell"),
        ("Tag", "Dag", "🌞", "Der Tag ist lang"),
        ("Nacht", "Nacht", "🌙", "Die Nacht ist dunkel"),
    ];

    SEED.iter()
        .map(|(german, dutch, emoji, example)| WordEntry {
            id: format!("default-{}", german.to_lowercase()),
            german: (*german).to_string(),
            dutch: (*dutch).to_string(),
            emoji: Some((*emoji).to_string()),
            example: Some((*example).to_string()),
            image: None,
            kind: WordKind::Word,
        })
        .collect()
}
