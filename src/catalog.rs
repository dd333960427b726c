use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown note: {0}")]
    UnknownNote(String),
    #[error("unknown season: {0}")]
    UnknownSeason(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Position in the layout cycle.
    pub fn rank(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Autumn => 2,
            Season::Winter => 3,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Season::Spring => "#7DC352",
            Season::Summer => "#F45DA6",
            Season::Autumn => "#D2691E",
            Season::Winter => "#87CEEB",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownSeason(s.to_string()))
    }
}

/// Which phase of a scent a catalog note is grouped under for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteRole {
    Top,
    Middle,
    Base,
}

impl NoteRole {
    pub const ALL: [NoteRole; 3] = [NoteRole::Top, NoteRole::Middle, NoteRole::Base];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: &'static str,
    pub season: Season,
    pub role: NoteRole,
}

impl Note {
    pub fn color(&self) -> &'static str {
        self.season.color()
    }
}

const NOTES: [(&str, Season, NoteRole); 24] = [
    ("bergamot", Season::Summer, NoteRole::Top),
    ("aldehydes", Season::Winter, NoteRole::Top),
    ("neroli", Season::Spring, NoteRole::Top),
    ("mandarin orange", Season::Summer, NoteRole::Top),
    ("lemon", Season::Summer, NoteRole::Top),
    ("peach", Season::Autumn, NoteRole::Top),
    ("pink pepper", Season::Winter, NoteRole::Top),
    ("jasmine", Season::Summer, NoteRole::Middle),
    ("rose", Season::Spring, NoteRole::Middle),
    ("ylang-ylang", Season::Summer, NoteRole::Middle),
    ("iris", Season::Spring, NoteRole::Middle),
    ("orange blossom", Season::Spring, NoteRole::Middle),
    ("tuberose", Season::Summer, NoteRole::Middle),
    ("geranium", Season::Summer, NoteRole::Middle),
    ("vetiver", Season::Autumn, NoteRole::Base),
    ("vanilla", Season::Winter, NoteRole::Base),
    ("sandalwood", Season::Winter, NoteRole::Base),
    ("musk", Season::Winter, NoteRole::Base),
    ("patchouli", Season::Autumn, NoteRole::Base),
    ("amber", Season::Autumn, NoteRole::Base),
    ("white musk", Season::Winter, NoteRole::Base),
    ("tonka bean", Season::Winter, NoteRole::Base),
    ("cedar", Season::Autumn, NoteRole::Base),
    ("oakmoss", Season::Autumn, NoteRole::Base),
];

/// The fixed set of notes the graph is built over.
#[derive(Debug)]
pub struct NoteCatalog {
    notes: BTreeMap<&'static str, Note>,
    sorted: Vec<&'static str>,
    top: Vec<&'static str>,
    middle: Vec<&'static str>,
    base: Vec<&'static str>,
}

static CATALOG: Lazy<NoteCatalog> = Lazy::new(NoteCatalog::build);

impl NoteCatalog {
    pub fn global() -> &'static NoteCatalog {
        &CATALOG
    }

    fn build() -> Self {
        let mut notes = BTreeMap::new();
        let mut top = Vec::new();
        let mut middle = Vec::new();
        let mut base = Vec::new();
        for (id, season, role) in NOTES {
            notes.insert(id, Note { id, season, role });
            match role {
                NoteRole::Top => top.push(id),
                NoteRole::Middle => middle.push(id),
                NoteRole::Base => base.push(id),
            }
        }

        let mut sorted: Vec<&'static str> = notes.keys().copied().collect();
        sorted.sort_by(|a, b| compare_notes(&notes[a], &notes[b]));

        Self {
            notes,
            sorted,
            top,
            middle,
            base,
        }
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notes.contains_key(id)
    }

    pub fn season_of(&self, id: &str) -> Result<Season, CatalogError> {
        self.note(id)
            .map(|note| note.season)
            .ok_or_else(|| CatalogError::UnknownNote(id.to_string()))
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Season rank first, then id. Every radial layout slots notes in this order.
    pub fn sorted_order(&self) -> &[&'static str] {
        &self.sorted
    }

    pub fn role_notes(&self, role: NoteRole) -> &[&'static str] {
        match role {
            NoteRole::Top => &self.top,
            NoteRole::Middle => &self.middle,
            NoteRole::Base => &self.base,
        }
    }
}

fn compare_notes(a: &Note, b: &Note) -> Ordering {
    a.season
        .rank()
        .cmp(&b.season.rank())
        .then_with(|| a.id.cmp(b.id))
}
