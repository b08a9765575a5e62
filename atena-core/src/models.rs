use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type DeckId = Uuid;
pub type CardId = Uuid;

/// Streak at which a card counts as mastered.
pub const MASTERY_STREAK: u32 = 5;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// Review outcome on the 1..=5 scale. 4 and 5 grow the streak, 1 and 2
/// shrink it, 3 leaves it alone.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
    Perfect,
}

impl Rating {
    pub fn as_score(&self) -> u8 {
        match self {
            Rating::Again => 1,
            Rating::Hard => 2,
            Rating::Good => 3,
            Rating::Easy => 4,
            Rating::Perfect => 5,
        }
    }

    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            5 => Some(Rating::Perfect),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Flashcard {
    pub id: CardId,
    pub front: String,
    pub back: String,
    pub difficulty: Difficulty,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub streak: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>, difficulty: Difficulty) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            difficulty,
            last_reviewed: None,
            next_review: None,
            streak: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_mastered(&self) -> bool {
        self.streak >= MASTERY_STREAK
    }

    /// Due when never scheduled, or when the next review falls on or before
    /// `today`. Date-only comparison on the local calendar; time of day is
    /// ignored.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        match self.next_review {
            None => true,
            Some(at) => at.with_timezone(&Local).date_naive() <= today,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    pub id: DeckId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub cards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    /// Title validation is the caller's contract; an empty title is accepted
    /// here, matching the permissive store API.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn card(&self, id: CardId) -> Option<&Flashcard> {
        self.cards.iter().find(|c| c.id == id)
    }
}
