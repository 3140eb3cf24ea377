//! Core record types for kitchensync.
//!
//! This module defines the recipe record entity, its identifiers, and the
//! draft type that user input passes through before a record is constructed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a recipe record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub Uuid);

impl RecipeId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of the user that owns a record.
///
/// Supplied by the external identity provider; treated as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

impl OwnerId {
    /// Wrap an identity-provider user id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Meal category of a recipe.
///
/// Serialized with capitalized names to match the remote document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    #[default]
    Dinner,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakfast => write!(f, "Breakfast"),
            Self::Lunch => write!(f, "Lunch"),
            Self::Dinner => write!(f, "Dinner"),
        }
    }
}

/// A draft field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// The display name.
    Name,
    /// The ingredient list.
    Ingredients,
    /// The preparation steps.
    Steps,
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Ingredients => write!(f, "ingredients"),
            Self::Steps => write!(f, "steps"),
        }
    }
}

/// User-supplied recipe fields, before identity assignment.
///
/// A draft carries no id, owner, or timestamp; those are assigned when the
/// record is constructed. Drafts are normalized (whitespace trimmed, blank
/// entries dropped) before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    /// Display name.
    pub name: String,
    /// Meal category.
    pub category: Category,
    /// Ingredient lines.
    pub ingredients: Vec<String>,
    /// Preparation steps.
    pub steps: Vec<String>,
}

impl RecipeDraft {
    /// Create a draft from raw field values.
    #[must_use]
    pub fn new(
        name: String,
        category: Category,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            name,
            category,
            ingredients,
            steps,
        }
    }

    /// Return a copy with surrounding whitespace trimmed and blank list
    /// entries removed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            category: self.category,
            ingredients: normalize_entries(&self.ingredients),
            steps: normalize_entries(&self.steps),
        }
    }

    /// The first field that fails validation, if any.
    ///
    /// Checks the fields as-is; callers normalize first.
    #[must_use]
    pub fn missing_field(&self) -> Option<DraftField> {
        if self.name.trim().is_empty() {
            return Some(DraftField::Name);
        }
        if !self.ingredients.iter().any(|entry| !entry.trim().is_empty()) {
            return Some(DraftField::Ingredients);
        }
        if !self.steps.iter().any(|entry| !entry.trim().is_empty()) {
            return Some(DraftField::Steps);
        }
        None
    }

    /// True iff the draft has a non-blank name and at least one non-blank
    /// ingredient and step.
    #[must_use]
    pub fn is_valid_for_persistence(&self) -> bool {
        self.missing_field().is_none()
    }
}

fn normalize_entries(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// A single persisted recipe record.
///
/// Immutable once created: identity, owner, and creation time are assigned
/// at construction and never change, and no edit operation exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique record identifier, assigned at creation.
    pub id: RecipeId,

    /// Owning user, assigned from the authenticated identity at creation.
    #[serde(rename = "userId")]
    pub owner_id: OwnerId,

    /// Display name.
    pub name: String,

    /// Meal category.
    pub category: Category,

    /// Ingredient lines, in order.
    pub ingredients: Vec<String>,

    /// Preparation steps, in order.
    pub steps: Vec<String>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Construct a record from a draft, assigning a fresh id and the current
    /// time. The owner must be known; there is no ownerless record.
    ///
    /// The draft should already be normalized and validated; construction
    /// does not re-check it.
    #[must_use]
    pub fn new(owner: OwnerId, draft: RecipeDraft) -> Self {
        Self {
            id: RecipeId::new(),
            owner_id: owner,
            name: draft.name,
            category: draft.category,
            ingredients: draft.ingredients,
            steps: draft.steps,
            created_at: Utc::now(),
        }
    }

    /// True iff the record still satisfies the persistence validity rules.
    #[must_use]
    pub fn is_valid_for_persistence(&self) -> bool {
        !self.name.trim().is_empty()
            && self.ingredients.iter().any(|entry| !entry.trim().is_empty())
            && self.steps.iter().any(|entry| !entry.trim().is_empty())
    }

    /// Collection ordering: newest first, ties broken by id ascending.
    #[must_use]
    pub fn cmp_newest_first(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    }
}
