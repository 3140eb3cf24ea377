//! Session identity supplied by the external identity provider.

use serde::{Deserialize, Serialize};

use crate::recipe::OwnerId;

/// An authenticated user, as handed to the synchronization core.
///
/// Carries only what the identity provider supplies: a stable user id and
/// the account email. The display name is derived, not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Stable identifier from the identity provider.
    pub user_id: OwnerId,

    /// Account email address.
    pub email: String,
}

impl SessionUser {
    /// Create a session for the given identity.
    pub fn new(user_id: OwnerId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    /// The owner identity records are scoped to.
    #[must_use]
    pub fn owner(&self) -> &OwnerId {
        &self.user_id
    }

    /// Display name derived from the email local-part, capitalized word by
    /// word (`jane.doe@example.com` becomes `Jane.Doe`). An email without a
    /// local part derives an empty name.
    #[must_use]
    pub fn display_name(&self) -> String {
        let local_part = self.email.split('@').next().unwrap_or("");
        capitalize_words(local_part)
    }
}

/// Uppercase the first letter of each word and lowercase the rest; any
/// non-alphanumeric character starts a new word.
fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
