// ── Form reconciliation ──
//
// A draft is a fully-populated map from a closed field set to strings.
// The setter never validates; submitting operations call
// `require_complete()` and reset the draft after success or cancel.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::CoreError;
use crate::model::{EntityId, SocialMediaPayload, User, UserPayload};

/// A closed set of form field names.
pub trait FormField:
    Copy + Eq + Hash + fmt::Debug + IntoEnumIterator + AsRef<str> + Send + Sync + 'static
{
}

impl<F> FormField for F where
    F: Copy + Eq + Hash + fmt::Debug + IntoEnumIterator + AsRef<str> + Send + Sync + 'static
{
}

/// Field names of the user create/edit form, spelled as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum UserField {
    FirstName,
    LastName,
    Phone,
    Email,
}

/// Field names of the social-media add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum SocialMediaField {
    Name,
    Url,
}

// ── Form ─────────────────────────────────────────────────────────────

/// Transient, not-yet-persisted field values.
///
/// Every field of `F` is always present; "empty" means an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form<F: FormField> {
    values: IndexMap<F, String>,
}

pub type UserDraft = Form<UserField>;
pub type SocialMediaDraft = Form<SocialMediaField>;

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Self {
            values: F::iter().map(|f| (f, String::new())).collect(),
        }
    }
}

impl<F: FormField> Form<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one field's value.
    pub fn set(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: F) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Reset every field to the empty string.
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    /// Empty fields, in declaration order. Whitespace counts as a value.
    pub fn missing(&self) -> Vec<F> {
        self.values
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(f, _)| *f)
            .collect()
    }

    /// `true` when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    pub fn values(&self) -> impl Iterator<Item = (F, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Fail with [`CoreError::Validation`] unless every field is non-empty.
    pub fn require_complete(&self) -> Result<(), CoreError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation {
                missing: missing.iter().map(|f| f.as_ref().to_owned()).collect(),
            })
        }
    }
}

// ── User draft ───────────────────────────────────────────────────────

impl Form<UserField> {
    /// A draft pre-filled with an existing user's fields.
    pub fn from_user(user: &User) -> Self {
        let mut draft = Self::new();
        draft.set(UserField::FirstName, user.first_name.as_str());
        draft.set(UserField::LastName, user.last_name.as_str());
        draft.set(UserField::Phone, user.phone.as_str());
        draft.set(UserField::Email, user.email.as_str());
        draft
    }

    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            first_name: self.get(UserField::FirstName).to_owned(),
            last_name: self.get(UserField::LastName).to_owned(),
            phone: self.get(UserField::Phone).to_owned(),
            email: self.get(UserField::Email).to_owned(),
        }
    }
}

// ── Social-media draft ───────────────────────────────────────────────

impl Form<SocialMediaField> {
    pub fn to_payload(&self) -> SocialMediaPayload {
        SocialMediaPayload {
            name: self.get(SocialMediaField::Name).to_owned(),
            url: self.get(SocialMediaField::Url).to_owned(),
        }
    }
}

// ── Draft mode ───────────────────────────────────────────────────────

/// What the user draft currently represents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftMode {
    /// Nothing pending.
    #[default]
    Idle,
    /// Unsaved values for a new user.
    Creating,
    /// Unsaved edits for the user with this id.
    Editing(EntityId),
}

impl DraftMode {
    pub fn editing_id(&self) -> Option<&EntityId> {
        match self {
            Self::Editing(id) => Some(id),
            Self::Idle | Self::Creating => None,
        }
    }
}
