use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const SETTING_OPTIONS: [&str; 4] = [
    "A bustling futuristic city",
    "An ancient, misty forest",
    "A remote, ice-covered planet",
    "A magical library",
];

pub const THEME_OPTIONS: [&str; 4] = [
    "Fantasy Adventure",
    "Sci-Fi Mystery",
    "Historical Romance",
    "Modern Comedy",
];

/// Approximate story lengths, in words.
pub const LENGTH_OPTIONS: [u16; 4] = [200, 350, 500, 750];
pub const DEFAULT_LENGTH: u16 = 350;

/// The details a user fills in before asking for a story.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub name: String,
    /// Defining personality trait of the main character
    #[serde(rename = "trait")]
    pub personality: String,
    pub hobby: String,
    pub setting: String,
    pub theme: String,
    pub length: u16,
}

impl Default for StoryRequest {
    fn default() -> Self {
        Self {
            name: "Elara".to_string(),
            personality: "Determined".to_string(),
            hobby: "Stargazing".to_string(),
            setting: SETTING_OPTIONS[0].to_string(),
            theme: THEME_OPTIONS[0].to_string(),
            length: DEFAULT_LENGTH,
        }
    }
}

impl StoryRequest {
    /// Checks every field in form order and reports the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            (StoryField::Name, &self.name),
            (StoryField::Personality, &self.personality),
            (StoryField::Hobby, &self.hobby),
            (StoryField::Setting, &self.setting),
            (StoryField::Theme, &self.theme),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }
        if !LENGTH_OPTIONS.contains(&self.length) {
            return Err(ValidationError::UnsupportedLength(self.length));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoryField {
    Name,
    Personality,
    Hobby,
    Setting,
    Theme,
}

impl fmt::Display for StoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoryField::Name => "a name for your main character",
            StoryField::Personality => "a personality trait",
            StoryField::Hobby => "a favorite hobby or interest",
            StoryField::Setting => "a setting",
            StoryField::Theme => "a theme",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter {0}.")]
    MissingField(StoryField),
    #[error("Unsupported story length: {0} words")]
    UnsupportedLength(u16),
}
