//! Domain records shared by the app and the backend tables
//!
//! Field names follow the database columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::Deserializer;
use uuid::Uuid;

/// Nullable columns arrive as explicit `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub preferred_ai_name: String,
    /// "HH:MM" local time
    pub night_mode_start: String,
    pub night_mode_end: String,
    /// Gentle prompting during conversations
    pub coaxing_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoFolder {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub folder_id: i64,
    #[serde(default)]
    pub user_id_uuid: Option<i64>,
    #[serde(default)]
    pub user_id_bigint: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub id_uuid: Option<Uuid>,
    /// Resolved URL of the image file
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_hidden: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Photo {
    /// Owning account, preferring `user_id` over the older numeric columns
    pub fn owner_id(&self) -> Option<i64> {
        self.user_id.or(self.user_id_bigint).or(self.user_id_uuid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderId {
    OpenAi,
    Gemini,
    Anthropic,
    Grok,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiProvider {
    pub id: AiProviderId,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub is_configured: bool,
    pub is_valid: bool,
    #[serde(default)]
    pub last_validated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub command: String,
    pub variations: Vec<String>,
    pub action: String,
    #[serde(default)]
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideshowMode {
    Random,
    Sequential,
    Reverse,
    DateAsc,
    DateDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Fade,
    Slide,
    Zoom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideshowSettings {
    pub mode: SlideshowMode,
    /// Seconds per photo
    pub interval: u32,
    pub folders: Vec<i64>,
    pub transition: Transition,
    pub show_captions: bool,
    pub night_mode_active: bool,
    pub is_playing: bool,
    pub current_index: usize,
    pub volume: f32,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            mode: SlideshowMode::Random,
            interval: 10,
            folders: Vec::new(),
            transition: Transition::Fade,
            show_captions: true,
            night_mode_active: false,
            is_playing: false,
            current_index: 0,
            volume: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoiceActivation {
    PushToTalk,
    WakeWord,
    AlwaysOn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
    Xl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub ai_provider: AiProviderId,
    pub ai_assistant_name: String,
    pub voice_activation: VoiceActivation,
    pub wake_word: String,
    pub night_mode_start: String,
    pub night_mode_end: String,
    pub bedtime_message: String,
    pub font_size: FontSize,
    pub theme: Theme,
    pub high_contrast: bool,
    pub coaxing_mode: bool,
    pub profanity_filter: bool,
    pub emergency_contacts: Vec<String>,
    /// Hidden toggle that unlocks the diagnostics screen
    #[serde(default)]
    pub developer_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ai_provider: AiProviderId::OpenAi,
            ai_assistant_name: "Sunny".to_string(),
            voice_activation: VoiceActivation::WakeWord,
            wake_word: "Hey Sunny".to_string(),
            night_mode_start: "21:00".to_string(),
            night_mode_end: "07:00".to_string(),
            bedtime_message: "Time to rest. Sweet dreams!".to_string(),
            font_size: FontSize::Large,
            theme: Theme::Auto,
            high_contrast: false,
            coaxing_mode: true,
            profanity_filter: true,
            emergency_contacts: Vec::new(),
            developer_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Distress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioRecording {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(default)]
    pub photo_id: Option<i64>,
    pub transcript: String,
    pub audio_url: String,
    /// Seconds
    pub duration: f64,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    pub created_at: DateTime<Utc>,
}
