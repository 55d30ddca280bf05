use std::fmt;

use serde::{Deserialize, Serialize};

use crate::presentation::MetadataUpdate;

/// Stable identifier of a playable entry. Never reused within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One selectable media entry, built once from page markup and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayableItem {
    pub id: ItemId,
    pub audio_source: String,
    #[serde(default)]
    pub display_image: Option<String>,
    pub display_title: String,
    #[serde(default)]
    pub display_artist: String,
}

impl PlayableItem {
    pub fn new(
        id: impl Into<ItemId>,
        audio_source: impl Into<String>,
        display_title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            audio_source: audio_source.into(),
            display_image: None,
            display_title: display_title.into(),
            display_artist: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.display_image = Some(image.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.display_artist = artist.into();
        self
    }

    /// Metadata shown while the item is the active one.
    pub fn now_playing(&self) -> MetadataUpdate {
        MetadataUpdate {
            image: self.display_image.clone(),
            title: Some(self.display_title.clone()),
            artist: Some(self.display_artist.clone()),
        }
    }

    /// Hover previews only swap art and title; the artist line is left as is.
    pub fn preview(&self) -> MetadataUpdate {
        MetadataUpdate {
            image: self.display_image.clone(),
            title: Some(self.display_title.clone()),
            artist: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_leaves_artist_untouched() {
        let item = PlayableItem::new("a", "a.mp3", "Alpha")
            .with_image("a.jpg")
            .with_artist("Band");

        let preview = item.preview();
        assert_eq!(preview.title.as_deref(), Some("Alpha"));
        assert_eq!(preview.image.as_deref(), Some("a.jpg"));
        assert!(preview.artist.is_none());

        assert_eq!(item.now_playing().artist.as_deref(), Some("Band"));
    }

    #[test]
    fn deserializes_with_optional_fields_missing() {
        let item: PlayableItem = serde_json::from_str(
            r#"{ "id": "b", "audio_source": "b.mp3", "display_title": "Beta" }"#,
        )
        .unwrap();

        assert_eq!(item.id, ItemId::from("b"));
        assert!(item.display_image.is_none());
        assert!(item.display_artist.is_empty());
    }
}
