//! Equipment catalog entries offered on the equipment step.

use serde::{Deserialize, Serialize};

use crate::NOT_SURE;

/// An equipment model as served by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentModel {
    /// Catalog id; becomes the selection value.
    #[serde(rename = "sfid")]
    pub id: String,
    /// Short model code (e.g. `4100`).
    #[serde(rename = "code__c", default)]
    pub code: String,
    /// Display name.
    #[serde(rename = "name__c", default)]
    pub name: String,
    /// One-line description.
    #[serde(rename = "blurb__c", default)]
    pub blurb: String,
    /// Thumbnail image URL.
    #[serde(rename = "image_url__c", default)]
    pub image_url: String,
    /// Optional product video URL.
    #[serde(
        rename = "video_url__c",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub video_url: Option<String>,
    /// Structured video reference from the content service; wins over
    /// `video_url` when it resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoSource>,
}

/// A selectable option on the equipment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentOption {
    /// Value stored in the draft when chosen.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Supporting text.
    pub description: String,
    /// Thumbnail image URL, if any.
    pub thumbnail: Option<String>,
    /// Product video URL, if any.
    pub video: Option<String>,
}

impl EquipmentOption {
    /// Build the option for a catalog model.
    pub fn from_model(model: &EquipmentModel) -> Self {
        Self {
            value: model.id.clone(),
            label: format!("Equipter {}", model.code),
            description: model.blurb.clone(),
            thumbnail: Some(model.image_url.clone()).filter(|s| !s.is_empty()),
            video: model
                .video
                .as_ref()
                .and_then(VideoSource::playable_url)
                .or_else(|| model.video_url.clone().filter(|s| !s.is_empty())),
        }
    }

    /// The synthetic "help me choose" option appended after all models.
    pub fn not_sure() -> Self {
        Self {
            value: NOT_SURE.to_string(),
            label: "Not Sure - Help Me Choose".to_string(),
            description: "Our experts will recommend the best option".to_string(),
            thumbnail: None,
            video: None,
        }
    }

    /// Whether this is the "not sure" option.
    pub fn is_not_sure(&self) -> bool {
        self.value == NOT_SURE
    }
}

/// Where a product video is hosted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "videoType", rename_all = "lowercase")]
pub enum VideoSource {
    /// A direct URL.
    Url {
        /// The URL.
        #[serde(rename = "videoUrl")]
        url: String,
    },
    /// A YouTube video id.
    Youtube {
        /// The YouTube video id.
        #[serde(rename = "videoId")]
        id: String,
    },
    /// A Wistia media id.
    Wistia {
        /// The Wistia media id.
        #[serde(rename = "videoId")]
        id: String,
    },
    /// An uploaded file served from the content CDN.
    File {
        /// The file URL.
        #[serde(rename = "videoFile")]
        url: String,
    },
}

impl VideoSource {
    /// Resolve to a playable URL; `None` when the source is blank.
    pub fn playable_url(&self) -> Option<String> {
        let url = match self {
            Self::Url { url } | Self::File { url } => url.clone(),
            Self::Youtube { id } if !id.is_empty() => {
                format!("https://www.youtube.com/watch?v={id}")
            }
            Self::Wistia { id } if !id.is_empty() => {
                format!("https://fast.wistia.net/embed/iframe/{id}")
            }
            Self::Youtube { .. } | Self::Wistia { .. } => return None,
        };
        Some(url).filter(|u| !u.trim().is_empty())
    }
}
