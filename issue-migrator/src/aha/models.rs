//! Aha! API v1 response models.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReleaseEpicsPage {
    #[serde(default)]
    pub epics: Vec<EpicReference>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct Pagination {
    pub total_pages: u32,
    pub current_page: u32,
}

/// An epic as listed under a release.
#[derive(Debug, Clone, Deserialize)]
pub struct EpicReference {
    /// Reference number such as `PRJ-E-12`.
    pub reference_num: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EpicEnvelope {
    pub epic: AhaEpic,
}

/// A roadmap epic.
#[derive(Debug, Clone, Deserialize)]
pub struct AhaEpic {
    /// Title.
    pub name: String,
    /// HTML body.
    #[serde(default)]
    pub description: AhaDescription,
    /// API URL of the epic.
    #[serde(default)]
    pub resource: String,
    /// Release the epic belongs to.
    #[serde(default)]
    pub release: Option<AhaRelease>,
    /// Features of the epic.
    #[serde(default)]
    pub features: Vec<FeatureReference>,
}

/// Rich-text description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AhaDescription {
    /// HTML body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Release summary.
#[derive(Debug, Clone, Deserialize)]
pub struct AhaRelease {
    /// Release name.
    pub name: String,
}

/// A feature as listed under an epic.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureReference {
    /// Title.
    pub name: String,
    /// API URL of the feature.
    pub resource: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FeatureEnvelope {
    pub feature: AhaFeature,
}

/// A roadmap feature.
#[derive(Debug, Clone, Deserialize)]
pub struct AhaFeature {
    /// Title.
    pub name: String,
    /// HTML body.
    #[serde(default)]
    pub description: AhaDescription,
    /// API URL of the feature.
    #[serde(default)]
    pub resource: String,
}
