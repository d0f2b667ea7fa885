use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateDesignRequest {
    pub prompt: String,
}

/// Reply of the generation endpoint. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateDesignResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub scene_id: Option<String>,
}

impl GenerateDesignResponse {
    /// Prefers `image_url` over `image`.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().or(self.image.as_deref())
    }
}

/// One entry of a design listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub scene_id: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DesignListing {
    #[serde(default)]
    pub designs: Vec<DesignSummary>,
}

/// Error body returned by the service.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn image_url_wins_over_image() {
        let r: GenerateDesignResponse =
            serde_json::from_str(r#"{"image":"b.png","image_url":"a.png"}"#).unwrap();
        assert_eq!(r.image(), Some("a.png"));
        let r: GenerateDesignResponse = serde_json::from_str(r#"{"image":"b.png"}"#).unwrap();
        assert_eq!(r.image(), Some("b.png"));
    }

    #[test]
    fn missing_designs_is_empty() {
        let listing: DesignListing = serde_json::from_str("{}").unwrap();
        assert!(listing.designs.is_empty());
    }
}
