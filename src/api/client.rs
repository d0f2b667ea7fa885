use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::layout::Layout;

use super::endpoints::{layout_path, GENERATE_DESIGN_PATH, MY_DESIGNS_PATH, RECENT_DESIGNS_PATH};
use super::payloads::ErrorBody;
use super::{
    ApiRequest, ApiResponse, Clock, DesignListing, DesignSummary, GenerateDesignRequest,
    GenerateDesignResponse, SessionStore, Transport,
};

/// Warning attached to a generated design whose layout could not be loaded.
pub const LAYOUT_WARNING: &str = "Could not load 3D layout.";

const BLANK_PROMPT: &str = "Please enter a prompt to generate design.";
const DEFAULT_MESSAGE: &str = "Design generated successfully";
const GENERATE_FAILED: &str = "Could not generate design.";

/// Result of a design generation round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDesign {
    pub prompt: String,
    pub message: String,
    pub image: Option<String>,
    pub scene_id: Option<String>,
    /// Present when the follow-up layout fetch succeeded.
    pub layout: Option<Layout>,
    pub warning: Option<&'static str>,
}

/// Synchronous client for the design service.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches the room layout generated for `scene_id`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for a non-2xx reply and `ApiError::Layout`
    /// if the body is not a valid layout array.
    pub fn fetch_layout(&self, scene_id: &str) -> Result<Layout, ApiError> {
        let path = layout_path(scene_id);
        let response = self.send(&ApiRequest::get(&path))?;
        if !response.is_success() {
            return Err(status_error(&path, &response, "Failed to fetch layout JSON"));
        }
        let layout = Layout::from_json(&response.body)?;
        info!(scene_id, rooms = layout.len(), "loaded layout");
        Ok(layout)
    }

    /// Submits a prompt and, when the reply names a scene, loads its layout.
    ///
    /// A failed layout fetch does not fail the call; the result carries
    /// [`LAYOUT_WARNING`] instead of a layout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` for a blank prompt (nothing is
    /// sent), `ApiError::Status` with the service's `error` text for a
    /// non-2xx reply, and `ApiError::Malformed` for an unreadable reply.
    pub fn generate_design(&self, prompt: &str) -> Result<GeneratedDesign, ApiError> {
        if prompt.trim().is_empty() {
            return Err(ApiError::InvalidRequest(BLANK_PROMPT.to_owned()));
        }
        let body = serde_json::to_string(&GenerateDesignRequest {
            prompt: prompt.to_owned(),
        })
        .map_err(|source| ApiError::Malformed {
            path: GENERATE_DESIGN_PATH.to_owned(),
            source,
        })?;
        let response = self.send(&ApiRequest::post(GENERATE_DESIGN_PATH, body))?;
        if !response.is_success() {
            return Err(status_error(GENERATE_DESIGN_PATH, &response, GENERATE_FAILED));
        }
        let reply: GenerateDesignResponse = parse(GENERATE_DESIGN_PATH, &response)?;

        let mut layout = None;
        let mut warning = None;
        if let Some(scene_id) = reply.scene_id.as_deref() {
            match self.fetch_layout(scene_id) {
                Ok(loaded) => layout = Some(loaded),
                Err(err) => {
                    warn!(scene_id, error = %err, "layout fetch after generation failed");
                    warning = Some(LAYOUT_WARNING);
                }
            }
        }

        Ok(GeneratedDesign {
            prompt: prompt.to_owned(),
            message: reply
                .message
                .clone()
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_owned()),
            image: reply.image().map(str::to_owned),
            scene_id: reply.scene_id,
            layout,
            warning,
        })
    }

    /// Lists the most recent public designs.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` or `ApiError::Malformed` on failure.
    pub fn recent_designs(&self) -> Result<Vec<DesignSummary>, ApiError> {
        self.listing(ApiRequest::get(RECENT_DESIGNS_PATH))
    }

    /// Lists the signed-in user's designs.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without sending anything when the
    /// session is missing or expired, otherwise as
    /// [`ApiClient::recent_designs`].
    pub fn my_designs<C: Clock>(
        &self,
        sessions: &SessionStore<C>,
    ) -> Result<Vec<DesignSummary>, ApiError> {
        let token = sessions.token().ok_or(ApiError::Unauthenticated)?;
        self.listing(ApiRequest::get(MY_DESIGNS_PATH).with_bearer(token))
    }

    fn listing(&self, request: ApiRequest) -> Result<Vec<DesignSummary>, ApiError> {
        let response = self.send(&request)?;
        if !response.is_success() {
            return Err(status_error(&request.path, &response, "Failed to fetch designs"));
        }
        let listing: DesignListing = parse(&request.path, &response)?;
        Ok(listing.designs)
    }

    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport.send(request).inspect_err(|err| {
            warn!(path = %request.path, error = %err, "request failed");
        })
    }
}

fn parse<D: DeserializeOwned>(path: &str, response: &ApiResponse) -> Result<D, ApiError> {
    serde_json::from_str(&response.body).map_err(|source| ApiError::Malformed {
        path: path.to_owned(),
        source,
    })
}

fn status_error(path: &str, response: &ApiResponse, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| fallback.to_owned());
    warn!(path, status = response.status, %message, "service returned an error");
    ApiError::Status {
        path: path.to_owned(),
        status: response.status,
        message,
    }
}
