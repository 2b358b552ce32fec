use serde::{Deserialize, Serialize};

use crate::fetch::{ResourceClient, ResourceRequest};

/// Contents of `version.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionMarker {
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub data_version: String,
}

/// Reads the remote version marker, bypassing every cache.
///
/// Best-effort: any failure, or a marker with an empty `dataVersion`, yields
/// `None` and means "no remote version signal".
pub async fn probe_version<C: ResourceClient + ?Sized>(
    client: &C,
    url: &str,
    cache_buster: &str,
) -> Option<VersionMarker> {
    let request = ResourceRequest::get(url)
        .with_query("v", cache_buster)
        .revalidate();

    let response = match client.get(&request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, "Version probe failed");
            return None;
        }
    };
    if !response.is_success() {
        tracing::debug!(status = response.status, "Version probe returned error status");
        return None;
    }

    match serde_json::from_slice::<VersionMarker>(&response.body) {
        Ok(marker) if !marker.data_version.trim().is_empty() => Some(VersionMarker {
            app_version: marker.app_version.trim().to_string(),
            data_version: marker.data_version.trim().to_string(),
        }),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "Version marker is not valid JSON");
            None
        }
    }
}
