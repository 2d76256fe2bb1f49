//! `PageFetcher` over `window.fetch`

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::network_error;
use crate::error::{NavigationError, Result};
use crate::page::PageFetcher;

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchPageFetcher;

#[async_trait(?Send)]
impl PageFetcher for FetchPageFetcher {
    async fn fetch(&self, path: &str) -> Result<String> {
        let window =
            web_sys::window().ok_or_else(|| NavigationError::Network("no window".to_string()))?;

        let response: Response = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| network_error(&e))?
            .dyn_into()
            .map_err(|_| NavigationError::Network("fetch did not return a Response".to_string()))?;

        if !response.ok() {
            return Err(NavigationError::Status {
                path: path.to_string(),
                status: response.status(),
            });
        }

        let text = response.text().map_err(|e| network_error(&e))?;
        JsFuture::from(text)
            .await
            .map_err(|e| network_error(&e))?
            .as_string()
            .ok_or_else(|| NavigationError::Network("response body is not text".to_string()))
    }
}
