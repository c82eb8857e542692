//! WMS `GetMap` request-URL composition.
//!
//! A [`WmsSource`] merges a fixed default parameter set with caller
//! overrides (keys are case-insensitive and normalized to lowercase at
//! construction), then appends the per-tile parameters a `GetMap` request
//! needs, skipping any the caller already overrode.

use crate::tiling::GeographicTilingScheme;

/// Transform applied to a finished request URL, typically a proxy rewrite.
pub type UrlTransform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Default `GetMap` parameters, used for every key the caller does not
/// override:
///
/// | key       | value        |
/// |-----------|--------------|
/// | `service` | `WMS`        |
/// | `version` | `1.1.1`      |
/// | `request` | `GetMap`     |
/// | `styles`  | (empty)      |
/// | `format`  | `image/jpeg` |
pub const DEFAULT_PARAMETERS: [(&str, &str); 5] = [
    ("service", "WMS"),
    ("version", "1.1.1"),
    ("request", "GetMap"),
    ("styles", ""),
    ("format", "image/jpeg"),
];

/// A WMS imagery source: base URL, layer list, and parameter overrides.
///
/// Parameter values are joined into the query string as given; callers
/// supply any percent-encoding their server requires.
pub struct WmsSource {
    url: String,
    layers: String,
    tile_width: u32,
    tile_height: u32,
    tiling: GeographicTilingScheme,
    /// Overrides with lowercase keys, in insertion order.
    parameters: Vec<(String, String)>,
    proxy: Option<UrlTransform>,
}

impl WmsSource {
    /// Create a source for `layers` served at `url`, with 256x256 tiles and
    /// no overrides.
    pub fn new(url: impl Into<String>, layers: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            layers: layers.into(),
            tile_width: 256,
            tile_height: 256,
            tiling: GeographicTilingScheme,
            parameters: Vec::new(),
            proxy: None,
        }
    }

    /// Override or add a request parameter. Keys are case-insensitive.
    pub fn with_parameter(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        let key = key.as_ref().to_ascii_lowercase();
        let value = value.into();
        if let Some(entry) = self.parameters.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.parameters.push((key, value));
        }
        self
    }

    /// Set the requested tile size in pixels.
    pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }

    /// Route finished URLs through a transform (e.g. a proxy rewrite).
    pub fn with_proxy(mut self, proxy: UrlTransform) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Get the tiling scheme used to derive tile bounding boxes.
    pub fn tiling_scheme(&self) -> &GeographicTilingScheme {
        &self.tiling
    }

    fn has_parameter(&self, key: &str) -> bool {
        self.parameters.iter().any(|(k, _)| k == key)
    }

    /// Build the `GetMap` URL for tile `(x, y)` at `level`.
    ///
    /// Defaults merged with overrides come first (override wins), then
    /// `layers`, `srs`, `bbox`, `width`, and `height` are appended only
    /// when not already overridden, and finally the proxy transform runs.
    pub fn build_request_url(&self, x: u32, y: u32, level: u32) -> String {
        let mut query: Vec<(String, String)> = Vec::new();
        for (key, default_value) in DEFAULT_PARAMETERS {
            let value = self
                .parameters
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| default_value.to_string());
            query.push((key.to_string(), value));
        }
        for (key, value) in &self.parameters {
            if !DEFAULT_PARAMETERS.iter().any(|(k, _)| k == key) {
                query.push((key.clone(), value.clone()));
            }
        }

        if !self.has_parameter("layers") {
            query.push(("layers".to_string(), self.layers.clone()));
        }
        if !self.has_parameter("srs") {
            query.push(("srs".to_string(), "EPSG:4326".to_string()));
        }
        if !self.has_parameter("bbox") {
            let rect = self.tiling.tile_rectangle(x, y, level);
            query.push(("bbox".to_string(), rect.to_bbox()));
        }
        if !self.has_parameter("width") {
            query.push(("width".to_string(), self.tile_width.to_string()));
        }
        if !self.has_parameter("height") {
            query.push(("height".to_string(), self.tile_height.to_string()));
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        let query_string = query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}{}{}", self.url, separator, query_string);

        match &self.proxy {
            Some(proxy) => proxy(&url),
            None => url,
        }
    }
}

impl std::fmt::Debug for WmsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WmsSource")
            .field("url", &self.url)
            .field("layers", &self.layers)
            .field("tile_width", &self.tile_width)
            .field("tile_height", &self.tile_height)
            .field("parameters", &self.parameters)
            .field("proxy", &self.proxy.is_some())
            .finish()
    }
}
