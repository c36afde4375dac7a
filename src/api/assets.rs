//! Bundled web assets

/// Gzip-compressed file served at a fixed path
#[derive(Debug, Clone, Copy)]
pub struct WebAsset {
    pub path: &'static str,
    pub mime_type: &'static str,
    pub data: &'static [u8],
}

/// Find the asset for a request path.
///
/// The root path serves `/index.html`.
pub fn find_asset(assets: &'static [WebAsset], path: &str) -> Option<&'static WebAsset> {
    let target = if path == "/" { "/index.html" } else { path };
    assets.iter().find(|asset| asset.path == target)
}
