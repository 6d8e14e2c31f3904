// Asset loading
//
// Resolves and reads the sandbox's two startup assets: the shared crate
// sprite and the status-line font. Both are required; a missing file is
// fatal at startup.

mod loader;

pub use loader::{AssetLoader, AssetType};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("crate.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: crate.png");
    }
}
