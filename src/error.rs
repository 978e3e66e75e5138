//! Engine error taxonomy.
//!
//! Stage-chain failures (`EmptyAssetList`, `AssetLoad`) are terminal for the
//! lifecycle and reported through the log sink; the remaining variants are
//! returned to the caller of the offending façade method.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("preload produced an empty asset list")]
    EmptyAssetList,
    #[error("asset '{name}' failed to load: {reason}")]
    AssetLoad { name: String, reason: String },
    #[error("smoothing quality requires the smooth render mode")]
    InvalidMode,
    #[error("keyboard accessed before use_keyboard()")]
    KeyboardNotInitialized,
    #[error("invalid surface dimensions {width}x{height}")]
    Construction { width: u32, height: u32 },
}
