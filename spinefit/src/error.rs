use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid zoom range: min {min} must be positive, finite and <= max {max}")]
    InvalidZoomRange { min: f32, max: f32 },

    #[error("invalid padding ratio: {value} (expected a positive finite value)")]
    InvalidPaddingRatio { value: f32 },

    #[error("invalid viewport size: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("invalid default bounds: [{min_x}, {min_y}] .. [{max_x}, {max_y}]")]
    InvalidDefaultBounds {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },

    #[error("invalid watchdog grace window: {grace_ms}ms")]
    InvalidGraceWindow { grace_ms: f64 },

    #[error("unknown instance: {id}")]
    UnknownInstance { id: u32 },

    #[error("unknown model: {name}")]
    UnknownModel { name: String },

    #[cfg(feature = "json")]
    #[error("failed to parse model catalog: {message}")]
    CatalogParse { message: String },

    #[cfg(feature = "json")]
    #[error("unsupported model catalog version: {version}")]
    UnsupportedCatalogVersion { version: u32 },

    #[cfg(feature = "json")]
    #[error("duplicate model '{name}' in catalog")]
    DuplicateModel { name: String },

    #[cfg(feature = "json")]
    #[error("failed to parse fit config: {message}")]
    ConfigParse { message: String },
}
