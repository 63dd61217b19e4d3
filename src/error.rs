// error.rs — failures the navigator can report

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NavigatorError {
    #[error("view size must be finite and positive, got {width}x{height}")]
    InvalidViewSize { width: f32, height: f32 },

    #[error("field of view bounds must be finite, positive and ordered, got [{min}, {max}] rad")]
    InvalidFovBounds { min: f32, max: f32 },

    #[error("non-finite value for {what}")]
    NonFiniteInput { what: &'static str },

    #[error("scale ratio must be positive, got {ratio}")]
    NonPositiveScale { ratio: f32 },

    #[error("pan sensitivity must be finite and positive, got {value}")]
    InvalidSensitivity { value: f32 },

    #[error("orientation quaternion cannot be normalized: {components:?}")]
    DegenerateOrientation { components: [f32; 4] },

    #[error("failed to read {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
