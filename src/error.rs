use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML scene: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML scene: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON scene: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot tell the scene format of {0}; use .toml, .yaml, .yml or .json")]
    UnknownFormat(String),

    #[error("unsupported output format '{0}'; use .svg, .png or .pdf")]
    UnsupportedOutput(String),

    #[error("failed to parse generated SVG: {0}")]
    Svg(String),

    #[error("failed to convert SVG to PDF: {0}")]
    Pdf(String),

    #[error("failed to rasterize: {0}")]
    Raster(String),

    #[error("invalid PNG scale {0}; expected a finite value greater than 0")]
    InvalidScale(f32),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
