use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("failure accessing game file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure encoding or decoding game file {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
