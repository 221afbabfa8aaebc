use toolshelf_core::catalogue::ToolId;

#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("No tool with id {0}")]
    ToolNotFound(ToolId),

    #[error("Tool {0} has no external link")]
    NoTryLink(ToolId),

    #[error("Invalid tool id: {0}")]
    InvalidToolId(String),

    #[error("No program found to open links")]
    NoOpener,
}
