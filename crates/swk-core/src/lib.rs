pub mod config;
pub mod diagnostics;
pub mod error;
pub mod locate;
pub mod mock;
pub mod model;
pub mod naming;
pub mod parse;
pub mod render_model;
pub mod resolve;

use render_model::RenderModel;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Both client flavours for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub typed: String,
    pub untyped: String,
}

impl GeneratedCode {
    /// `<stem>.ts` and `<stem>.js`.
    pub fn into_files(self, stem: &str) -> Vec<GeneratedFile> {
        vec![
            GeneratedFile {
                path: format!("{stem}.ts"),
                content: self.typed,
            },
            GeneratedFile {
                path: format!("{stem}.js"),
                content: self.untyped,
            },
        ]
    }
}

/// Trait for templating backends that turn a render model into source text.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        model: &RenderModel,
        config: &Self::Config,
    ) -> Result<GeneratedCode, Self::Error>;
}
