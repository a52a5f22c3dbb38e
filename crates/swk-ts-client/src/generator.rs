use std::fs;

use swk_core::config::ClientConfig;
use swk_core::render_model::{RenderModel, Variant};
use swk_core::{CodeGenerator, GeneratedCode};

use crate::emitters::api::emit_api;
use crate::error::RenderError;

/// Options for the emitted modules.
#[derive(Debug, Clone)]
pub struct TsClientConfig {
    /// Import line that brings `request` into scope.
    pub request_import: String,
    pub no_jsdoc: bool,
    /// Source of a project template rendered in place of the built-in one.
    pub template: Option<String>,
}

impl Default for TsClientConfig {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

/// Carries the inline options only; `client.template` is read by
/// [`TsClientConfig::load`].
impl From<&ClientConfig> for TsClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            request_import: config.request_import.clone(),
            no_jsdoc: config.no_jsdoc,
            template: None,
        }
    }
}

impl TsClientConfig {
    /// Build from project config, reading the template file if one is set.
    pub fn load(config: &ClientConfig) -> Result<Self, RenderError> {
        let mut loaded = Self::from(config);
        if let Some(path) = &config.template {
            let source =
                fs::read_to_string(path).map_err(|source| RenderError::ReadTemplate {
                    path: path.display().to_string(),
                    source,
                })?;
            log::debug!("using client template {}", path.display());
            loaded.template = Some(source);
        }
        Ok(loaded)
    }
}

/// TypeScript (typed) and JavaScript (untyped) client generator.
pub struct TsClientGenerator;

impl CodeGenerator for TsClientGenerator {
    type Config = TsClientConfig;
    type Error = RenderError;

    fn generate(
        &self,
        model: &RenderModel,
        config: &TsClientConfig,
    ) -> Result<GeneratedCode, RenderError> {
        log::debug!("rendering client module for {}", model.name);
        Ok(GeneratedCode {
            typed: emit_api(model, Variant::Typed, config)?,
            untyped: emit_api(model, Variant::Untyped, config)?,
        })
    }
}
