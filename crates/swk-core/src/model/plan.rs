use serde::Serialize;

use super::declarations::{Collector, TypeExpr};
use crate::diagnostics::Diagnostics;
use crate::parse::operation::HttpMethod;

/// Everything the analyzer derives for one `(path, method)`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationPlan {
    /// Canonical operation name (`listItemsUsingGET` → `listItems`).
    pub name: String,
    pub path: String,
    pub method: HttpMethod,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// `{name}` tokens of the path template, in order.
    pub path_variables: Vec<String>,

    pub path_declarations: Collector,
    pub path_type_name: Option<String>,

    pub query_declarations: Collector,
    pub query_type_name: Option<String>,

    pub body_declarations: Collector,
    pub body_type: Option<TypeExpr>,

    pub response_declarations: Collector,
    pub response_type: Option<TypeExpr>,

    pub diagnostics: Diagnostics,
}

impl OperationPlan {
    /// `summary` and `description`, non-empty ones joined with a comma.
    pub fn comment(&self) -> Option<String> {
        let parts: Vec<&str> = [self.summary.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}
