pub mod declarations;
pub mod plan;

pub use declarations::{Collector, FieldDecl, Primitive, TypeDeclaration, TypeExpr};
pub use plan::OperationPlan;
