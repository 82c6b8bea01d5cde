//! Declarative entity models.
//!
//! Models are `static` declarations written once per entity kind and handed
//! to the registry at startup. They describe *what exists*; the registry's
//! classification table is what the exporters actually run against.
pub mod computed;
pub mod entity;
pub mod field;
pub mod policy;

pub use computed::{AttrContext, ComputeFn, ComputedAttr};
pub use entity::EntityModel;
pub use field::{FieldKind, FieldModel};
pub use policy::{ExportPolicy, MaxDepth};
