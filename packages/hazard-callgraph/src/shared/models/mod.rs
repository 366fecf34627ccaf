//! Shared models
//!
//! Serde views of the extraction pass's JSON records. Field names follow the
//! record format (`FunctionField`, `CSUBaseClass`, `PEdge`, ...); anything the
//! engine does not read is ignored while decoding.

pub mod cfg;
pub mod type_entities;

pub use cfg::{BlockId, CallEdge, CallInstance, Expression, FunctionBody};
pub use type_entities::{
    AnnotationEntry, BaseClassRef, CsuDescription, FieldCsu, FieldDescriptor, FunctionFieldEntry,
    TypeDescriptor, TypeList, VariableRef,
};
