//! Function body and call edge shapes
//!
//! Only the call-relevant subset of a body is decoded: the function it
//! belongs to and its edges. Assignment/assume edges decode too but are
//! skipped by every consumer because their `Kind` is not `"Call"`.

use serde::{Deserialize, Serialize};

use super::type_entities::{FieldDescriptor, TypeDescriptor, VariableRef};

/// Expression tree node (only the shapes a callee position can take)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Kind")]
pub enum Expression {
    /// Named variable
    Var {
        #[serde(rename = "Variable")]
        variable: VariableRef,
    },

    /// Dereference of `exp[0]`
    Drf {
        #[serde(rename = "Exp", default)]
        exp: Vec<Expression>,
    },

    /// Field access `exp[0].field`
    Fld {
        #[serde(rename = "Field")]
        field: FieldDescriptor,
        #[serde(rename = "Exp", default)]
        exp: Vec<Expression>,
    },

    /// Integer constant
    Int {
        #[serde(rename = "String", default)]
        value: Option<String>,
    },

    /// Any other node kind (casts, indexing, binops, ...)
    #[serde(other)]
    Other,
}

impl Expression {
    pub fn var(variable: VariableRef) -> Self {
        Expression::Var { variable }
    }

    pub fn deref(inner: Expression) -> Self {
        Expression::Drf { exp: vec![inner] }
    }

    pub fn field(field: FieldDescriptor, base: Expression) -> Self {
        Expression::Fld {
            field,
            exp: vec![base],
        }
    }

    /// First operand of a `Drf`/`Fld` node
    pub fn operand(&self) -> Option<&Expression> {
        match self {
            Expression::Drf { exp } | Expression::Fld { exp, .. } => exp.first(),
            _ => None,
        }
    }
}

/// The object a method call is invoked on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallInstance {
    #[serde(rename = "Exp")]
    pub exp: Expression,

    /// Static type of the instance expression at this call site
    #[serde(rename = "Type", default)]
    pub ty: Option<TypeDescriptor>,
}

/// One edge of a function body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    /// `Call`, `Assign`, `Assume`, `Loop`, ...
    #[serde(rename = "Kind")]
    pub kind: String,

    /// `[source point, target point]`
    #[serde(rename = "Index", default)]
    pub index: Vec<u32>,

    /// For calls, `exp[0]` is the callee expression
    #[serde(rename = "Exp", default)]
    pub exp: Vec<Expression>,

    #[serde(rename = "PEdgeCallInstance", default)]
    pub call_instance: Option<CallInstance>,
}

impl CallEdge {
    /// A call edge with the given callee expression
    pub fn call(callee: Expression) -> Self {
        Self {
            kind: "Call".to_string(),
            index: Vec::new(),
            exp: vec![callee],
            call_instance: None,
        }
    }

    pub fn with_instance(mut self, exp: Expression, ty: Option<TypeDescriptor>) -> Self {
        self.call_instance = Some(CallInstance { exp, ty });
        self
    }

    pub fn is_call(&self) -> bool {
        self.kind == "Call"
    }

    pub fn callee(&self) -> Option<&Expression> {
        self.exp.first()
    }
}

/// `{"Kind": "Function", "Variable": {...}, "Loop": "loop#0"?}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockId {
    #[serde(rename = "Kind", default)]
    pub kind: Option<String>,

    #[serde(rename = "Variable", default)]
    pub variable: Option<VariableRef>,

    /// Set on loop bodies split out of the function body
    #[serde(rename = "Loop", default)]
    pub loop_name: Option<String>,
}

/// One function body (or one loop body of a function)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionBody {
    #[serde(rename = "BlockId")]
    pub block_id: BlockId,

    #[serde(rename = "PEdge", default)]
    pub edges: Vec<CallEdge>,
}

impl FunctionBody {
    pub fn new(function_name: impl Into<String>, edges: Vec<CallEdge>) -> Self {
        Self {
            block_id: BlockId {
                kind: Some("Function".to_string()),
                variable: Some(VariableRef {
                    kind: Some("Func".to_string()),
                    name: vec![function_name.into()],
                }),
                loop_name: None,
            },
            edges,
        }
    }

    /// Full (`mangled$readable`) name of the function this body belongs to
    pub fn function_name(&self) -> &str {
        self.block_id
            .variable
            .as_ref()
            .map(VariableRef::full_name)
            .unwrap_or("")
    }

    pub fn call_edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.iter().filter(|e| e.is_call())
    }
}
