//! Class/struct/union (CSU) record shapes
//!
//! One CSU record looks like:
//!
//! ```text
//! [{
//!   "Name": "Derived",
//!   "CSUBaseClass": [{"Base": "Base"}],
//!   "FunctionField": [{
//!     "Field": [{
//!       "Name": ["foo", "Derived::foo"],
//!       "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Derived"}},
//!       "Type": {"Kind": "Function", "TypeFunctionArguments": {"Type": [..]}},
//!       "FieldInstanceFunction": true,
//!       "Annotation": [{"Name": ["annotate", "Suppress GC"]}]
//!     }],
//!     "Variable": {"Kind": "Func", "Name": ["_ZN7Derived3fooEv$void Derived::foo()", "foo"]}
//!   }]
//! }]
//! ```

use serde::{Deserialize, Serialize};

/// Description of one class, struct or union
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsuDescription {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    /// Virtual (and other function-typed) members, including inherited ones
    #[serde(rename = "FunctionField", default)]
    pub function_fields: Vec<FunctionFieldEntry>,

    /// Immediate base classes
    #[serde(rename = "CSUBaseClass", default)]
    pub base_classes: Vec<BaseClassRef>,
}

/// `{"Base": name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseClassRef {
    #[serde(rename = "Base")]
    pub base: String,
}

/// One `FunctionField` entry: the field plus its defining symbol, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFieldEntry {
    #[serde(rename = "Field", default)]
    pub field: Vec<FieldDescriptor>,

    /// Concrete definition in this CSU
    #[serde(rename = "Variable", default)]
    pub variable: Option<VariableRef>,
}

impl FunctionFieldEntry {
    pub fn field(&self) -> Option<&FieldDescriptor> {
        self.field.first()
    }
}

/// A (function-typed) data member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// `[name, qualified name]`
    #[serde(rename = "Name", default)]
    pub name: Vec<String>,

    /// The CSU that declares this field
    #[serde(rename = "FieldCSU")]
    pub field_csu: FieldCsu,

    #[serde(rename = "Type", default)]
    pub ty: Option<TypeDescriptor>,

    /// Set on member functions invoked with a `this` instance (virtual methods)
    #[serde(rename = "FieldInstanceFunction", default)]
    pub instance_function: bool,

    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<AnnotationEntry>,
}

impl FieldDescriptor {
    /// Unqualified field name (`""` if the record carried none)
    pub fn name(&self) -> &str {
        self.name.first().map(String::as_str).unwrap_or("")
    }

    /// Name of the declaring CSU
    pub fn declaring_csu(&self) -> &str {
        self.field_csu.ty.name.as_deref().unwrap_or("")
    }

    /// Number of declared parameters (0 when the field carries no function type)
    pub fn arity(&self) -> usize {
        self.ty.as_ref().map(TypeDescriptor::arity).unwrap_or(0)
    }

    pub fn is_virtual(&self) -> bool {
        self.instance_function
    }

    /// `(type, value)` annotation pairs
    pub fn annotation_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.annotations
            .iter()
            .map(|a| (a.name.0.as_str(), a.name.1.as_str()))
    }
}

/// `{"Type": {...}}` wrapper around the declaring CSU's type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldCsu {
    #[serde(rename = "Type")]
    pub ty: TypeDescriptor,
}

/// `{"Name": [type, value]}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationEntry {
    #[serde(rename = "Name")]
    pub name: (String, String),
}

/// A type in the extraction pass's type language
///
/// Kept as one struct rather than an enum: the engine only ever asks
/// "which CSU is this (through pointers)?" and "how many parameters?".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// `CSU`, `Pointer`, `Function`, `Int`, `Void`, `Array`, ...
    #[serde(rename = "Kind")]
    pub kind: String,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    /// Pointee / element / return type
    #[serde(rename = "Type", default)]
    pub inner: Option<Box<TypeDescriptor>>,

    #[serde(rename = "TypeFunctionArguments", default)]
    pub arguments: Option<TypeList>,
}

impl TypeDescriptor {
    pub fn csu(name: impl Into<String>) -> Self {
        Self {
            kind: "CSU".to_string(),
            name: Some(name.into()),
            inner: None,
            arguments: None,
        }
    }

    pub fn pointer_to(inner: TypeDescriptor) -> Self {
        Self {
            kind: "Pointer".to_string(),
            name: None,
            inner: Some(Box::new(inner)),
            arguments: None,
        }
    }

    /// CSU name if this type is a CSU
    pub fn csu_name(&self) -> Option<&str> {
        if self.kind == "CSU" {
            self.name.as_deref()
        } else {
            None
        }
    }

    /// CSU name after looking through pointers, references and arrays
    pub fn pointee_csu_name(&self) -> Option<&str> {
        let mut ty = self;
        loop {
            match ty.kind.as_str() {
                "CSU" => return ty.name.as_deref(),
                "Pointer" | "Array" => ty = ty.inner.as_deref()?,
                _ => return None,
            }
        }
    }

    pub fn arity(&self) -> usize {
        self.arguments.as_ref().map(|a| a.types.len()).unwrap_or(0)
    }
}

/// `{"Type": [..]}` argument list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeList {
    #[serde(rename = "Type", default)]
    pub types: Vec<TypeDescriptor>,
}

/// A named variable (function, local, argument, global, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableRef {
    /// `Func`, `Local`, `Arg`, `Glob`, `This`, `Return`, `Temp`
    #[serde(rename = "Kind", default)]
    pub kind: Option<String>,

    /// `[full name, short name]`; full function names are `mangled$readable`
    #[serde(rename = "Name", default)]
    pub name: Vec<String>,
}

impl VariableRef {
    pub fn full_name(&self) -> &str {
        self.name.first().map(String::as_str).unwrap_or("")
    }

    /// True for function symbols (and for records that omit the kind)
    pub fn is_function(&self) -> bool {
        self.kind.as_deref().map_or(true, |k| k == "Func")
    }
}
