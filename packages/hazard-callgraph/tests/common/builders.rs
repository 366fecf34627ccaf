//! Test data builders

use std::path::Path;

use hazard_callgraph::shared::{
    CallEdge, Expression, FieldCsu, FieldDescriptor, TypeDescriptor, TypeList, VariableRef,
};
use hazard_storage::SqliteKeyedDatabase;

/// Write `(key, record)` pairs into a fresh SQLite keyed database
pub fn write_database(path: &Path, records: &[(&str, &str)]) {
    let mut db = SqliteKeyedDatabase::create(path).unwrap();
    for (key, record) in records {
        db.insert(key, record).unwrap();
    }
}

fn variable(kind: &str, name: &str) -> Expression {
    Expression::var(VariableRef {
        kind: Some(kind.to_string()),
        name: vec![name.to_string()],
    })
}

pub fn func(name: &str) -> Expression {
    variable("Func", name)
}

pub fn local(name: &str) -> Expression {
    variable("Local", name)
}

pub fn this() -> Expression {
    variable("This", "this")
}

/// Instance method `name` declared by `csu` taking `arity` ints
pub fn method_field(csu: &str, name: &str, arity: usize) -> FieldDescriptor {
    FieldDescriptor {
        name: vec![name.to_string(), format!("{}::{}", csu, name)],
        field_csu: FieldCsu {
            ty: TypeDescriptor::csu(csu),
        },
        ty: Some(TypeDescriptor {
            kind: "Function".to_string(),
            name: None,
            inner: None,
            arguments: Some(TypeList {
                types: (0..arity)
                    .map(|_| TypeDescriptor {
                        kind: "Int".to_string(),
                        name: None,
                        inner: None,
                        arguments: None,
                    })
                    .collect(),
            }),
        }),
        instance_function: true,
        annotations: vec![],
    }
}

/// `this->field(..)` where `this` has static type `static_csu*`
pub fn method_call(static_csu: &str, field: FieldDescriptor) -> CallEdge {
    CallEdge::call(Expression::deref(Expression::field(field, this()))).with_instance(
        this(),
        Some(TypeDescriptor::pointer_to(TypeDescriptor::csu(static_csu))),
    )
}

pub fn direct_call(name: &str) -> CallEdge {
    CallEdge::call(func(name))
}
