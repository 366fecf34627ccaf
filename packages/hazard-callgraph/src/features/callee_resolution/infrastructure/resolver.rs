//! Callee resolution
//!
//! Maps the callee expression of one call edge to candidate targets:
//!
//! | Callee expression        | Candidates                          |
//! |--------------------------|-------------------------------------|
//! | `f` (function)           | `Direct(f)`                         |
//! | `0`                      | none (deliberate crash)             |
//! | `*fp`, `**fp`            | `Indirect(fp, 1 or 2)`              |
//! | `*(obj.field)`           | `Field(..)` (+ its direct alias)    |
//! | anything else            | `Unknown`                           |
//!
//! Resolution never fails; an unrecognized shape is `Unknown`.

use crate::features::callee_resolution::domain::{CallAttrs, CalleeCandidate, ResolvedCallee};
use crate::features::callee_resolution::ports::EdgePropertiesOracle;
use crate::features::class_hierarchy::field_signature;
use crate::shared::{simplify_variable_name, CallEdge, Expression, FieldDescriptor, FunctionBody};

/// Candidates for one edge, one `Field` per field call
pub fn resolve_callees(edge: &CallEdge) -> Vec<CalleeCandidate> {
    if !edge.is_call() {
        return Vec::new();
    }

    let candidate = match edge.callee() {
        Some(Expression::Var { variable }) if variable.is_function() => {
            CalleeCandidate::direct(variable.full_name())
        }
        Some(Expression::Int { .. }) => return Vec::new(),
        Some(Expression::Drf { exp }) => resolve_dereference(edge, exp.first()),
        _ => CalleeCandidate::Unknown,
    };

    trace_edge!(?candidate, "resolved callee");
    vec![candidate]
}

/// Candidates for one edge with every field call followed by its direct alias
pub fn resolve_callees_flat(edge: &CallEdge) -> Vec<CalleeCandidate> {
    resolve_callees(edge)
        .into_iter()
        .flat_map(CalleeCandidate::flatten)
        .collect()
}

fn resolve_dereference(edge: &CallEdge, operand: Option<&Expression>) -> CalleeCandidate {
    let mut indirection = 1u8;
    let mut base = operand;
    if let Some(Expression::Drf { exp }) = base {
        indirection = 2;
        base = exp.first();
    }

    match base {
        Some(Expression::Var { variable }) => CalleeCandidate::Indirect {
            variable: simplify_variable_name(variable.full_name()),
            indirection,
        },
        Some(Expression::Fld { field, .. }) => CalleeCandidate::Field {
            declaring_csu: field.declaring_csu().to_string(),
            static_csu: field_call_instance_csu(edge, field).to_string(),
            field_name: field.name().to_string(),
            signature: field_signature(field),
            is_virtual: field.is_virtual(),
        },
        _ => CalleeCandidate::Unknown,
    }
}

/// Static CSU of the object a field call goes through at this site
///
/// The instance expression's type (looking through pointers) when it names
/// a CSU, otherwise the field's declaring CSU.
pub fn field_call_instance_csu<'a>(edge: &'a CallEdge, field: &'a FieldDescriptor) -> &'a str {
    edge.call_instance
        .as_ref()
        .and_then(|instance| instance.ty.as_ref())
        .and_then(|ty| ty.pointee_csu_name())
        .unwrap_or_else(|| field.declaring_csu())
}

/// Candidates for one edge with attributes
///
/// Direct callees get `scope | oracle attrs` and are followed by the
/// oracle's extra calls at `scope | extra attrs`. Everything else,
/// including a field call's direct alias, gets `scope`.
pub fn get_callees(
    body: &FunctionBody,
    edge: &CallEdge,
    scope: CallAttrs,
    oracle: &dyn EdgePropertiesOracle,
) -> Vec<ResolvedCallee> {
    let mut callees = Vec::new();

    for candidate in resolve_callees(edge) {
        let Some(name) = candidate.direct_name() else {
            callees.extend(
                candidate
                    .flatten()
                    .into_iter()
                    .map(|c| ResolvedCallee::new(c, scope)),
            );
            continue;
        };

        let properties = oracle.edge_properties(body, edge, name);
        callees.push(ResolvedCallee::new(candidate, scope | properties.attrs));
        for extra in properties.extra_calls {
            callees.push(ResolvedCallee::new(
                CalleeCandidate::direct(extra.name),
                scope | extra.attrs,
            ));
        }
    }

    callees
}
