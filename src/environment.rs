//! Runtime scopes: a Declaration Table merged with live values, plus the
//! lexical parent link used by routine invocations.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::ast::program::{FunctionDef, Procedure, VarDecl};
use crate::diag::GlossaError;
use crate::types::BaseType;
use crate::value::{Array, Slot, Value};

/// A scope: the declared slots at this level, plus a lexical parent.
///
/// Per the language's scoping rules a routine's child scope never closes
/// over its caller's locals — its only parent is the root scope — so the
/// chain is at most two deep in practice, but lookup walks it generically.
pub struct Environment {
    slots: HashMap<SmolStr, Slot>,
    parent: Option<Rc<RefCell<Environment>>>,
    procedures: Rc<HashMap<SmolStr, Procedure>>,
    functions: Rc<HashMap<SmolStr, FunctionDef>>,
}

impl Environment {
    /// Builds the root scope: every global declaration gets its type's
    /// default value (or a default-filled array).
    pub fn new_root(
        globals: &[VarDecl],
        procedures: Rc<HashMap<SmolStr, Procedure>>,
        functions: Rc<HashMap<SmolStr, FunctionDef>>,
    ) -> Self {
        let slots = globals.iter().map(|d| (d.name.clone(), default_slot(d))).collect();
        Self { slots, parent: None, procedures, functions }
    }

    /// Builds a child scope for a routine invocation: one slot per local
    /// declaration (parameters are pushed in by the caller afterwards via
    /// [`Environment::set_scalar`]), parented to `parent`.
    pub fn new_child(locals: &[VarDecl], parent: &Rc<RefCell<Environment>>) -> Self {
        let (procedures, functions) = {
            let root = parent.borrow();
            (Rc::clone(&root.procedures), Rc::clone(&root.functions))
        };
        let slots = locals.iter().map(|d| (d.name.clone(), default_slot(d))).collect();
        Self { slots, parent: Some(Rc::clone(parent)), procedures, functions }
    }

    pub fn declares_locally(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Declares a scalar directly, used to bind a parameter to its
    /// call-by-value argument before the routine body runs.
    pub fn bind_param(&mut self, name: SmolStr, value: Value) {
        self.slots.insert(name, Slot::Scalar(value));
    }

    pub fn get_scalar(&self, name: &str, line: u32) -> Result<Value, GlossaError> {
        if let Some(slot) = self.slots.get(name) {
            return match slot {
                Slot::Scalar(value) => Ok(value.clone()),
                Slot::Array(_) => Err(GlossaError::runtime_at(
                    format!("Η μεταβλητή '{name}' είναι πίνακας και απαιτεί δείκτες"),
                    line,
                )),
            };
        }
        match &self.parent {
            Some(parent) => parent.borrow().get_scalar(name, line),
            None => Err(unknown_identifier(name, line)),
        }
    }

    pub fn set_scalar(&mut self, name: &str, value: Value, line: u32) -> Result<(), GlossaError> {
        if let Some(slot) = self.slots.get_mut(name) {
            return match slot {
                Slot::Scalar(existing) => {
                    *existing = value;
                    Ok(())
                }
                Slot::Array(_) => Err(GlossaError::runtime_at(
                    format!("Η μεταβλητή '{name}' είναι πίνακας και απαιτεί δείκτες"),
                    line,
                )),
            };
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().set_scalar(name, value, line),
            None => Err(unknown_identifier(name, line)),
        }
    }

    /// The declared base type of a scalar, used as the assignment
    /// coercion target. Inferred from the value currently held, which by
    /// the coercion-closure invariant always matches the declared type.
    pub fn scalar_base_type(&self, name: &str, line: u32) -> Result<BaseType, GlossaError> {
        Ok(value_base_type(&self.get_scalar(name, line)?))
    }

    pub fn array_base_type(&self, name: &str, line: u32) -> Result<BaseType, GlossaError> {
        self.with_array(name, line, |arr| arr.base_type())
    }

    pub fn get_array_element(&self, name: &str, indices: &[i64], line: u32) -> Result<Value, GlossaError> {
        self.with_array(name, line, |arr| arr.get(indices).cloned())?
    }

    pub fn set_array_element(
        &mut self,
        name: &str,
        indices: &[i64],
        value: Value,
        line: u32,
    ) -> Result<(), GlossaError> {
        if let Some(slot) = self.slots.get_mut(name) {
            return match slot {
                Slot::Array(arr) => arr.set(indices, value),
                Slot::Scalar(_) => Err(GlossaError::runtime_at(
                    format!("Η μεταβλητή '{name}' δεν είναι πίνακας"),
                    line,
                )),
            };
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().set_array_element(name, indices, value, line),
            None => Err(unknown_identifier(name, line)),
        }
    }

    fn with_array<T>(&self, name: &str, line: u32, f: impl FnOnce(&Array) -> T) -> Result<T, GlossaError> {
        if let Some(slot) = self.slots.get(name) {
            return match slot {
                Slot::Array(arr) => Ok(f(arr)),
                Slot::Scalar(_) => Err(GlossaError::runtime_at(
                    format!("Η μεταβλητή '{name}' δεν είναι πίνακας"),
                    line,
                )),
            };
        }
        match &self.parent {
            Some(parent) => parent.borrow().with_array(name, line, f),
            None => Err(unknown_identifier(name, line)),
        }
    }

    pub fn lookup_procedure(&self, name: &str) -> Option<Procedure> {
        self.procedures.get(name).cloned()
    }

    pub fn lookup_function(&self, name: &str) -> Option<FunctionDef> {
        self.functions.get(name).cloned()
    }
}

/// Walks the parent chain to the outermost scope. A routine's child scope
/// must always parent to the *program* root, never to whichever scope
/// happened to make the call — otherwise a routine called from inside
/// another routine would see its caller's locals through parent fallback.
pub(crate) fn root_ancestor(env: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
    let parent = env.borrow().parent.clone();
    match parent {
        Some(p) => root_ancestor(&p),
        None => Rc::clone(env),
    }
}

fn default_slot(decl: &VarDecl) -> Slot {
    match &decl.dims {
        Some(dims) => Slot::Array(Array::new(dims.clone(), decl.base_type)),
        None => Slot::Scalar(Value::default_for(decl.base_type)),
    }
}

fn value_base_type(value: &Value) -> BaseType {
    match value {
        Value::Integer(_) => BaseType::Integer,
        Value::Real(_) => BaseType::Real,
        Value::Str(_) => BaseType::Char,
        Value::Bool(_) => BaseType::Bool,
    }
}

fn unknown_identifier(name: &str, line: u32) -> GlossaError {
    GlossaError::runtime_at(format!("Άγνωστη μεταβλητή '{name}'"), line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str, base_type: BaseType) -> VarDecl {
        VarDecl { name: name.into(), base_type, dims: None, line: 1 }
    }

    #[test]
    fn root_scope_initialises_defaults() {
        let env = Environment::new_root(
            &[scalar("α", BaseType::Integer), scalar("ονομα", BaseType::Char)],
            Rc::new(HashMap::new()),
            Rc::new(HashMap::new()),
        );
        assert_eq!(env.get_scalar("α", 1).unwrap(), Value::Integer(0));
        assert_eq!(env.get_scalar("ονομα", 1).unwrap(), Value::Str("".into()));
    }

    #[test]
    fn child_scope_falls_back_to_root_for_globals() {
        let root = Rc::new(RefCell::new(Environment::new_root(
            &[scalar("g", BaseType::Integer)],
            Rc::new(HashMap::new()),
            Rc::new(HashMap::new()),
        )));
        root.borrow_mut().set_scalar("g", Value::Integer(9), 1).unwrap();
        let child = Environment::new_child(&[scalar("local", BaseType::Integer)], &root);
        assert_eq!(child.get_scalar("g", 1).unwrap(), Value::Integer(9));
        assert_eq!(child.get_scalar("local", 1).unwrap(), Value::Integer(0));
    }

    #[test]
    fn unknown_name_errors() {
        let env = Environment::new_root(&[], Rc::new(HashMap::new()), Rc::new(HashMap::new()));
        assert!(env.get_scalar("x", 1).is_err());
    }

    #[test]
    fn root_ancestor_walks_past_an_intermediate_child() {
        let root = Rc::new(RefCell::new(Environment::new_root(&[], Rc::new(HashMap::new()), Rc::new(HashMap::new()))));
        let frame_a = Rc::new(RefCell::new(Environment::new_child(&[scalar("a_local", BaseType::Integer)], &root)));
        let frame_b = Rc::new(RefCell::new(Environment::new_child(&[scalar("b_local", BaseType::Integer)], &frame_a)));
        assert!(Rc::ptr_eq(&root_ancestor(&frame_b), &root));
    }

    #[test]
    fn scalar_access_on_array_name_errors() {
        let env = Environment::new_root(
            &[VarDecl { name: "M".into(), base_type: BaseType::Integer, dims: Some(vec![2]), line: 1 }],
            Rc::new(HashMap::new()),
            Rc::new(HashMap::new()),
        );
        assert!(env.get_scalar("M", 1).is_err());
    }
}
