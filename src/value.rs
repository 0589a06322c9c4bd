// ABOUTME: Runtime values — Instance and ClassDescriptor representations

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::ast::FunctionDef;

/// A class descriptor: name, optional base, static members, and the
/// method table shared by every instance of the class. Static fields
/// are mutable (`RefCell`) because static member assignment writes
/// through the descriptor itself, not through any one instance.
#[derive(Debug)]
pub struct ClassDescriptor {
    pub name: String,
    pub base: Option<String>,
    pub static_fields: RefCell<HashMap<String, Value>>,
    pub static_methods: HashMap<String, Rc<FunctionDef>>,
    pub private_static_fields: HashSet<String>,
    pub private_static_methods: HashSet<String>,
    /// Instance fields/methods flattened over the MRO (root to leaf),
    /// shared by every instance created from this descriptor.
    pub instance_fields_init: Vec<(String, Option<crate::ast::Expr>, bool)>,
    pub instance_methods: Rc<HashMap<String, Rc<FunctionDef>>>,
    pub private_fields: HashSet<String>,
    pub private_methods: HashSet<String>,
}

/// A fixed record, not a heterogeneous map: class tag, field table,
/// the set of field names that are private, and a shared pointer to
/// the method table built once at class-registration time.
#[derive(Debug)]
pub struct InstanceData {
    pub class_name: String,
    pub fields: HashMap<String, Value>,
    pub private_fields: HashSet<String>,
    pub private_methods: HashSet<String>,
    pub methods: Rc<HashMap<String, Rc<FunctionDef>>>,
}

/// Instances are reference-like: cloning an `Instance` aliases the
/// same underlying record, so two variables holding the same instance
/// observe each other's mutations.
#[derive(Debug, Clone)]
pub struct Instance(pub Rc<RefCell<InstanceData>>);

impl Instance {
    pub fn new(data: InstanceData) -> Self {
        Instance(Rc::new(RefCell::new(data)))
    }

    /// Identity comparison — used by the private-access check, which
    /// asks "is the current `this` *this very instance*", not
    /// "an instance with equal fields".
    pub fn is_same(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Str(String),
    Array(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<Vec<(String, Value)>>>),
    Class(Rc<ClassDescriptor>),
    Instance(Instance),
    Method { instance: Instance, def: Rc<FunctionDef> },
    StaticMethod { class: Rc<ClassDescriptor>, def: Rc<FunctionDef> },
}

impl PartialEq for ClassDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn map(entries: Vec<(String, Value)>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    /// Standard truthiness: null, false, 0, 0.0, and empty string are
    /// false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Map(_) | Value::Class(_) | Value::Instance(_) => true,
            Value::Method { .. } | Value::StaticMethod { .. } => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Str(_) => "str",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::Method { .. } => "method",
            Value::StaticMethod { .. } => "method",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Null => write!(f, "null"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Class(c) => write!(f, "<class {}>", c.name),
            Value::Instance(inst) => write!(f, "<instance {}>", inst.0.borrow().class_name),
            Value::Method { def, .. } => write!(f, "<method {}>", def.name),
            Value::StaticMethod { def, .. } => write!(f, "<static method {}>", def.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_spec() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(Value::Int(1).is_truthy());
        assert!(Value::Str("x".to_string()).is_truthy());
    }

    #[test]
    fn display_formats_bools_as_python_style_capitalized() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
    }

    #[test]
    fn display_null_is_literal_null() {
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn instances_alias_by_identity() {
        let data = InstanceData {
            class_name: "P".to_string(),
            fields: HashMap::new(),
            private_fields: HashSet::new(),
            private_methods: HashSet::new(),
            methods: Rc::new(HashMap::new()),
        };
        let a = Instance::new(data);
        let b = a.clone();
        assert!(a.is_same(&b));

        let other_data = InstanceData {
            class_name: "P".to_string(),
            fields: HashMap::new(),
            private_fields: HashSet::new(),
            private_methods: HashSet::new(),
            methods: Rc::new(HashMap::new()),
        };
        let c = Instance::new(other_data);
        assert!(!a.is_same(&c));
    }

    #[test]
    fn arrays_alias_on_clone_so_mutation_is_observed() {
        let arr = Value::array(vec![Value::Int(1)]);
        let arr2 = arr.clone();
        if let Value::Array(cell) = &arr {
            cell.borrow_mut().push(Value::Int(2));
        }
        if let Value::Array(cell2) = &arr2 {
            assert_eq!(cell2.borrow().len(), 2);
        } else {
            panic!("expected array");
        }
    }
}
