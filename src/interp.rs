// ABOUTME: Interpreter — scopes, function/class registries, tree-walking evaluator

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::ast::{ClassDef, Expr, FunctionDef, Stmt};
use crate::env::Environment;
use crate::error::GlamError;
use crate::flow::{prop_err, prop_flow, Flow};
use crate::io::IoAdapter;
use crate::value::{ClassDescriptor, Instance, InstanceData, Value};

/// The current `this` receiver (if any), threaded explicitly through
/// every evaluating call instead of walking a host call stack. A
/// private member is accessible iff the access site's context holds
/// the target instance, or — for private statics — the enclosing
/// static-method's class name matches.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pub current_this: Option<Instance>,
    pub current_static_class: Option<String>,
}

impl EvalContext {
    pub fn none() -> Self {
        EvalContext::default()
    }

    fn with_this(instance: Instance) -> Self {
        EvalContext {
            current_this: Some(instance),
            current_static_class: None,
        }
    }

    fn with_static_class(class_name: String) -> Self {
        EvalContext {
            current_this: None,
            current_static_class: Some(class_name),
        }
    }
}

enum Num {
    Int(i64),
    Float(f64),
}

fn as_num(v: &Value) -> Option<Num> {
    match v {
        Value::Int(n) => Some(Num::Int(*n)),
        Value::Float(n) => Some(Num::Float(*n)),
        _ => None,
    }
}

fn num_as_f64(n: &Num) -> f64 {
    match n {
        Num::Int(i) => *i as f64,
        Num::Float(f) => *f,
    }
}

fn value_eq(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
        _ => l == r,
    }
}

/// Three fields of an `Interpreter`, not process-wide mutable state:
/// the global environment, the free-function registry, and the class
/// registry.
pub struct Interpreter<IO: IoAdapter> {
    pub globals: Rc<Environment>,
    functions: RefCell<HashMap<String, Rc<FunctionDef>>>,
    classes: RefCell<HashMap<String, Rc<ClassDescriptor>>>,
    io: IO,
}

impl<IO: IoAdapter> Interpreter<IO> {
    pub fn new(io: IO) -> Self {
        Interpreter {
            globals: Environment::new(),
            functions: RefCell::new(HashMap::new()),
            classes: RefCell::new(HashMap::new()),
            io,
        }
    }

    pub fn into_io(self) -> IO {
        self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Executes a whole program's top-level statement list against the
    /// global environment.
    pub fn run(&mut self, program: &[Stmt]) -> Result<(), GlamError> {
        let globals = self.globals.clone();
        let ctx = EvalContext::none();
        match self.exec_block(program, &globals, &ctx) {
            Flow::Ok(_) | Flow::Return(_) => Ok(()),
            Flow::Err(e) => Err(e),
        }
    }

    fn exec_block(&mut self, stmts: &[Stmt], env: &Rc<Environment>, ctx: &EvalContext) -> Flow<Value> {
        let mut last = Value::Null;
        for stmt in stmts {
            last = prop_flow!(self.exec_stmt(stmt, env, ctx));
        }
        Flow::Ok(last)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Rc<Environment>, ctx: &EvalContext) -> Flow<Value> {
        match stmt {
            Stmt::Expr(expr) => Flow::Ok(prop_err!(self.eval_expr(expr, env, ctx))),

            Stmt::Print(expr) => {
                let value = prop_err!(self.eval_expr(expr, env, ctx));
                self.io.write_line(&value.to_string());
                Flow::Ok(Value::Null)
            }

            Stmt::VarDeclaration {
                type_name,
                names,
                init,
                ..
            } => {
                let last_index = names.len() - 1;
                for (i, name) in names.iter().enumerate() {
                    let value = if i == last_index {
                        match init {
                            Some(expr) => prop_err!(self.eval_expr(expr, env, ctx)),
                            None => Value::Null,
                        }
                    } else {
                        Value::Null
                    };
                    let value = prop_err!(coerce_declared_type(type_name.as_deref(), value));
                    env.define(name.clone(), value);
                }
                Flow::Ok(Value::Null)
            }

            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                let cond = prop_err!(self.eval_expr(condition, env, ctx));
                if cond.is_truthy() {
                    self.exec_block(then_block, env, ctx)
                } else if let Some(else_block) = else_block {
                    self.exec_block(else_block, env, ctx)
                } else {
                    Flow::Ok(Value::Null)
                }
            }

            Stmt::While { condition, body } => {
                loop {
                    let cond = prop_err!(self.eval_expr(condition, env, ctx));
                    if !cond.is_truthy() {
                        break;
                    }
                    prop_flow!(self.exec_block(body, env, ctx));
                }
                Flow::Ok(Value::Null)
            }

            Stmt::For {
                init,
                condition,
                increment,
                body,
            } => {
                if let Some(init) = init {
                    prop_flow!(self.exec_stmt(init, env, ctx));
                }
                loop {
                    if let Some(condition) = condition {
                        let cond = prop_err!(self.eval_expr(condition, env, ctx));
                        if !cond.is_truthy() {
                            break;
                        }
                    }
                    prop_flow!(self.exec_block(body, env, ctx));
                    if let Some(increment) = increment {
                        prop_err!(self.eval_expr(increment, env, ctx));
                    }
                }
                Flow::Ok(Value::Null)
            }

            Stmt::ForEach {
                var_name, iterable, body, ..
            } => {
                let iterable_val = prop_err!(self.eval_expr(iterable, env, ctx));
                let items = prop_err!(iterate(&iterable_val));
                for item in items {
                    env.define(var_name.clone(), item);
                    prop_flow!(self.exec_block(body, env, ctx));
                }
                Flow::Ok(Value::Null)
            }

            Stmt::Block(stmts) => self.exec_block(stmts, env, ctx),

            Stmt::FunctionDef(def) => {
                self.functions
                    .borrow_mut()
                    .insert(def.name.clone(), Rc::new(def.clone()));
                Flow::Ok(Value::Null)
            }

            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => prop_err!(self.eval_expr(expr, env, ctx)),
                    None => Value::Null,
                };
                Flow::Return(value)
            }

            Stmt::TryCatch {
                try_block,
                catch_var,
                catch_block,
            } => match self.exec_block(try_block, env, ctx) {
                Flow::Ok(_) => Flow::Ok(Value::Null),
                Flow::Return(v) => Flow::Return(v),
                Flow::Err(e) => {
                    let catch_env = Environment::with_parent(env.clone());
                    if let Some(name) = catch_var {
                        catch_env.define(name.clone(), Value::Str(e.message()));
                    }
                    self.exec_block(catch_block, &catch_env, ctx)
                }
            },

            Stmt::ClassDef(def) => {
                prop_err!(self.register_class(def));
                Flow::Ok(Value::Null)
            }
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn eval_expr(&mut self, expr: &Expr, env: &Rc<Environment>, ctx: &EvalContext) -> Result<Value, GlamError> {
        match expr {
            Expr::Literal(text) => Ok(parse_literal(text)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),

            Expr::Identifier(name) => {
                if let Some(value) = env.get(name) {
                    return Ok(value);
                }
                if let Some(class) = self.classes.borrow().get(name) {
                    return Ok(Value::Class(class.clone()));
                }
                Err(GlamError::name_error(format!("undefined name '{name}'"), None))
            }

            Expr::This => ctx
                .current_this
                .clone()
                .map(Value::Instance)
                .ok_or_else(|| GlamError::name_error("'this' used outside a method", None)),

            Expr::BinaryOp { left, op, right } if op == "." => self.eval_member_access(left, right, env, ctx),
            Expr::BinaryOp { left, op, right } if op == "=" => self.eval_assignment(left, right, env, ctx),
            Expr::BinaryOp { left, op, right } => {
                let left_val = self.eval_expr(left, env, ctx)?;
                let right_val = self.eval_expr(right, env, ctx)?;
                eval_binary(op, left_val, right_val)
            }

            Expr::IndexAccess { collection, index } => {
                let collection_val = self.eval_expr(collection, env, ctx)?;
                let index_val = self.eval_expr(index, env, ctx)?;
                index_read(&collection_val, &index_val)
            }

            Expr::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item, env, ctx)?);
                }
                Ok(Value::array(values))
            }

            Expr::Map(entries) => {
                let mut values = Vec::with_capacity(entries.len());
                for (key, value_expr) in entries {
                    values.push((key.clone(), self.eval_expr(value_expr, env, ctx)?));
                }
                Ok(Value::map(values))
            }

            Expr::Input(prompt) => {
                let prompt_val = self.eval_expr(prompt, env, ctx)?;
                let line = self.io.read_line(&prompt_val.to_string());
                Ok(Value::Str(line))
            }

            Expr::New { class_name, args } => self.eval_new(class_name, args, env, ctx),

            Expr::Call { callee, args } => self.eval_call(callee, args, env, ctx),
        }
    }

    fn eval_member_access(
        &mut self,
        left: &Expr,
        right: &Expr,
        env: &Rc<Environment>,
        ctx: &EvalContext,
    ) -> Result<Value, GlamError> {
        let name = match right.as_ref_identifier() {
            Some(n) => n,
            None => return Err(GlamError::type_error("member access requires a name", None)),
        };
        let left_val = self.eval_expr(left, env, ctx)?;
        self.read_member(&left_val, name, ctx)
    }

    fn read_member(&self, left_val: &Value, name: &str, ctx: &EvalContext) -> Result<Value, GlamError> {
        match left_val {
            Value::Str(s) => {
                if name == "length" {
                    Ok(Value::Int(s.chars().count() as i64))
                } else {
                    Err(GlamError::type_error(format!("strings have no member '{name}'"), None))
                }
            }
            Value::Instance(inst) => {
                let data = inst.0.borrow();
                let is_private = data.private_fields.contains(name) || data.private_methods.contains(name);
                if is_private {
                    let allowed = ctx.current_this.as_ref().is_some_and(|t| t.is_same(inst));
                    if !allowed {
                        return Err(GlamError::access_error(
                            format!("'{name}' is private on {}", data.class_name),
                            None,
                        ));
                    }
                }
                if let Some(value) = data.fields.get(name) {
                    return Ok(value.clone());
                }
                if let Some(def) = data.methods.get(name) {
                    return Ok(Value::Method {
                        instance: inst.clone(),
                        def: def.clone(),
                    });
                }
                Err(GlamError::name_error(
                    format!("'{}' has no member '{name}'", data.class_name),
                    None,
                ))
            }
            Value::Class(class) => {
                if let Some(def) = class.static_methods.get(name) {
                    let is_private = class.private_static_methods.contains(name);
                    if is_private && !static_access_allowed(class, ctx) {
                        return Err(GlamError::access_error(
                            format!("'{name}' is private on {}", class.name),
                            None,
                        ));
                    }
                    return Ok(Value::StaticMethod {
                        class: class.clone(),
                        def: def.clone(),
                    });
                }
                if let Some(value) = class.static_fields.borrow().get(name) {
                    let is_private = class.private_static_fields.contains(name);
                    if is_private && !static_access_allowed(class, ctx) {
                        return Err(GlamError::access_error(
                            format!("'{name}' is private on {}", class.name),
                            None,
                        ));
                    }
                    return Ok(value.clone());
                }
                Err(GlamError::name_error(format!("'{}' has no static member '{name}'", class.name), None))
            }
            other => Err(GlamError::type_error(
                format!("cannot access member '{name}' on a {}", other.type_name()),
                None,
            )),
        }
    }

    fn eval_assignment(
        &mut self,
        left: &Expr,
        right: &Expr,
        env: &Rc<Environment>,
        ctx: &EvalContext,
    ) -> Result<Value, GlamError> {
        let value = self.eval_expr(right, env, ctx)?;
        match left {
            Expr::Identifier(name) => {
                // Writes into the active scope, not an ancestor's —
                // there is no block-local scope, but a function-call
                // scope is its own write target, so `g = n` inside a
                // function body defines/overwrites the *local* `g`
                // rather than reaching out to a same-named global.
                env.define(name.clone(), value.clone());
                Ok(value)
            }
            Expr::IndexAccess { collection, index } => {
                let collection_val = self.eval_expr(collection, env, ctx)?;
                let index_val = self.eval_expr(index, env, ctx)?;
                index_write(&collection_val, &index_val, value.clone())?;
                Ok(value)
            }
            Expr::BinaryOp { left: obj, op, right: field } if op == "." => {
                let name = match field.as_ref_identifier() {
                    Some(n) => n,
                    None => return Err(GlamError::type_error("member assignment requires a name", None)),
                };
                let obj_val = self.eval_expr(obj, env, ctx)?;
                self.write_member(&obj_val, name, value.clone(), ctx)?;
                Ok(value)
            }
            _ => Err(GlamError::type_error("invalid assignment target", None)),
        }
    }

    fn write_member(&self, obj_val: &Value, name: &str, value: Value, ctx: &EvalContext) -> Result<(), GlamError> {
        match obj_val {
            Value::Instance(inst) => {
                let mut data = inst.0.borrow_mut();
                let is_private = data.private_fields.contains(name) || data.private_methods.contains(name);
                if is_private && !ctx.current_this.as_ref().is_some_and(|t| t.is_same(inst)) {
                    return Err(GlamError::access_error(
                        format!("'{name}' is private on {}", data.class_name),
                        None,
                    ));
                }
                data.fields.insert(name.to_string(), value);
                Ok(())
            }
            Value::Class(class) => {
                let is_private = class.private_static_fields.contains(name);
                if is_private && !static_access_allowed(class, ctx) {
                    return Err(GlamError::access_error(
                        format!("'{name}' is private on {}", class.name),
                        None,
                    ));
                }
                class.static_fields.borrow_mut().insert(name.to_string(), value);
                Ok(())
            }
            other => Err(GlamError::type_error(
                format!("cannot assign member '{name}' on a {}", other.type_name()),
                None,
            )),
        }
    }

    fn eval_new(
        &mut self,
        class_name: &str,
        arg_exprs: &[Expr],
        env: &Rc<Environment>,
        ctx: &EvalContext,
    ) -> Result<Value, GlamError> {
        let descriptor = self
            .classes
            .borrow()
            .get(class_name)
            .cloned()
            .ok_or_else(|| GlamError::name_error(format!("undefined class '{class_name}'"), None))?;

        let mut fields = HashMap::new();
        let mut private_fields = HashSet::new();
        for (name, init, is_private) in &descriptor.instance_fields_init {
            let value = match init {
                Some(expr) => self.eval_expr(expr, &self.globals.clone(), &EvalContext::none())?,
                None => Value::Null,
            };
            fields.insert(name.clone(), value);
            if *is_private {
                private_fields.insert(name.clone());
            }
        }
        let private_methods: HashSet<String> = descriptor
            .instance_methods
            .iter()
            .filter(|(_, def)| def.is_private)
            .map(|(name, _)| name.clone())
            .collect();

        let instance = Instance::new(InstanceData {
            class_name: class_name.to_string(),
            fields,
            private_fields,
            private_methods,
            methods: descriptor.instance_methods.clone(),
        });

        let mut arg_vals = Vec::with_capacity(arg_exprs.len());
        for expr in arg_exprs {
            arg_vals.push(self.eval_expr(expr, env, ctx)?);
        }

        let ctor = descriptor
            .instance_methods
            .get("constructor")
            .or_else(|| descriptor.instance_methods.get("init"));
        if let Some(def) = ctor {
            // A constructor's `Return` is trapped and its value discarded.
            self.call_function(def.clone(), arg_vals, Some(instance.clone()), None)?;
        }

        Ok(Value::Instance(instance))
    }

    fn eval_call(
        &mut self,
        callee: &Expr,
        arg_exprs: &[Expr],
        env: &Rc<Environment>,
        ctx: &EvalContext,
    ) -> Result<Value, GlamError> {
        if let Expr::Identifier(name) = callee {
            if let Some(def) = self.functions.borrow().get(name).cloned() {
                let mut arg_vals = Vec::with_capacity(arg_exprs.len());
                for expr in arg_exprs {
                    arg_vals.push(self.eval_expr(expr, env, ctx)?);
                }
                return self.call_function(def, arg_vals, None, None);
            }
        }

        let callee_val = self.eval_expr(callee, env, ctx)?;
        let mut arg_vals = Vec::with_capacity(arg_exprs.len());
        for expr in arg_exprs {
            arg_vals.push(self.eval_expr(expr, env, ctx)?);
        }

        match callee_val {
            Value::Method { instance, def } => self.call_function(def, arg_vals, Some(instance), None),
            Value::StaticMethod { class, def } => self.call_function(def, arg_vals, None, Some(class)),
            other => Err(GlamError::type_error(format!("{} is not callable", other.type_name()), None)),
        }
    }

    fn call_function(
        &mut self,
        def: Rc<FunctionDef>,
        arg_vals: Vec<Value>,
        this_instance: Option<Instance>,
        static_class: Option<Rc<ClassDescriptor>>,
    ) -> Result<Value, GlamError> {
        let local_env = Environment::with_parent(self.globals.clone());
        for (i, param) in def.params.iter().enumerate() {
            let value = arg_vals.get(i).cloned().unwrap_or(Value::Null);
            local_env.define(param.name.clone(), value);
        }

        let ctx = match (&this_instance, &static_class) {
            (Some(instance), _) => EvalContext::with_this(instance.clone()),
            (None, Some(class)) => EvalContext::with_static_class(class.name.clone()),
            (None, None) => EvalContext::none(),
        };

        match self.exec_block(&def.body, &local_env, &ctx) {
            Flow::Ok(_) => Ok(Value::Null),
            Flow::Return(value) => Ok(value),
            Flow::Err(e) => Err(e),
        }
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    fn register_class(&mut self, def: &ClassDef) -> Result<(), GlamError> {
        let base_descriptor = match &def.base {
            Some(base_name) => Some(
                self.classes
                    .borrow()
                    .get(base_name)
                    .cloned()
                    .ok_or_else(|| GlamError::name_error(format!("undefined base class '{base_name}'"), None))?,
            ),
            None => None,
        };

        let mut static_fields: HashMap<String, Value> = base_descriptor
            .as_ref()
            .map(|b| b.static_fields.borrow().clone())
            .unwrap_or_default();
        let mut static_methods: HashMap<String, Rc<FunctionDef>> = base_descriptor
            .as_ref()
            .map(|b| b.static_methods.clone())
            .unwrap_or_default();
        let mut private_static_fields: HashSet<String> = base_descriptor
            .as_ref()
            .map(|b| b.private_static_fields.clone())
            .unwrap_or_default();
        let mut private_static_methods: HashSet<String> = base_descriptor
            .as_ref()
            .map(|b| b.private_static_methods.clone())
            .unwrap_or_default();
        let mut instance_fields_init: Vec<(String, Option<Expr>, bool)> = base_descriptor
            .as_ref()
            .map(|b| b.instance_fields_init.clone())
            .unwrap_or_default();
        let mut instance_methods: HashMap<String, Rc<FunctionDef>> = base_descriptor
            .as_ref()
            .map(|b| (*b.instance_methods).clone())
            .unwrap_or_default();

        for field in &def.fields {
            if let Stmt::VarDeclaration {
                type_name: _,
                names,
                init,
                is_static,
                is_private,
            } = field
            {
                let name = names[0].clone();
                if *is_static {
                    let value = match init {
                        Some(expr) => self.eval_expr(expr, &self.globals.clone(), &EvalContext::none())?,
                        None => Value::Null,
                    };
                    static_fields.insert(name.clone(), value);
                    if *is_private {
                        private_static_fields.insert(name);
                    } else {
                        private_static_fields.remove(&name);
                    }
                } else {
                    upsert_field(&mut instance_fields_init, name, init.clone(), *is_private);
                }
            }
        }

        for method in &def.methods {
            let rc_method = Rc::new(method.clone());
            if method.is_static {
                if method.is_private {
                    private_static_methods.insert(method.name.clone());
                } else {
                    private_static_methods.remove(&method.name);
                }
                static_methods.insert(method.name.clone(), rc_method);
            } else {
                instance_methods.insert(method.name.clone(), rc_method);
            }
        }

        let descriptor = ClassDescriptor {
            name: def.name.clone(),
            base: def.base.clone(),
            static_fields: RefCell::new(static_fields),
            static_methods,
            private_static_fields,
            private_static_methods,
            instance_fields_init,
            instance_methods: Rc::new(instance_methods),
        };

        self.classes.borrow_mut().insert(def.name.clone(), Rc::new(descriptor));
        Ok(())
    }
}

fn static_access_allowed(class: &ClassDescriptor, ctx: &EvalContext) -> bool {
    if let Some(this) = &ctx.current_this {
        if this.0.borrow().class_name == class.name {
            return true;
        }
    }
    ctx.current_static_class.as_deref() == Some(class.name.as_str())
}

fn upsert_field(fields: &mut Vec<(String, Option<Expr>, bool)>, name: String, init: Option<Expr>, is_private: bool) {
    if let Some(existing) = fields.iter_mut().find(|(n, _, _)| *n == name) {
        existing.1 = init;
        existing.2 = is_private;
    } else {
        fields.push((name, init, is_private));
    }
}

fn parse_literal(text: &str) -> Value {
    match text {
        "null" => Value::Null,
        "True" => Value::Bool(true),
        "False" => Value::Bool(false),
        _ if text.contains('.') => Value::Float(text.parse().unwrap_or(0.0)),
        _ => Value::Int(text.parse().unwrap_or(0)),
    }
}

fn coerce_declared_type(type_name: Option<&str>, value: Value) -> Result<Value, GlamError> {
    match type_name {
        Some("int") => match value {
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| GlamError::conversion_error(format!("cannot convert '{s}' to int"), None)),
            other => Ok(other),
        },
        Some("float") => match value {
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| GlamError::conversion_error(format!("cannot convert '{s}' to float"), None)),
            other => Ok(other),
        },
        _ => Ok(value),
    }
}

fn iterate(value: &Value) -> Result<Vec<Value>, GlamError> {
    match value {
        Value::Array(items) => Ok(items.borrow().clone()),
        Value::Map(entries) => Ok(entries.borrow().iter().map(|(k, _)| Value::Str(k.clone())).collect()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        other => Err(GlamError::type_error(format!("{} is not iterable", other.type_name()), None)),
    }
}

fn index_read(collection: &Value, index: &Value) -> Result<Value, GlamError> {
    match collection {
        Value::Array(items) => {
            let idx = expect_int_index(index)?;
            let items = items.borrow();
            usize::try_from(idx)
                .ok()
                .and_then(|i| items.get(i).cloned())
                .ok_or_else(|| GlamError::index_error(format!("array index {idx} out of range"), None))
        }
        Value::Map(entries) => {
            let key = index.to_string();
            entries
                .borrow()
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| GlamError::index_error(format!("no key '{key}' in map"), None))
        }
        other => Err(GlamError::type_error(format!("{} is not indexable", other.type_name()), None)),
    }
}

fn index_write(collection: &Value, index: &Value, value: Value) -> Result<(), GlamError> {
    match collection {
        Value::Array(items) => {
            let idx = expect_int_index(index)?;
            let mut items = items.borrow_mut();
            let i = usize::try_from(idx).ok().filter(|i| *i < items.len());
            match i {
                Some(i) => {
                    items[i] = value;
                    Ok(())
                }
                None => Err(GlamError::index_error(format!("array index {idx} out of range"), None)),
            }
        }
        Value::Map(entries) => {
            let key = index.to_string();
            let mut entries = entries.borrow_mut();
            if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
                entry.1 = value;
            } else {
                entries.push((key, value));
            }
            Ok(())
        }
        other => Err(GlamError::type_error(format!("{} is not indexable", other.type_name()), None)),
    }
}

fn expect_int_index(index: &Value) -> Result<i64, GlamError> {
    match index {
        Value::Int(n) => Ok(*n),
        other => Err(GlamError::type_error(format!("index must be an int, got {}", other.type_name()), None)),
    }
}

fn eval_binary(op: &str, left: Value, right: Value) -> Result<Value, GlamError> {
    match op {
        "+" => {
            if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
                return Ok(Value::Str(format!("{left}{right}")));
            }
            numeric_op(left, right, |a, b| a + b, |a, b| a + b)
        }
        "-" => numeric_op(left, right, |a, b| a - b, |a, b| a - b),
        "*" => {
            if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
                return Err(GlamError::type_error("'*' does not support strings", None));
            }
            numeric_op(left, right, |a, b| a * b, |a, b| a * b)
        }
        "/" => {
            let l = as_num(&left).ok_or_else(|| GlamError::type_error("'/' requires numbers", None))?;
            let r = as_num(&right).ok_or_else(|| GlamError::type_error("'/' requires numbers", None))?;
            if num_as_f64(&r) == 0.0 {
                return Err(GlamError::type_error("division by zero", None));
            }
            Ok(Value::Float(num_as_f64(&l) / num_as_f64(&r)))
        }
        "^" => match (as_num(&left), as_num(&right)) {
            (Some(Num::Int(base)), Some(Num::Int(exp))) if exp >= 0 => {
                Ok(Value::Int(base.pow(exp as u32)))
            }
            (Some(l), Some(r)) => Ok(Value::Float(num_as_f64(&l).powf(num_as_f64(&r)))),
            _ => Err(GlamError::type_error("'^' requires numbers", None)),
        },
        "==" => Ok(Value::Bool(value_eq(&left, &right))),
        "!=" => Ok(Value::Bool(!value_eq(&left, &right))),
        "<" | "<=" | ">" | ">=" => compare(op, &left, &right),
        "and" | "&&" => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        "or" | "||" => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        other => Err(GlamError::type_error(format!("unknown operator '{other}'"), None)),
    }
}

fn numeric_op(left: Value, right: Value, int_op: fn(i64, i64) -> i64, float_op: fn(f64, f64) -> f64) -> Result<Value, GlamError> {
    match (as_num(&left), as_num(&right)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => Ok(Value::Int(int_op(a, b))),
        (Some(l), Some(r)) => Ok(Value::Float(float_op(num_as_f64(&l), num_as_f64(&r)))),
        _ => Err(GlamError::type_error(
            format!("operator requires numbers, got {} and {}", left.type_name(), right.type_name()),
            None,
        )),
    }
}

fn compare(op: &str, left: &Value, right: &Value) -> Result<Value, GlamError> {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => match (as_num(left), as_num(right)) {
            (Some(l), Some(r)) => num_as_f64(&l).partial_cmp(&num_as_f64(&r)).unwrap_or(std::cmp::Ordering::Equal),
            _ => {
                return Err(GlamError::type_error(
                    format!("cannot compare {} and {}", left.type_name(), right.type_name()),
                    None,
                ))
            }
        },
    };
    let result = match op {
        "<" => ordering.is_lt(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        ">=" => ordering.is_ge(),
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}

impl Expr {
    fn as_ref_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }
}
