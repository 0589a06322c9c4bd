// ABOUTME: Tagged AST node enums for every syntactic form

/// An expression node. The member-access operator `.` and the
/// assignment operator `=` are both encoded as `BinaryOp`, the same
/// way the language treats them as infix operators that are only
/// distinguished by `op` during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(String),
    Str(String),
    Identifier(String),
    BinaryOp {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    IndexAccess {
        collection: Box<Expr>,
        index: Box<Expr>,
    },
    Array(Vec<Expr>),
    Map(Vec<(String, Expr)>),
    Input(Box<Expr>),
    This,
    New {
        class_name: String,
        args: Vec<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// Parsed then ignored, per the grammar.
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub is_static: bool,
    pub is_private: bool,
    pub is_constructor: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub base: Option<String>,
    pub fields: Vec<Stmt>,
    pub methods: Vec<FunctionDef>,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Print(Expr),
    VarDeclaration {
        type_name: Option<String>,
        names: Vec<String>,
        // Shared by the last name in `names`; earlier names init to null.
        init: Option<Expr>,
        is_static: bool,
        is_private: bool,
    },
    If {
        condition: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Vec<Stmt>,
    },
    ForEach {
        var_type: Option<String>,
        var_name: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Block(Vec<Stmt>),
    FunctionDef(FunctionDef),
    Return(Option<Expr>),
    TryCatch {
        try_block: Vec<Stmt>,
        catch_var: Option<String>,
        catch_block: Vec<Stmt>,
    },
    ClassDef(ClassDef),
}
