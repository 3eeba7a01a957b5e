use std::{fmt, rc::Rc};

/// A parsed program: the ordered list of top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub body: Vec<Statement>,
}

/// A binary operator.
///
/// `And` is written `&&` and `Bar` is written `|`; the single bar doubles as
/// the logical "or" and as the branch separator of a ternary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`, numeric addition or string concatenation.
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `&&`
    And,
    /// `|`
    Bar,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Add => "+",
                        Self::Sub => "-",
                        Self::Mul => "*",
                        Self::Div => "/",
                        Self::Mod => "%",
                        Self::Equal => "==",
                        Self::NotEqual => "!=",
                        Self::Less => "<",
                        Self::Greater => ">",
                        Self::And => "&&",
                        Self::Bar => "|",
                    })
    }
}

/// A function definition shared between the AST and the function values
/// created from it.
///
/// Function values keep an `Rc` to their definition, so two closures created
/// from the same source text compare equal while distinct definitions do not.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Declared name, or [`FunctionDef::ANONYMOUS`].
    pub name:   String,
    /// Parameter names in declaration order.
    pub params: Vec<String>,
    /// Statements of the body.
    pub body:   Vec<Statement>,
    /// Line of the `fn` keyword.
    pub line:   usize,
}

impl FunctionDef {
    /// The name given to functions declared without one.
    pub const ANONYMOUS: &'static str = "<anonymous>";
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    /// Name of the class.
    pub name:           String,
    /// Instance field names, initialised to null on construction.
    pub fields:         Vec<String>,
    /// Static fields with their initialiser expressions.
    pub static_fields:  Vec<(String, Expr)>,
    /// Instance methods.
    pub methods:        Vec<Rc<FunctionDef>>,
    /// Static methods.
    pub static_methods: Vec<Rc<FunctionDef>>,
    /// Line of the `class` keyword.
    pub line:           usize,
}

/// One arm of a `match` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    /// Alternative patterns; any one matching selects the arm.
    pub patterns: Vec<Expr>,
    /// Statements run when the arm is selected.
    pub body:     Vec<Statement>,
}

/// A key/value pair in an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property key.
    pub key:   String,
    /// Value expression; a shorthand `{ x }` becomes the identifier `x`.
    pub value: Expr,
}

/// An expression node.
///
/// Every variant carries the line it started on for runtime diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal.
    String {
        /// Contents without the surrounding quotes.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// A reference to a binding.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// An object literal, `{ a: 1, b }`.
    Object {
        /// Properties in source order.
        properties: Vec<Property>,
        /// Line number in the source code.
        line:       usize,
    },
    /// An array literal, `[1, 2, 3]`.
    Array {
        /// Element expressions.
        elements: Vec<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An assignment; the target is an identifier or member expression.
    Assignment {
        /// Assignment target.
        target: Box<Expr>,
        /// Assigned value.
        value:  Box<Expr>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Member access, `a.b` or `a[expr]`.
    Member {
        /// The object being accessed.
        object:   Box<Expr>,
        /// The property: an identifier when not computed.
        property: Box<Expr>,
        /// Whether the property is written in brackets.
        computed: bool,
        /// Line number in the source code.
        line:     usize,
    },
    /// A call, `f(a, b)`.
    Call {
        /// The called expression.
        callee:    Box<Expr>,
        /// Argument expressions.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Instance construction, `new C(args)`.
    New {
        /// Expression yielding the class.
        target:    Box<Expr>,
        /// Constructor arguments.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A `match` expression.
    Match {
        /// The inspected value.
        value:   Box<Expr>,
        /// Arms in source order.
        cases:   Vec<MatchCase>,
        /// Body of the `default` arm, if any.
        default: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A function expression.
    Function(Rc<FunctionDef>),
    /// `try { } catch { }`.
    TryCatch {
        /// Protected statements.
        body:    Vec<Statement>,
        /// Handler statements; `error` is bound while they run.
        handler: Vec<Statement>,
        /// Line number in the source code.
        line:    usize,
    },
}

impl Expr {
    /// Returns the line this expression started on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::String { line, .. }
            | Self::Identifier { line, .. }
            | Self::Object { line, .. }
            | Self::Array { line, .. }
            | Self::Binary { line, .. }
            | Self::Assignment { line, .. }
            | Self::Member { line, .. }
            | Self::Call { line, .. }
            | Self::New { line, .. }
            | Self::Match { line, .. }
            | Self::TryCatch { line, .. } => *line,
            Self::Function(def) => def.line,
        }
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let name = value` or `const name = value`.
    VarDeclaration {
        /// Declared name.
        identifier: String,
        /// Whether the binding is constant.
        constant:   bool,
        /// Initialiser; absent means null.
        value:      Option<Expr>,
        /// Line number in the source code.
        line:       usize,
    },
    /// `fn name(params) { body }` declared as a statement.
    Function(Rc<FunctionDef>),
    /// `if (test) { } else { }`; `else if` nests in `alternate`.
    If {
        /// Condition.
        test:      Expr,
        /// Statements run when the condition is true.
        body:      Vec<Statement>,
        /// Statements run otherwise.
        alternate: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for (init; test; update) { }`.
    For {
        /// Declaration run once before the loop.
        init:   Box<Statement>,
        /// Condition checked before each iteration.
        test:   Expr,
        /// Expression run after each iteration.
        update: Expr,
        /// Loop body.
        body:   Vec<Statement>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `while (test) { }`.
    While {
        /// Condition checked before each iteration.
        test: Expr,
        /// Loop body.
        body: Vec<Statement>,
        /// Line number in the source code.
        line: usize,
    },
    /// `return value`; a bare `return` yields null.
    Return {
        /// Returned expression.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `break`
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `continue`
    Continue {
        /// Line number in the source code.
        line: usize,
    },
    /// `throw value`
    Throw {
        /// Thrown expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A class declaration.
    Class(ClassDef),
    /// `enum Name { A, B }`.
    Enum {
        /// Name of the enum.
        name:    String,
        /// Member names in declaration order.
        members: Vec<String>,
        /// Line number in the source code.
        line:    usize,
    },
    /// An expression evaluated for its value.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}
