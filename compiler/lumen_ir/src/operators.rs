//! Operator tags handed to the constant folder.
//!
//! The type checker has already picked the specific operator (for example
//! `MatrixTimesVector` rather than a generic `*`), so the folder never has to
//! re-derive it from operand shapes.

use std::fmt;

/// Two-operand operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    VectorTimesScalar,
    MatrixTimesScalar,

    // Linear algebra
    MatrixTimesMatrix,
    MatrixTimesVector,
    VectorTimesMatrix,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    LogicalAnd,
    LogicalOr,
    LogicalXor,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul
            | Self::VectorTimesScalar
            | Self::MatrixTimesScalar
            | Self::MatrixTimesMatrix
            | Self::MatrixTimesVector
            | Self::VectorTimesMatrix => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::LogicalXor => "^^",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }
}

/// One-operand operators and single-argument built-in functions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    // Operators
    Negate,
    LogicalNot,
    VectorLogicalNot,
    BitwiseNot,

    // Angle and trigonometry
    Radians,
    Degrees,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,

    // Exponential
    Exp,
    Log,
    Exp2,
    Log2,
    Sqrt,
    InverseSqrt,

    // Common
    Abs,
    Sign,
    Floor,
    Trunc,
    Round,
    RoundEven,
    Ceil,
    Fract,
    IsNan,
    IsInf,

    // Bit reinterpretation and packing
    FloatBitsToInt,
    FloatBitsToUint,
    IntBitsToFloat,
    UintBitsToFloat,
    PackSnorm2x16,
    UnpackSnorm2x16,
    PackUnorm2x16,
    UnpackUnorm2x16,
    PackHalf2x16,
    UnpackHalf2x16,

    // Geometry
    Length,
    Normalize,

    // Fragment derivatives
    DPdx,
    DPdy,
    Fwidth,

    // Matrix
    Determinant,
    MatrixInverse,
    Transpose,

    // Vector relational
    Any,
    All,
}

impl UnaryOp {
    /// Name as written in source: a symbol for operators, the built-in
    /// function name otherwise.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::LogicalNot => "!",
            Self::VectorLogicalNot => "not",
            Self::BitwiseNot => "~",
            Self::Radians => "radians",
            Self::Degrees => "degrees",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Exp2 => "exp2",
            Self::Log2 => "log2",
            Self::Sqrt => "sqrt",
            Self::InverseSqrt => "inversesqrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
            Self::Floor => "floor",
            Self::Trunc => "trunc",
            Self::Round => "round",
            Self::RoundEven => "roundEven",
            Self::Ceil => "ceil",
            Self::Fract => "fract",
            Self::IsNan => "isnan",
            Self::IsInf => "isinf",
            Self::FloatBitsToInt => "floatBitsToInt",
            Self::FloatBitsToUint => "floatBitsToUint",
            Self::IntBitsToFloat => "intBitsToFloat",
            Self::UintBitsToFloat => "uintBitsToFloat",
            Self::PackSnorm2x16 => "packSnorm2x16",
            Self::UnpackSnorm2x16 => "unpackSnorm2x16",
            Self::PackUnorm2x16 => "packUnorm2x16",
            Self::UnpackUnorm2x16 => "unpackUnorm2x16",
            Self::PackHalf2x16 => "packHalf2x16",
            Self::UnpackHalf2x16 => "unpackHalf2x16",
            Self::Length => "length",
            Self::Normalize => "normalize",
            Self::DPdx => "dFdx",
            Self::DPdy => "dFdy",
            Self::Fwidth => "fwidth",
            Self::Determinant => "determinant",
            Self::MatrixInverse => "inverse",
            Self::Transpose => "transpose",
            Self::Any => "any",
            Self::All => "all",
        }
    }

    /// Whether the result is a single scalar regardless of operand shape.
    pub const fn reduces_to_scalar(self) -> bool {
        matches!(
            self,
            Self::Length | Self::Determinant | Self::Any | Self::All
        )
    }
}

/// Built-in functions taking two or more operands.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AggregateOp {
    Min,
    Max,
    /// Two-argument arc tangent, `atan(y, x)`.
    Atan,
    Pow,
    Modf,
    Clamp,
    Mix,
    Step,
    SmoothStep,
    Distance,
    Dot,
    Cross,
    FaceForward,
    Reflect,
    Refract,
    OuterProduct,
}

impl AggregateOp {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Atan => "atan",
            Self::Pow => "pow",
            Self::Modf => "modf",
            Self::Clamp => "clamp",
            Self::Mix => "mix",
            Self::Step => "step",
            Self::SmoothStep => "smoothstep",
            Self::Distance => "distance",
            Self::Dot => "dot",
            Self::Cross => "cross",
            Self::FaceForward => "faceforward",
            Self::Reflect => "reflect",
            Self::Refract => "refract",
            Self::OuterProduct => "outerProduct",
        }
    }

    /// Number of operands the function takes.
    pub const fn arity(self) -> usize {
        match self {
            Self::Clamp | Self::Mix | Self::SmoothStep | Self::FaceForward | Self::Refract => 3,
            Self::Min
            | Self::Max
            | Self::Atan
            | Self::Pow
            | Self::Modf
            | Self::Step
            | Self::Distance
            | Self::Dot
            | Self::Cross
            | Self::Reflect
            | Self::OuterProduct => 2,
        }
    }
}

/// Any operator the folder can be asked about, for error reporting.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Aggregate(AggregateOp),
    Constructor,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Binary(op) => write!(f, "`{}`", op.as_symbol()),
            Operator::Unary(op) => write!(f, "`{}`", op.name()),
            Operator::Aggregate(op) => write!(f, "`{}`", op.name()),
            Operator::Constructor => f.write_str("constructor"),
        }
    }
}

impl From<BinaryOp> for Operator {
    fn from(op: BinaryOp) -> Self {
        Operator::Binary(op)
    }
}

impl From<UnaryOp> for Operator {
    fn from(op: UnaryOp) -> Self {
        Operator::Unary(op)
    }
}

impl From<AggregateOp> for Operator {
    fn from(op: AggregateOp) -> Self {
        Operator::Aggregate(op)
    }
}
