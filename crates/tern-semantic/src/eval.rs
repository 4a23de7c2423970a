//! Compile-time evaluation of typed expressions.
//!
//! The evaluator reduces a checked expression to a constant: literals pass
//! through, integer arithmetic folds, and implicit numeric casts convert
//! with truncation. Anything it cannot reduce is an [`EvalError`], which the
//! checker treats as fatal wherever a compile-time value is required
//! (constants, statics, globals, switch case options).

use tern_ast::{BinOp, CastKind, UnOp};
use tern_core::{Storage, TypeId, TypeStore};

use crate::tree::{Expr, ExprKind, Value};

/// Why an expression could not be evaluated at compile time.
#[derive(Debug, Clone)]
pub struct EvalError(pub String);

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Evaluates `expr` to a constant expression of the same result type.
pub fn eval_expr(store: &TypeStore, expr: &Expr) -> Result<Expr, EvalError> {
    match &expr.kind {
        ExprKind::Constant(_) => Ok(expr.clone()),

        ExprKind::Cast {
            kind: CastKind::Cast,
            secondary,
            value,
        } => {
            let inner = eval_expr(store, value)?;
            convert(store, *secondary, &inner)
        }

        ExprKind::Binarithm { op, lhs, rhs } => {
            let lhs = eval_expr(store, lhs)?;
            let rhs = eval_expr(store, rhs)?;
            fold_binarithm(store, expr.result, *op, &lhs, &rhs)
        }

        ExprKind::Unarithm { op, operand } => {
            let operand = eval_expr(store, operand)?;
            fold_unarithm(store, expr.result, *op, &operand)
        }

        _ => Err(EvalError(
            "expression is not a compile-time constant".to_string(),
        )),
    }
}

fn constant(result: TypeId, value: Value) -> Expr {
    Expr {
        result,
        terminates: false,
        kind: ExprKind::Constant(value),
    }
}

/// Converts an evaluated constant to the target type of a plain cast.
fn convert(store: &TypeStore, to: TypeId, inner: &Expr) -> Result<Expr, EvalError> {
    let Some(value) = inner.as_value() else {
        return Err(EvalError(
            "cast operand is not a compile-time constant".to_string(),
        ));
    };

    if store.is_integer(to) {
        let raw = match value {
            Value::Int(v) => *v as u64,
            Value::Uint(v) => *v,
            Value::Rune(c) => u64::from(u32::from(*c)),
            _ => {
                return Err(EvalError(
                    "cannot convert non-numeric constant to integer type".to_string(),
                ));
            }
        };
        return Ok(constant(to, truncate(store, to, raw)?));
    }

    let target = store.get(store.dealias(to));
    match (value, target.storage()) {
        (Value::Null, Storage::Pointer | Storage::Null) => Ok(constant(to, Value::Null)),
        (Value::Str(_), Storage::String)
        | (Value::Bool(_), Storage::Bool)
        | (Value::Array { .. }, Storage::Array | Storage::Slice) => {
            Ok(constant(to, value.clone()))
        }
        _ => Err(EvalError(format!(
            "cannot convert constant to {}",
            store.type_name(to)
        ))),
    }
}

/// Masks `raw` to the byte width of `to`, sign-extending for signed targets.
fn truncate(store: &TypeStore, to: TypeId, raw: u64) -> Result<Value, EvalError> {
    let target = store.get(store.dealias(to));
    let Some(size) = target.size else {
        return Err(EvalError("integer target has undefined size".to_string()));
    };
    let bits = size * 8;
    let masked = if bits >= 64 {
        raw
    } else {
        raw & ((1u64 << bits) - 1)
    };

    if target.storage() == Storage::Rune {
        let c = char::from_u32(masked as u32)
            .ok_or_else(|| EvalError("constant is not a valid rune".to_string()))?;
        return Ok(Value::Rune(c));
    }
    if store.is_signed(to) {
        let shift = 64 - bits;
        Ok(Value::Int(((masked << shift) as i64) >> shift))
    } else {
        Ok(Value::Uint(masked))
    }
}

fn fold_binarithm(
    store: &TypeStore,
    result: TypeId,
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<Expr, EvalError> {
    let unsupported = || EvalError("operands are not compile-time constants".to_string());
    let (lv, rv) = (
        lhs.as_value().ok_or_else(unsupported)?,
        rhs.as_value().ok_or_else(unsupported)?,
    );

    let value = match (lv, rv) {
        (Value::Int(a), Value::Int(b)) => match op {
            BinOp::Add => int_value(store, result, a.wrapping_add(*b))?,
            BinOp::Subtract => int_value(store, result, a.wrapping_sub(*b))?,
            BinOp::Multiply => int_value(store, result, a.wrapping_mul(*b))?,
            BinOp::Divide => int_value(store, result, checked_div(*a, *b)?)?,
            BinOp::Modulo => int_value(store, result, checked_rem(*a, *b)?)?,
            BinOp::BitAnd => int_value(store, result, a & b)?,
            BinOp::BitOr => int_value(store, result, a | b)?,
            BinOp::BitXor => int_value(store, result, a ^ b)?,
            BinOp::ShiftLeft => int_value(store, result, a.wrapping_shl(*b as u32))?,
            BinOp::ShiftRight => int_value(store, result, a.wrapping_shr(*b as u32))?,
            BinOp::Less => Value::Bool(a < b),
            BinOp::LessEqual => Value::Bool(a <= b),
            BinOp::Greater => Value::Bool(a > b),
            BinOp::GreaterEqual => Value::Bool(a >= b),
            BinOp::Equal => Value::Bool(a == b),
            BinOp::NotEqual => Value::Bool(a != b),
            _ => return Err(unsupported()),
        },
        (Value::Uint(a), Value::Uint(b)) => match op {
            BinOp::Add => uint_value(store, result, a.wrapping_add(*b))?,
            BinOp::Subtract => uint_value(store, result, a.wrapping_sub(*b))?,
            BinOp::Multiply => uint_value(store, result, a.wrapping_mul(*b))?,
            BinOp::Divide => uint_value(store, result, checked_udiv(*a, *b)?)?,
            BinOp::Modulo => uint_value(store, result, checked_urem(*a, *b)?)?,
            BinOp::BitAnd => uint_value(store, result, a & b)?,
            BinOp::BitOr => uint_value(store, result, a | b)?,
            BinOp::BitXor => uint_value(store, result, a ^ b)?,
            BinOp::ShiftLeft => uint_value(store, result, a.wrapping_shl(*b as u32))?,
            BinOp::ShiftRight => uint_value(store, result, a.wrapping_shr(*b as u32))?,
            BinOp::Less => Value::Bool(a < b),
            BinOp::LessEqual => Value::Bool(a <= b),
            BinOp::Greater => Value::Bool(a > b),
            BinOp::GreaterEqual => Value::Bool(a >= b),
            BinOp::Equal => Value::Bool(a == b),
            BinOp::NotEqual => Value::Bool(a != b),
            _ => return Err(unsupported()),
        },
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinOp::LogicalAnd => Value::Bool(*a && *b),
            BinOp::LogicalOr => Value::Bool(*a || *b),
            BinOp::LogicalXor => Value::Bool(a != b),
            BinOp::Equal => Value::Bool(a == b),
            BinOp::NotEqual => Value::Bool(a != b),
            _ => return Err(unsupported()),
        },
        (Value::Rune(a), Value::Rune(b)) => match op {
            BinOp::Less => Value::Bool(a < b),
            BinOp::LessEqual => Value::Bool(a <= b),
            BinOp::Greater => Value::Bool(a > b),
            BinOp::GreaterEqual => Value::Bool(a >= b),
            BinOp::Equal => Value::Bool(a == b),
            BinOp::NotEqual => Value::Bool(a != b),
            _ => return Err(unsupported()),
        },
        _ => return Err(unsupported()),
    };
    Ok(constant(result, value))
}

fn fold_unarithm(
    store: &TypeStore,
    result: TypeId,
    op: UnOp,
    operand: &Expr,
) -> Result<Expr, EvalError> {
    let unsupported = || EvalError("operand is not a compile-time constant".to_string());
    let value = match (op, operand.as_value().ok_or_else(unsupported)?) {
        (UnOp::Minus, Value::Int(v)) => int_value(store, result, v.wrapping_neg())?,
        (UnOp::Plus, Value::Int(v)) => Value::Int(*v),
        (UnOp::BitNot, Value::Uint(v)) => uint_value(store, result, !v)?,
        (UnOp::LogicalNot, Value::Bool(v)) => Value::Bool(!v),
        _ => return Err(unsupported()),
    };
    Ok(constant(result, value))
}

fn int_value(store: &TypeStore, result: TypeId, v: i64) -> Result<Value, EvalError> {
    truncate(store, result, v as u64)
}

fn uint_value(store: &TypeStore, result: TypeId, v: u64) -> Result<Value, EvalError> {
    truncate(store, result, v)
}

fn checked_div(a: i64, b: i64) -> Result<i64, EvalError> {
    a.checked_div(b)
        .ok_or_else(|| EvalError("division by zero in constant expression".to_string()))
}

fn checked_rem(a: i64, b: i64) -> Result<i64, EvalError> {
    a.checked_rem(b)
        .ok_or_else(|| EvalError("division by zero in constant expression".to_string()))
}

fn checked_udiv(a: u64, b: u64) -> Result<u64, EvalError> {
    a.checked_div(b)
        .ok_or_else(|| EvalError("division by zero in constant expression".to_string()))
}

fn checked_urem(a: u64, b: u64) -> Result<u64, EvalError> {
    a.checked_rem(b)
        .ok_or_else(|| EvalError("division by zero in constant expression".to_string()))
}
