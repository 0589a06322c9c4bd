// ABOUTME: Flow — explicit control-flow result type standing in for exceptions

use crate::error::GlamError;
use crate::value::Value;

/// The result of evaluating a statement. A `Return` is a distinct
/// arm from `Err` by design: only function/method/constructor call
/// sites ever consume `Return`; every other site propagates it
/// unchanged. `Return` must never reach a `try`/`catch`, and a user
/// error must never be swallowed as if it were a return value — see
/// SPEC_FULL.md §5/§9.
#[derive(Debug)]
pub enum Flow<T> {
    Ok(T),
    Return(Value),
    Err(GlamError),
}

impl<T> Flow<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Flow<U> {
        match self {
            Flow::Ok(v) => Flow::Ok(f(v)),
            Flow::Return(v) => Flow::Return(v),
            Flow::Err(e) => Flow::Err(e),
        }
    }
}

impl<T> From<Result<T, GlamError>> for Flow<T> {
    fn from(result: Result<T, GlamError>) -> Self {
        match result {
            Ok(v) => Flow::Ok(v),
            Err(e) => Flow::Err(e),
        }
    }
}

/// Unwraps a `Result<T, GlamError>`, short-circuiting the enclosing
/// `Flow`-returning function with `Flow::Err` on failure.
macro_rules! prop_err {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => return $crate::flow::Flow::Err(e),
        }
    };
}

/// Unwraps a `Flow<T>`, short-circuiting the enclosing function with
/// `Flow::Return`/`Flow::Err` if the nested evaluation didn't settle
/// on a plain value.
macro_rules! prop_flow {
    ($e:expr) => {
        match $e {
            $crate::flow::Flow::Ok(v) => v,
            $crate::flow::Flow::Return(v) => return $crate::flow::Flow::Return(v),
            $crate::flow::Flow::Err(e) => return $crate::flow::Flow::Err(e),
        }
    };
}

pub(crate) use prop_err;
pub(crate) use prop_flow;
