//! Registration shape for caller-supplied (non-built-in) types
//! (SPEC_FULL.md §10.5's custom type registrar).
//!
//! This is the one dynamic-dispatch seam in the type-value engine: a host
//! application can register its own `store`/`print`/`duplicate`/`compare`
//! quartet under a name and have the compiler treat it as if it were a
//! built-in, without this crate knowing anything about the host's value
//! representation.

use yang2_base::Result;

use crate::value::{Comparison, Value};

/// The four capabilities a custom type must provide, matching the
/// built-in type-value engine's contract (spec.md §4.5).
pub struct CustomTypeCallbacks {
    pub store: fn(text: &str) -> Result<Value>,
    pub print: fn(value: &Value) -> Result<String>,
    pub duplicate: fn(value: &Value) -> Value,
    pub compare: fn(a: &Value, b: &Value) -> Comparison,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(text: &str) -> Result<Value> {
        Ok(Value::String(text.to_string()))
    }

    fn print(value: &Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => unreachable!(),
        }
    }

    fn duplicate(value: &Value) -> Value {
        value.clone()
    }

    fn compare(a: &Value, b: &Value) -> Comparison {
        a.compare(b)
    }

    #[test]
    fn callbacks_round_trip_through_a_custom_store_print_pair() {
        let callbacks = CustomTypeCallbacks { store, print, duplicate, compare };
        let v = (callbacks.store)("hello").unwrap();
        assert_eq!((callbacks.print)(&v).unwrap(), "hello");
        let d = (callbacks.duplicate)(&v);
        assert_eq!((callbacks.compare)(&v, &d), Comparison::Equal);
    }
}
