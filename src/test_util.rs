use crate::{BoxError, RecoveryResult, Value};

pub fn cause(msg: &str) -> BoxError {
    msg.into()
}

/// A recovery procedure which always panics with `payload`
pub fn panicking(
    payload: &'static str,
) -> impl Fn(Vec<Value>) -> RecoveryResult + Send + Sync + 'static {
    move |_: Vec<Value>| -> RecoveryResult { panic!("{}", payload) }
}

/// Render string-like recovery results, for comparison in tests.
/// Anything else renders as `"?"`.
pub fn strs(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| {
            if let Some(s) = v.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = v.downcast_ref::<String>() {
                s.clone()
            } else {
                "?".to_string()
            }
        })
        .collect()
}

/// An error which wraps another, for building `source()` chains
#[derive(Debug, thiserror::Error)]
#[error("{msg}")]
pub struct Wrapped {
    msg: String,
    #[source]
    source: BoxError,
}

impl Wrapped {
    pub fn new(msg: &str, source: impl Into<BoxError>) -> Self {
        Self {
            msg: msg.to_string(),
            source: source.into(),
        }
    }
}
