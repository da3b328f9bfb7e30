//! Statement tracing
//!
//! When enabled, every statement the mapping layer executes is emitted as a
//! structured `op = "sql"` event carrying the SQL text and its bound args.

use crate::core_types::schema::{EVENT_STATEMENT, OP_SQL};
use crate::model::Value;

/// Per-connection statement tracer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlTrace {
    prefix: Option<String>,
}

impl SqlTrace {
    /// A tracer that emits nothing
    pub fn off() -> Self {
        Self { prefix: None }
    }

    /// A tracer that tags every statement event with `prefix`
    pub fn on(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.prefix.is_some()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Emit one statement event (no-op when tracing is off)
    pub fn statement(&self, sql: &str, args: &[Value]) {
        if let Some(prefix) = &self.prefix {
            tracing::info!(
                component = module_path!(),
                op = OP_SQL,
                event = EVENT_STATEMENT,
                prefix = prefix.as_str(),
                sql = sql,
                args = render_args(args).as_str(),
            );
        }
    }
}

/// Render bound args as `[1:"PT" 2:"SP"]`
pub fn render_args(args: &[Value]) -> String {
    let parts: Vec<String> = args
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{}:{}", i + 1, v))
        .collect();
    format!("[{}]", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args() {
        let args = vec![Value::from("PT"), Value::from(3i64), Value::Null];
        assert_eq!(render_args(&args), r#"[1:"PT" 2:3 3:NULL]"#);
        assert_eq!(render_args(&[]), "[]");
    }

    #[test]
    fn test_on_off() {
        assert!(!SqlTrace::off().is_enabled());
        let trace = SqlTrace::on("[rowmap]");
        assert!(trace.is_enabled());
        assert_eq!(trace.prefix(), Some("[rowmap]"));
        assert_eq!(SqlTrace::default(), SqlTrace::off());
    }
}
