/// Structured operation events, decoupled from log formatting. Handlers emit
/// start/success/failure with flat context fields; the production sink writes
/// through `tracing`. Emission is purely observational: it never fails and
/// never changes what a handler returns.
pub trait EventSink: Send + Sync {
    fn started(&self, op: &str, fields: &[(&str, &str)]);
    fn succeeded(&self, op: &str, fields: &[(&str, &str)]);
    fn failed(&self, op: &str, stage: &str, error: &str, fields: &[(&str, &str)]);
}

pub struct TracingSink;

impl EventSink for TracingSink {
    fn started(&self, op: &str, fields: &[(&str, &str)]) {
        tracing::info!(op, fields = %render(fields), "operation started");
    }

    fn succeeded(&self, op: &str, fields: &[(&str, &str)]) {
        tracing::info!(op, fields = %render(fields), "operation succeeded");
    }

    fn failed(&self, op: &str, stage: &str, error: &str, fields: &[(&str, &str)]) {
        tracing::error!(op, stage, error, fields = %render(fields), "operation failed");
    }
}

fn render(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fields_flat() {
        let rendered = render(&[("uid", "u-1"), ("record_id", "r-2")]);
        assert_eq!(rendered, "uid=u-1 record_id=r-2");
    }

    #[test]
    fn renders_empty_fields_as_empty_string() {
        assert_eq!(render(&[]), "");
    }
}
