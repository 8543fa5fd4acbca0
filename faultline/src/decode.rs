use std::str::FromStr;

use faultline_core::{RuntimeFault, RuntimeFaultKind};
use faultline_normalize::Failure;
use serde_json::Value;

/// Decode one input document into a raw failure
///
/// An object named after a runtime fault kind and carrying a string
/// `message` is read as that fault. Everything else is a plain value.
pub fn failure(document: Value) -> Failure {
    let is_fault = document
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| RuntimeFaultKind::from_str(name).is_ok())
        && document.get("message").is_some_and(Value::is_string);

    if is_fault && let Ok(fault) = serde_json::from_value::<RuntimeFault>(document.clone()) {
        return Failure::Runtime(fault);
    }

    Failure::Value(document)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn runtime_fault_document() {
        let failure = failure(json!({ "name": "TypeError", "message": "x is undefined", "stack": "at f" }));

        let Failure::Runtime(fault) = failure else {
            panic!("expected runtime fault");
        };
        assert_eq!(fault.kind, RuntimeFaultKind::Type);
        assert_eq!(fault.stack.as_deref(), Some("at f"));
    }

    #[test]
    fn unknown_name_stays_a_value() {
        let failure = failure(json!({ "name": "Error", "message": "generic" }));
        assert!(matches!(failure, Failure::Value(_)));
    }

    #[test]
    fn fault_without_message_stays_a_value() {
        let failure = failure(json!({ "name": "RangeError" }));
        assert!(matches!(failure, Failure::Value(_)));
    }

    #[test]
    fn scalars_stay_values() {
        assert!(matches!(failure(json!("TypeError")), Failure::Value(Value::String(_))));
    }
}
