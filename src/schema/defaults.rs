//! Placeholder defaults for fields whose schema declares none.
//!
//! Every renderable field gets an initial value so the generated form never
//! waits on missing data. Binary payloads are the exception: an unset
//! default there means "no file selected".

use serde_json::{Map, Value};

use crate::schema::types::{FieldKind, NumberConstraints};

/// Kind-appropriate initial value, or `None` when the kind has no sensible
/// placeholder (binary payloads, unions, empty enums).
pub fn placeholder(kind: &FieldKind) -> Option<Value> {
    match kind {
        FieldKind::String => Some(Value::String(String::new())),
        FieldKind::Number(constraints) => Some(Value::from(clamped_zero(constraints))),
        FieldKind::Integer(constraints) => Some(Value::from(clamped_integer_zero(constraints))),
        FieldKind::Boolean => Some(Value::Bool(false)),
        FieldKind::Enum(values) => values.first().cloned(),
        FieldKind::Array(_) => Some(Value::Array(Vec::new())),
        FieldKind::Object(_) => Some(Value::Object(Map::new())),
        FieldKind::Null => Some(Value::Null),
        FieldKind::Binary | FieldKind::Union(_) => None,
    }
}

/// Zero, or the nearest admissible value when the declared range excludes
/// it. Exclusive bounds are stepped past by `multipleOf` (or 1); a range too
/// narrow for that falls back to its midpoint.
fn clamped_zero(constraints: &NumberConstraints) -> f64 {
    if constraints.admits(0.0) {
        return 0.0;
    }
    let nudge = constraints.step.unwrap_or(1.0);
    let zero_below_min = constraints.min.map_or(false, |min| {
        if constraints.exclusive_min {
            min >= 0.0
        } else {
            min > 0.0
        }
    });
    let candidate = match (constraints.min, constraints.max) {
        (Some(min), _) if zero_below_min => {
            if constraints.exclusive_min {
                min + nudge
            } else {
                min
            }
        }
        (_, Some(max)) => {
            if constraints.exclusive_max {
                max - nudge
            } else {
                max
            }
        }
        _ => 0.0,
    };
    match (constraints.min, constraints.max) {
        (Some(min), Some(max)) if !constraints.admits(candidate) => (min + max) / 2.0,
        _ => candidate,
    }
}

/// Zero pulled into the integers admitted by the declared range.
fn clamped_integer_zero(constraints: &NumberConstraints) -> i64 {
    let lowest = constraints.min.map(|min| {
        if constraints.exclusive_min {
            min.floor() as i64 + 1
        } else {
            min.ceil() as i64
        }
    });
    let highest = constraints.max.map(|max| {
        if constraints.exclusive_max {
            max.ceil() as i64 - 1
        } else {
            max.floor() as i64
        }
    });
    let mut value = 0_i64;
    if let Some(lowest) = lowest {
        value = value.max(lowest);
    }
    if let Some(highest) = highest {
        value = value.min(highest);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_placeholders() {
        assert_eq!(placeholder(&FieldKind::String), Some(json!("")));
        assert_eq!(placeholder(&FieldKind::Boolean), Some(json!(false)));
        assert_eq!(
            placeholder(&FieldKind::Integer(NumberConstraints::default())),
            Some(json!(0))
        );
        assert_eq!(
            placeholder(&FieldKind::Number(NumberConstraints::default())),
            Some(json!(0.0))
        );
        assert_eq!(placeholder(&FieldKind::Null), Some(Value::Null));
    }

    #[test]
    fn enum_uses_first_value() {
        let kind = FieldKind::Enum(vec![json!("red"), json!("green")]);
        assert_eq!(placeholder(&kind), Some(json!("red")));
        assert_eq!(placeholder(&FieldKind::Enum(Vec::new())), None);
    }

    #[test]
    fn binary_has_no_placeholder() {
        assert_eq!(placeholder(&FieldKind::Binary), None);
    }

    #[test]
    fn numbers_respect_declared_range() {
        let positive = NumberConstraints {
            min: Some(2.5),
            ..Default::default()
        };
        assert_eq!(placeholder(&FieldKind::Number(positive.clone())), Some(json!(2.5)));
        assert_eq!(placeholder(&FieldKind::Integer(positive)), Some(json!(3)));

        let negative = NumberConstraints {
            max: Some(-1.5),
            ..Default::default()
        };
        assert_eq!(placeholder(&FieldKind::Integer(negative)), Some(json!(-2)));
    }

    #[test]
    fn exclusive_bounds_are_stepped_past() {
        let positive = NumberConstraints {
            min: Some(0.0),
            exclusive_min: true,
            ..Default::default()
        };
        assert_eq!(placeholder(&FieldKind::Integer(positive.clone())), Some(json!(1)));
        assert_eq!(placeholder(&FieldKind::Number(positive)), Some(json!(1.0)));

        let fraction = NumberConstraints {
            min: Some(0.0),
            max: Some(0.5),
            exclusive_min: true,
            ..Default::default()
        };
        assert_eq!(placeholder(&FieldKind::Number(fraction)), Some(json!(0.25)));

        let negative = NumberConstraints {
            max: Some(-2.0),
            exclusive_max: true,
            step: Some(0.5),
            ..Default::default()
        };
        assert_eq!(placeholder(&FieldKind::Number(negative.clone())), Some(json!(-2.5)));
        assert_eq!(placeholder(&FieldKind::Integer(negative)), Some(json!(-3)));
    }
}
