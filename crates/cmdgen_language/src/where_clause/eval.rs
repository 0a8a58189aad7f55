//! Evaluation of where clauses against queryable subjects.
//!
//! A property that cannot be resolved as the literal's type makes its
//! condition false, whichever operator is used. Null literals instead test
//! presence: `x = null` holds when `x` is missing or null.

use std::cmp::Ordering;

use cmdgen_foundation::{Queryable, Value, ValueType};

use super::ast::{CompareOp, Condition, ConditionalStatement, Connective};

impl Condition {
    /// Evaluates this condition against `subject`.
    pub fn evaluate<Q: Queryable + ?Sized>(&self, subject: &Q) -> bool {
        if self.value.is_null() {
            let present = is_present(subject, &self.property);
            return match self.op {
                CompareOp::Eq => !present,
                CompareOp::Ne => present,
                _ => false,
            };
        }

        let Some(actual) = subject.lookup(&self.property, self.value_type()) else {
            return false;
        };
        if actual.value_type() != self.value_type() {
            return false;
        }
        let Some(ordering) = actual.compare(&self.value) else {
            // Unequal booleans do not order.
            return self.op == CompareOp::Ne && self.value_type() == ValueType::Bool;
        };
        match self.op {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
        }
    }
}

fn is_present<Q: Queryable + ?Sized>(subject: &Q, property: &str) -> bool {
    let native = subject.property(property).is_some_and(|v| !v.is_null());
    native
        || subject
            .properties()
            .and_then(|bag| bag.get(property))
            .is_some_and(|raw| Value::parse_as(raw, ValueType::Null).is_none())
}

impl ConditionalStatement {
    /// Evaluates the statement against `subject`.
    pub fn evaluate<Q: Queryable + ?Sized>(&self, subject: &Q) -> bool {
        match self {
            Self::Single(condition) => condition.evaluate(subject),
            Self::Not(inner) => !inner.evaluate(subject),
            Self::Binary { op, lhs, rhs } => match op {
                Connective::And => lhs.evaluate(subject) && rhs.evaluate(subject),
                Connective::Or => lhs.evaluate(subject) || rhs.evaluate(subject),
                Connective::Xor => lhs.evaluate(subject) != rhs.evaluate(subject),
                Connective::Not => !lhs.evaluate(subject),
            },
        }
    }
}
