use jm_utils::default;
use jm_value::{Object, Value};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::{Instance, Slot, TypeRegistry};

/// The recursive walk of a single serialization.
pub(super) struct Composer<'a> {
    registry: &'a TypeRegistry,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Composer<'a> {
    #[inline]
    pub(super) fn new(registry: &'a TypeRegistry, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { registry, sink }
    }

    pub(super) fn compose(&mut self, instance: &Instance) -> Value {
        if !self.registry.is_mappable(instance.type_path()) {
            self.sink.report(Diagnostic::NotMappable {
                type_path: instance.type_path(),
            });
            return Value::object();
        }
        self.compose_instance(instance)
    }

    fn compose_instance(&self, instance: &Instance) -> Value {
        #[cfg(feature = "debug")]
        log::trace!("composing `{}`", instance.type_path());

        let fields = self.registry.resolve_all(instance.type_path());
        let mut members: Object = default();
        for (name, slot) in instance.iter() {
            if fields.is_excluded(name) {
                continue;
            }
            let value = self.compose_slot(slot);
            if !value.is_absent() {
                members.insert(fields.external_key(name).into(), value);
            }
        }
        Value::Object(members)
    }

    fn compose_slot(&self, slot: &Slot) -> Value {
        match slot {
            Slot::Value(value) => compose_value(value),
            Slot::Model(instance) => self.compose_instance(instance),
            Slot::List(items) => items.iter().map(|item| self.compose_slot(item)).collect(),
            Slot::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, slot)| (key.clone(), self.compose_slot(slot)))
                    .filter(|(_, value)| !value.is_absent())
                    .collect(),
            ),
            Slot::Computed(_) => Value::Null,
        }
    }
}

fn compose_value(value: &Value) -> Value {
    match value {
        Value::Array(items) => items.iter().map(compose_value).collect(),
        Value::Object(members) => Value::Object(
            members
                .iter()
                .filter(|(_, value)| !value.is_absent())
                .map(|(key, value)| (key.clone(), compose_value(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}
