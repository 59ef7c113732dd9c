use alloc::rc::Rc;
use alloc::string::String;

use jm_utils::default;
use jm_utils::hash::HashMap;
use jm_value::{Value, from_json_str, parse_date, parse_float, parse_int};

use crate::de::Decoded;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::info::{FieldType, PropertyInfo, Shape};
use crate::meta::{FieldDecl, NumericMode};
use crate::registry::TypeMeta;
use crate::{Instance, Slot, TypeRegistry};

/// One field being coerced.
struct Field<'a> {
    owner: &'static str,
    name: &'static str,
    property: &'a PropertyInfo,
    decl: FieldDecl,
}

impl Field<'_> {
    /// The type values of this field are coerced to.
    ///
    /// Lists and maps of plain values are opaque unless a target is declared.
    fn expected(&self) -> FieldType {
        if let Some(target) = self.decl.target_type() {
            return target;
        }
        match (self.property.shape(), self.property.ty()) {
            (Shape::Single, ty) | (_, ty @ FieldType::Model(_)) => ty,
            _ => FieldType::Any,
        }
    }
}

/// The recursive walk of a single deserialization.
pub(super) struct Engine<'a> {
    registry: &'a TypeRegistry,
    sink: &'a mut dyn DiagnosticSink,
    /// Mapped fields per type, resolved on first use.
    plans: HashMap<&'static str, Rc<[Field<'a>]>>,
}

impl<'a> Engine<'a> {
    #[inline]
    pub(super) fn new(registry: &'a TypeRegistry, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            registry,
            sink,
            plans: default(),
        }
    }

    pub(super) fn decode(&mut self, input: &Value, type_path: &str) -> Decoded {
        if input.is_absent() {
            return Decoded::Absent;
        }

        let Some(meta) = self.registry.get(type_path) else {
            self.sink.report(Diagnostic::UnknownType {
                type_path: String::from(type_path),
            });
            return Decoded::Null;
        };

        #[cfg(feature = "debug")]
        log::trace!("decoding `{type_path}` from {}", input.kind());

        if input.is_null() && !meta.treat_null_as_default() {
            return Decoded::Null;
        }

        let Some(mut instance) = self.registry.instantiate(meta.path()) else {
            return Decoded::Null;
        };
        if meta.is_mappable() {
            self.fill(&mut instance, meta, input);
        }
        Decoded::Instance(instance)
    }

    fn fill(&mut self, instance: &mut Instance, meta: &TypeMeta, input: &Value) {
        let Some(members) = input.as_object() else {
            return;
        };

        let plan = self.plan(meta);
        for field in plan.iter() {
            let raw = match members.get(field.decl.key_or(field.name)) {
                None | Some(Value::Absent) => continue,
                Some(raw) => raw,
            };
            let Some(fallback) = instance.get(field.name) else {
                continue;
            };
            let slot = self.coerce(field, fallback, raw);
            instance.set(field.name, slot);
        }
    }

    /// Returns the writable mapped fields of `meta`, computed properties left out.
    fn plan(&mut self, meta: &TypeMeta) -> Rc<[Field<'a>]> {
        let owner = meta.path();
        if let Some(plan) = self.plans.get(owner) {
            return Rc::clone(plan);
        }

        let registry = self.registry;
        let plan: Rc<[Field<'a>]> = registry
            .resolve_all(owner)
            .iter()
            .filter_map(|(name, decl)| {
                let property = registry.property(owner, name)?;
                (!property.is_computed()).then(|| Field {
                    owner,
                    name,
                    property,
                    decl: decl.clone(),
                })
            })
            .collect();
        self.plans.insert(owner, Rc::clone(&plan));
        plan
    }

    fn coerce(&mut self, field: &Field<'_>, fallback: &Slot, raw: &Value) -> Slot {
        if raw.is_null() {
            return if field.decl.is_nullable() {
                Slot::null()
            } else {
                fallback.clone()
            };
        }

        let accepted = match field.expected() {
            FieldType::Number => number(field.decl.numeric_mode(), raw).map(Value::Number),
            FieldType::String => raw.is_string().then(|| raw.clone()),
            FieldType::Boolean => raw.as_bool().map(Value::Bool),
            FieldType::Date => parse_date(raw).map(Value::Date),
            FieldType::Any => Some(raw.clone()),
            FieldType::Model(path) if !self.registry.is_mappable(path) => Some(raw.clone()),
            FieldType::Model(path) => return self.coerce_model(field, path, fallback, raw),
        };

        match accepted {
            Some(value) => Slot::Value(value),
            None => mismatch(field, fallback, raw),
        }
    }

    fn coerce_model(&mut self, field: &Field<'_>, path: &str, fallback: &Slot, raw: &Value) -> Slot {
        let decoded;
        let raw = match raw {
            Value::String(text) if field.decl.is_string_encoded() => match from_json_str(text) {
                Ok(value) => {
                    decoded = value;
                    &decoded
                }
                Err(error) => {
                    self.sink.report(Diagnostic::InvalidEncodedString {
                        type_path: field.owner,
                        field: field.name,
                        error,
                    });
                    return fallback.clone();
                }
            },
            _ => raw,
        };

        if field.property.shape() == Shape::List {
            let Some(items) = raw.as_array() else {
                return mismatch(field, fallback, raw);
            };
            return Slot::List(
                items
                    .iter()
                    .map(|item| self.decode(item, path).into_slot())
                    .collect(),
            );
        }

        if field.decl.is_dynamic_keyed() || field.property.shape() == Shape::Map {
            let Some(members) = raw.as_object() else {
                return mismatch(field, fallback, raw);
            };
            return Slot::Map(
                members
                    .iter()
                    .map(|(key, value)| (key.clone(), self.decode(value, path).into_slot()))
                    .collect(),
            );
        }

        match raw {
            Value::Array(_) => mismatch(field, fallback, raw),
            _ => self.decode(raw, path).into_slot(),
        }
    }
}

fn number(mode: NumericMode, raw: &Value) -> Option<f64> {
    match mode {
        NumericMode::None => raw.as_number(),
        NumericMode::Int => parse_int(raw),
        NumericMode::Float => parse_float(raw),
    }
}

#[inline]
fn mismatch(field: &Field<'_>, fallback: &Slot, raw: &Value) -> Slot {
    log::debug!(
        "`{}.{}` cannot take {}, default kept",
        field.owner,
        field.name,
        raw.kind()
    );
    fallback.clone()
}
