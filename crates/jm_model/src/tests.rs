use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use jm_value::{Value, to_json_string};
use serde_core::de::DeserializeSeed;
use serde_json::json;

use crate::diagnostics::Silent;
use crate::info::{FieldType, Init, PropertyInfo, TypeInfo};
use crate::meta::FieldDecl;
use crate::registry::{TypeDecl, TypeOptions};
use crate::{
    Decoded, DeserializeDriver, Diagnostic, Instance, SerializeDriver, Slot, TypeRegistry,
    clone_model, clone_model_with, deserialize, serialize,
};

// -----------------------------------------------------------------------------
// Fixtures

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn decode(registry: &TypeRegistry, type_path: &str, json: serde_json::Value) -> Instance {
    DeserializeDriver::with_sink(type_path, registry, &mut Silent)
        .decode(&value(json))
        .into_instance()
        .unwrap()
}

fn users() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Address")
                .mappable()
                .field(PropertyInfo::string("label", ""), FieldDecl::new().key("label"))
                .field(PropertyInfo::string("street", ""), FieldDecl::new().key("the_address")),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("User")
                .mappable()
                .field(PropertyInfo::string("name", ""), FieldDecl::new())
                .field(PropertyInfo::number("age", 0.0), FieldDecl::new())
                .field(PropertyInfo::model("address", "Address"), FieldDecl::new()),
        )
        .unwrap();
    registry
}

fn orders() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Item")
                .mappable()
                .field(PropertyInfo::string("sku", ""), FieldDecl::new())
                .field(PropertyInfo::number("qty", 1.0), FieldDecl::new().parse_int()),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Order")
                .mappable()
                .field(PropertyInfo::list("items", FieldType::Model("Item")), FieldDecl::new())
                .field(PropertyInfo::list("tags", FieldType::String), FieldDecl::new())
                .field(
                    PropertyInfo::map("by_code", FieldType::Model("Item")),
                    FieldDecl::new().key("byCode").dynamic_keyed(),
                ),
        )
        .unwrap();
    registry
}

// -----------------------------------------------------------------------------
// Deserialization

#[test]
fn renamed_nested_fields_round_trip() {
    let registry = users();
    let text = r#"{"name":"A","age":30,"address":{"label":"Home","the_address":"Earth"}}"#;
    let input = jm_value::from_json_str(text).unwrap();

    let user = deserialize(&input, "User", &registry).into_instance().unwrap();
    assert_eq!(user.type_path(), "User");
    assert_eq!(user.str("name"), Some("A"));
    assert_eq!(user.number("age"), Some(30.0));

    let address = user.model("address").unwrap();
    assert_eq!(address.str("label"), Some("Home"));
    assert_eq!(address.str("street"), Some("Earth"));

    let output = serialize(&user, &registry);
    assert_eq!(output, input);
    assert_eq!(to_json_string(&output).unwrap(), text);
}

#[test]
fn missing_keys_keep_defaults() {
    let registry = users();
    let user = decode(&registry, "User", json!({ "name": "B", "street": "ignored" }));

    assert_eq!(user.str("name"), Some("B"));
    assert_eq!(user.number("age"), Some(0.0));
    assert_eq!(user.model("address").unwrap().str("street"), Some(""));
}

#[test]
fn forced_numeric_parsing() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Counter")
                .mappable()
                .field(PropertyInfo::number("count", 1.0), FieldDecl::new().parse_int())
                .field(PropertyInfo::number("ratio", 0.5), FieldDecl::new().parse_float())
                .field(PropertyInfo::number("plain", 2.0), FieldDecl::new()),
        )
        .unwrap();

    let count = |json| decode(&registry, "Counter", json).number("count");
    assert_eq!(count(json!({ "count": "20.9" })), Some(20.0));
    assert_eq!(count(json!({ "count": "abc" })), Some(1.0));
    assert_eq!(count(json!({ "count": [] })), Some(1.0));
    assert_eq!(count(json!({ "count": 7.8 })), Some(7.0));
    assert_eq!(count(json!({ "count": "-3" })), Some(-3.0));

    let ratio = |json| decode(&registry, "Counter", json).number("ratio");
    assert_eq!(ratio(json!({ "ratio": "10.12" })), Some(10.12));
    assert_eq!(ratio(json!({ "ratio": "x" })), Some(0.5));

    let plain = |json| decode(&registry, "Counter", json).number("plain");
    assert_eq!(plain(json!({ "plain": "3" })), Some(2.0));
    assert_eq!(plain(json!({ "plain": 3 })), Some(3.0));
}

#[test]
fn scalars_require_their_own_kind() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Flags")
                .mappable()
                .field(PropertyInfo::boolean("on", false), FieldDecl::new())
                .field(PropertyInfo::string("label", "none"), FieldDecl::new())
                .field(PropertyInfo::any("extra"), FieldDecl::new()),
        )
        .unwrap();

    let flags = decode(&registry, "Flags", json!({ "on": "true", "label": 5, "extra": [1, { "a": 2 }] }));
    assert_eq!(flags.bool("on"), Some(false));
    assert_eq!(flags.str("label"), Some("none"));
    assert_eq!(flags.value("extra"), Some(&value(json!([1, { "a": 2 }]))));

    let flags = decode(&registry, "Flags", json!({ "on": true, "label": "x" }));
    assert_eq!(flags.bool("on"), Some(true));
    assert_eq!(flags.str("label"), Some("x"));
}

#[test]
fn dates_are_parsed_and_written_back() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Event")
                .mappable()
                .field(PropertyInfo::date("at"), FieldDecl::new().key("when")),
        )
        .unwrap();

    let event = decode(&registry, "Event", json!({ "when": "2020-02-29 12:30:05" }));
    assert!(event.date("at").is_some());
    assert_eq!(
        to_json_string(&serialize(&event, &registry)).unwrap(),
        r#"{"when":"2020-02-29T12:30:05.000Z"}"#
    );

    let event = decode(&registry, "Event", json!({ "when": "later" }));
    assert!(event.value("at").unwrap().is_null());
}

#[test]
fn dynamic_keyed_maps() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("A")
                .mappable()
                .field(PropertyInfo::string("a", ""), FieldDecl::new()),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Holder")
                .mappable()
                .field(
                    PropertyInfo::map("entries", FieldType::Model("A")),
                    FieldDecl::new().dynamic_keyed(),
                ),
        )
        .unwrap();

    let input = json!({ "entries": { "x": { "a": "1" }, "y": { "a": "2" } } });
    let holder = decode(&registry, "Holder", input.clone());

    let entries = holder.map("entries").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["x"].as_model().unwrap().str("a"), Some("1"));
    assert_eq!(entries["y"].as_model().unwrap().str("a"), Some("2"));

    assert_eq!(serialize(&holder, &registry), value(input));

    let holder = decode(&registry, "Holder", json!({ "entries": [1, 2] }));
    assert!(holder.map("entries").unwrap().is_empty());
}

#[test]
fn three_level_inheritance() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Base")
                .mappable()
                .field(PropertyInfo::number("id", 0.0), FieldDecl::new().key("ID")),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Mid")
                .extends("Base")
                .mappable()
                .field(PropertyInfo::string("name", ""), FieldDecl::new()),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Leaf")
                .extends("Mid")
                .mappable()
                .field(PropertyInfo::boolean("flag", false), FieldDecl::new())
                .map_inherited("id", FieldDecl::new().key("leaf_id")),
        )
        .unwrap();

    let input = json!({ "leaf_id": 9, "ID": 1, "name": "n", "flag": true });
    let leaf = decode(&registry, "Leaf", input.clone());
    assert_eq!(leaf.number("id"), Some(9.0));
    assert_eq!(leaf.str("name"), Some("n"));
    assert_eq!(leaf.bool("flag"), Some(true));
    assert_eq!(
        to_json_string(&serialize(&leaf, &registry)).unwrap(),
        r#"{"leaf_id":9,"name":"n","flag":true}"#
    );

    let mid = decode(&registry, "Mid", input);
    assert_eq!(mid.number("id"), Some(1.0));
    assert!(!mid.contains("flag"));
}

#[test]
fn mappability_is_per_type() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Base")
                .mappable()
                .field(PropertyInfo::number("id", 0.0), FieldDecl::new()),
        )
        .unwrap();
    registry.declare(TypeInfo::new("Loose").extends("Base")).unwrap();

    let loose = decode(&registry, "Loose", json!({ "id": 3 }));
    assert_eq!(loose.type_path(), "Loose");
    assert_eq!(loose.number("id"), Some(0.0));
}

#[test]
fn null_and_absent_inputs() {
    let mut registry = users();
    registry
        .register(
            TypeDecl::new("Lenient")
                .options(TypeOptions::new().treat_null_as_default())
                .field(PropertyInfo::number("n", 4.0), FieldDecl::new()),
        )
        .unwrap();

    assert!(deserialize(&Value::Null, "User", &registry).is_null());
    assert!(deserialize(&Value::Absent, "User", &registry).is_absent());
    assert!(deserialize(&Value::Absent, "Lenient", &registry).is_absent());

    let lenient = deserialize(&Value::Null, "Lenient", &registry);
    assert_eq!(lenient, Decoded::Instance(registry.instantiate("Lenient").unwrap()));

    let mut sink: Vec<Diagnostic> = Vec::new();
    let ghost = DeserializeDriver::with_sink("Ghost", &registry, &mut sink).decode(&Value::object());
    assert!(ghost.is_null());
    assert_eq!(
        sink,
        [Diagnostic::UnknownType {
            type_path: String::from("Ghost")
        }]
    );
}

#[test]
fn non_object_input_keeps_defaults() {
    let registry = users();
    let user = decode(&registry, "User", json!([1, 2]));
    assert_eq!(user, registry.instantiate("User").unwrap());
}

#[test]
fn nullable_fields() {
    let mut registry = users();
    registry
        .register(
            TypeDecl::new("Profile")
                .mappable()
                .field(PropertyInfo::model("address", "Address"), FieldDecl::new().nullable())
                .field(PropertyInfo::string("bio", "none"), FieldDecl::new().nullable()),
        )
        .unwrap();

    let user = decode(&registry, "User", json!({ "address": null, "name": null }));
    assert_eq!(user.model("address").unwrap().str("label"), Some(""));
    assert_eq!(user.str("name"), Some(""));

    let profile = decode(&registry, "Profile", json!({ "address": null, "bio": null }));
    assert!(profile.get("address").unwrap().is_null());
    assert!(profile.get("bio").unwrap().is_null());
}

#[test]
fn nested_null_uses_nested_contract() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Inner")
                .options(TypeOptions::new().treat_null_as_default())
                .field(PropertyInfo::number("n", 4.0), FieldDecl::new()),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Outer")
                .mappable()
                .field(PropertyInfo::list("inners", FieldType::Model("Inner")), FieldDecl::new()),
        )
        .unwrap();

    let outer = decode(&registry, "Outer", json!({ "inners": [null, { "n": 1 }] }));
    let inners = outer.list("inners").unwrap();
    assert_eq!(inners[0].as_model().unwrap().number("n"), Some(4.0));
    assert_eq!(inners[1].as_model().unwrap().number("n"), Some(1.0));
}

#[test]
fn single_nested_field_keeps_fallback_for_arrays_only() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Person")
                .mappable()
                .field(PropertyInfo::string("name", "anonymous"), FieldDecl::new()),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Committee")
                .mappable()
                .field(
                    PropertyInfo::model("chair", "Person").with_init(Init::value(Value::Null)),
                    FieldDecl::new().key("chair_man"),
                ),
        )
        .unwrap();

    let committee = decode(&registry, "Committee", json!({ "chair_man": [{ "name": "WINNIE" }] }));
    assert!(committee.get("chair").unwrap().is_null());

    let committee = decode(&registry, "Committee", json!({ "chair_man": { "name": "WINNIE" } }));
    assert_eq!(committee.model("chair").unwrap().str("name"), Some("WINNIE"));

    for payload in [json!(5), json!("WINNIE"), json!(true)] {
        let committee = decode(&registry, "Committee", json!({ "chair_man": payload.clone() }));
        let chair = committee.model("chair").unwrap();
        assert_eq!(chair.type_path(), "Person");
        assert_eq!(chair.str("name"), Some("anonymous"));

        let direct = decode(&registry, "Person", payload);
        assert_eq!(chair, &direct);
    }
}

#[test]
fn field_keys_are_resolved_per_type() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Part")
                .mappable()
                .field(PropertyInfo::string("code", ""), FieldDecl::new().key("part_code")),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Kit")
                .extends("Part")
                .mappable()
                .field(PropertyInfo::string("code", ""), FieldDecl::new().key("kit_code"))
                .field(PropertyInfo::list("parts", FieldType::Model("Part")), FieldDecl::new()),
        )
        .unwrap();

    let kit = decode(
        &registry,
        "Kit",
        json!({
            "kit_code": "K",
            "part_code": "ignored",
            "parts": [{ "part_code": "P1", "kit_code": "x" }, { "part_code": "P2" }],
        }),
    );
    assert_eq!(kit.str("code"), Some("K"));

    let parts = kit.list("parts").unwrap();
    assert_eq!(parts[0].as_model().unwrap().str("code"), Some("P1"));
    assert_eq!(parts[1].as_model().unwrap().str("code"), Some("P2"));
}

#[test]
fn list_fields() {
    let registry = orders();
    let order = decode(
        &registry,
        "Order",
        json!({ "items": [{ "sku": "a", "qty": "2" }, null, 3, { "sku": 5 }], "tags": ["x", 1] }),
    );

    let items = order.list("items").unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].as_model().unwrap().str("sku"), Some("a"));
    assert_eq!(items[0].as_model().unwrap().number("qty"), Some(2.0));
    assert!(items[1].is_null());
    assert_eq!(items[2].as_model().unwrap().str("sku"), Some(""));
    assert_eq!(items[3].as_model().unwrap().str("sku"), Some(""));
    assert_eq!(items[3].as_model().unwrap().number("qty"), Some(1.0));

    assert_eq!(order.value("tags"), Some(&value(json!(["x", 1]))));

    for payload in [json!({ "sku": "a" }), json!(null), json!("x")] {
        let order = decode(&registry, "Order", json!({ "items": payload }));
        assert!(order.list("items").unwrap().is_empty());
    }
}

#[test]
fn string_encoded_payloads() {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Inner")
                .mappable()
                .field(PropertyInfo::number("n", 0.0), FieldDecl::new()),
        )
        .unwrap();
    registry
        .register(
            TypeDecl::new("Wrapper")
                .mappable()
                .field(PropertyInfo::model("payload", "Inner"), FieldDecl::new().string_encoded())
                .field(
                    PropertyInfo::list("batch", FieldType::Model("Inner")),
                    FieldDecl::new().string_encoded(),
                ),
        )
        .unwrap();

    let wrapper = decode(
        &registry,
        "Wrapper",
        json!({ "payload": "{\"n\": 3}", "batch": "[{\"n\":1},{\"n\":2}]" }),
    );
    assert_eq!(wrapper.model("payload").unwrap().number("n"), Some(3.0));
    assert_eq!(wrapper.list("batch").unwrap().len(), 2);

    let wrapper = decode(&registry, "Wrapper", json!({ "payload": { "n": 4 } }));
    assert_eq!(wrapper.model("payload").unwrap().number("n"), Some(4.0));

    let wrapper = decode(&registry, "Wrapper", json!({ "payload": "null" }));
    assert!(wrapper.get("payload").unwrap().is_null());

    let mut sink: Vec<Diagnostic> = Vec::new();
    let input = value(json!({ "payload": "{oops" }));
    let wrapper = DeserializeDriver::with_sink("Wrapper", &registry, &mut sink)
        .decode(&input)
        .into_instance()
        .unwrap();
    assert_eq!(wrapper.model("payload").unwrap().number("n"), Some(0.0));
    assert!(matches!(
        sink.as_slice(),
        [Diagnostic::InvalidEncodedString {
            type_path: "Wrapper",
            field: "payload",
            ..
        }]
    ));
}

#[test]
fn opaque_nested_types_pass_through() {
    let mut registry = TypeRegistry::new();
    registry
        .declare(TypeInfo::new("Opaque").with_property(PropertyInfo::string("k", "x")))
        .unwrap();
    registry
        .register_field("Opaque", "k", FieldDecl::new().key("K"))
        .unwrap();
    registry
        .register(
            TypeDecl::new("Holder")
                .mappable()
                .field(PropertyInfo::model("opaque", "Opaque"), FieldDecl::new()),
        )
        .unwrap();

    let holder = decode(&registry, "Holder", json!({ "opaque": { "z": 1 } }));
    assert_eq!(holder.value("opaque"), Some(&value(json!({ "z": 1 }))));
    assert_eq!(serialize(&holder, &registry), value(json!({ "opaque": { "z": 1 } })));

    let mut sink: Vec<Diagnostic> = Vec::new();
    let holder = registry.instantiate("Holder").unwrap();
    let output = SerializeDriver::with_sink(&holder, &registry, &mut sink).to_value();
    assert_eq!(output, value(json!({ "opaque": { "K": "x" } })));
    assert!(sink.is_empty());
}

// -----------------------------------------------------------------------------
// Serialization

fn secrets() -> TypeRegistry {
    fn full_name(person: &Instance) -> Value {
        let first = person.str("first").unwrap_or_default();
        let last = person.str("last").unwrap_or_default();
        Value::from(format!("{first} {last}"))
    }

    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDecl::new("Person")
                .mappable()
                .field(PropertyInfo::string("first", ""), FieldDecl::new())
                .field(PropertyInfo::string("last", ""), FieldDecl::new())
                .field(PropertyInfo::string("password", ""), FieldDecl::new().excluded())
                .property(PropertyInfo::string("note", "n/a"))
                .property(PropertyInfo::computed("full", full_name)),
        )
        .unwrap();
    registry
        .register(TypeDecl::new("Admin").extends("Person").mappable().exclude("note"))
        .unwrap();
    registry
}

#[test]
fn excluded_computed_and_unmapped_fields() {
    let registry = secrets();
    let person = decode(
        &registry,
        "Person",
        json!({ "first": "A", "last": "B", "password": "pw", "note": "ignored" }),
    );

    assert_eq!(person.str("password"), Some("pw"));
    assert_eq!(person.str("note"), Some("n/a"));
    assert_eq!(person.computed("full"), Some(Value::from("A B")));

    assert_eq!(
        to_json_string(&serialize(&person, &registry)).unwrap(),
        r#"{"first":"A","last":"B","note":"n/a","full":null}"#
    );

    let admin = registry.instantiate("Admin").unwrap();
    assert_eq!(
        to_json_string(&serialize(&admin, &registry)).unwrap(),
        r#"{"first":"","last":"","full":null}"#
    );
}

#[test]
fn non_mappable_top_level_is_empty() {
    let mut registry = TypeRegistry::new();
    registry
        .declare(TypeInfo::new("Plain").with_property(PropertyInfo::number("n", 1.0)))
        .unwrap();

    let plain = registry.instantiate("Plain").unwrap();
    let mut sink: Vec<Diagnostic> = Vec::new();
    let output = SerializeDriver::with_sink(&plain, &registry, &mut sink).to_value();

    assert_eq!(output, Value::object());
    assert_eq!(sink, [Diagnostic::NotMappable { type_path: "Plain" }]);
}

#[test]
fn absent_slots_are_omitted() {
    let registry = users();
    let mut user = registry.instantiate("User").unwrap();
    user.set("name", Slot::Value(Value::Absent));
    user.set("age", Slot::value(Value::from_iter([Value::from(1), Value::Absent])));

    assert_eq!(
        to_json_string(&serialize(&user, &registry)).unwrap(),
        r#"{"age":[1,null],"address":{"label":"","the_address":""}}"#
    );
}

// -----------------------------------------------------------------------------
// Round trips and clones

#[test]
fn second_pass_is_stable() {
    let registry = orders();
    let input = value(json!({
        "items": [{ "sku": "a", "qty": "2.5" }, null, "junk"],
        "tags": ["t"],
        "byCode": { "x": { "sku": "x", "qty": 3 }, "y": 7 },
        "unknown": true
    }));

    let first = deserialize(&input, "Order", &registry);
    let Decoded::Instance(order) = &first else {
        panic!("expected an instance");
    };
    let second = deserialize(&serialize(order, &registry), "Order", &registry);
    assert_eq!(first, second);
}

#[test]
fn clones_are_independent() {
    let registry = users();
    let mut user = decode(
        &registry,
        "User",
        json!({ "name": "A", "address": { "label": "Home" } }),
    );

    let copy = clone_model(Some(&user), &registry).unwrap();
    assert_eq!(copy, user);

    user.model_mut("address")
        .unwrap()
        .set("label", Slot::value("Work"));
    assert_eq!(copy.model("address").unwrap().str("label"), Some("Home"));

    assert!(clone_model(None, &registry).is_none());
}

#[test]
fn clones_follow_serialization_rules() {
    let registry = secrets();
    let person = decode(
        &registry,
        "Person",
        json!({ "first": "A", "last": "B", "password": "pw" }),
    );

    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut copy = clone_model_with(Some(&person), &registry, &mut sink).unwrap();
    assert!(sink.is_empty());
    assert_eq!(copy.str("password"), Some(""));
    assert_eq!(copy.computed("full"), Some(Value::from("A B")));

    copy.set("first", Slot::value("C"));
    assert_eq!(copy.computed("full"), Some(Value::from("C B")));
    assert_eq!(person.computed("full"), Some(Value::from("A B")));
}

// -----------------------------------------------------------------------------
// serde and sharing

#[test]
fn serde_driver_bridges() {
    let registry = users();
    let text = r#"{"name":"A","age":30,"address":{"label":"Home","the_address":"Earth"}}"#;

    let mut de = serde_json::Deserializer::from_str(text);
    let user = DeserializeDriver::new("User", &registry)
        .deserialize(&mut de)
        .unwrap()
        .into_instance()
        .unwrap();
    assert_eq!(user.model("address").unwrap().str("street"), Some("Earth"));

    let output = serde_json::to_string(&SerializeDriver::new(&user, &registry)).unwrap();
    assert_eq!(output, text);
}

#[cfg(feature = "std")]
#[test]
fn shared_registry_across_threads() {
    use crate::registry::TypeRegistryArc;

    let registry = TypeRegistryArc::new(users());
    std::thread::scope(|scope| {
        for age in 0..4 {
            let registry = &registry;
            scope.spawn(move || {
                let registry = registry.read();
                let user = decode(&registry, "User", json!({ "age": age }));
                assert_eq!(user.number("age"), Some(f64::from(age)));
            });
        }
    });

    registry
        .write()
        .declare(TypeInfo::new("Later"))
        .unwrap();
    assert!(registry.read().contains("Later"));
}
