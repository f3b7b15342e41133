//! Registry loading from JSON definition sources.
//!
//! A JSON-loaded registry must behave exactly like the same registry built
//! in code: the definitions are pure data and the loader adds nothing.

use glaze_mixin::{
    Condition, MacroSource, MixinDef, MixinItem, MixinRegistry, ParamKey, ParameterSet, Value,
};

const DEFS: &str = r#"[
  {
    "name": "ForwardShading",
    "items": [
      {"Mixin": "ShadingBase"},
      {"If": {
        "cond": {"Flag": {"name": "EnableShadows", "default": {"Bool": false}}},
        "then_items": [
          {"Fragment": "ShadowMapReceiver"},
          {"Macro": {"name": "SHADOWS", "source": {"Value": {"Int": 1}}}}
        ],
        "else_items": []
      }},
      {"Compose": {"slot": "light", "items": [{"Mixin": "PointLightGroup"}]}}
    ]
  }
]"#;

fn enable_shadows() -> ParamKey {
    ParamKey::new("EnableShadows", Value::Bool(false))
}

fn code_registry() -> MixinRegistry {
    let mut registry = MixinRegistry::new();
    registry.register(MixinDef::new(
        "ForwardShading",
        vec![
            MixinItem::Mixin("ShadingBase".into()),
            MixinItem::If {
                cond: Condition::Flag(enable_shadows()),
                then_items: vec![
                    MixinItem::Fragment("ShadowMapReceiver".into()),
                    MixinItem::Macro {
                        name: "SHADOWS".into(),
                        source: MacroSource::Value(Value::Int(1)),
                    },
                ],
                else_items: vec![],
            },
            MixinItem::Compose {
                slot: "light".into(),
                items: vec![MixinItem::Mixin("PointLightGroup".into())],
            },
        ],
    ));
    registry
}

#[test]
fn json_registry_matches_code_built_registry() {
    let loaded = MixinRegistry::from_json(DEFS).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get("ForwardShading"), code_registry().get("ForwardShading"));
}

#[test]
fn json_registry_generates_identically() {
    let loaded = MixinRegistry::from_json(DEFS).unwrap();
    let built = code_registry();

    let defaults = ParameterSet::new();
    assert_eq!(
        loaded.generate("ForwardShading", &defaults).unwrap(),
        built.generate("ForwardShading", &defaults).unwrap()
    );

    let mut params = ParameterSet::new();
    params.set(&enable_shadows(), Value::Bool(true)).unwrap();
    let result = loaded.generate("ForwardShading", &params).unwrap();
    assert_eq!(result.mixins, ["ShadingBase", "ShadowMapReceiver"]);
    assert_eq!(result.macros["SHADOWS"], Value::Int(1));
    assert_eq!(
        result.compositions["light"].to_string(),
        "mixin PointLightGroup"
    );
}
