use super::*;

#[test]
fn transition_parse_ignores_case() {
    for raw in ["BLEND", "blend", "Blend", "bLeNd"] {
        let parsed = TransitionName::parse(raw).expect("transition");
        assert_eq!(parsed, TransitionName::Blend);
        assert_eq!(parsed.display_name(), "Blend");
    }
}

#[test]
fn transition_table_has_six_entries_in_declared_order() {
    assert_eq!(
        TransitionName::keys(),
        vec!["none", "blend", "blur", "wipe", "slide", "glitch"]
    );
}

#[test]
fn effect_display_names_keep_inner_capitals() {
    assert_eq!(EffectName::parse("RGBSHIFT"), Some(EffectName::RgbShift));
    assert_eq!(EffectName::RgbShift.display_name(), "RgbShift");
    assert_eq!(EffectName::VignetteBlur.to_string(), "VignetteBlur");
    assert_eq!(EffectName::parse("sepia"), None);
}

#[test]
fn names_serialize_as_display_form() {
    let json = serde_json::to_string(&vec![EffectName::MotionBlur, EffectName::Bloom])
        .expect("json");
    assert_eq!(json, r#"["MotionBlur","Bloom"]"#);

    let transition: TransitionName = serde_json::from_str(r#""wipe""#).expect("parse");
    assert_eq!(transition, TransitionName::Wipe);
    assert!(serde_json::from_str::<TransitionName>(r#""fade""#).is_err());
}

#[test]
fn image_filename_is_a_plain_json_string() {
    let name = ImageFilename("sunset.jpg".to_string());
    assert_eq!(serde_json::to_string(&name).expect("json"), r#""sunset.jpg""#);
    assert_eq!(name, "sunset.jpg");
}
