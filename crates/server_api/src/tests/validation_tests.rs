use super::*;

#[test]
fn transition_validation_canonicalizes_any_casing() {
    for raw in ["BLEND", "blend", "Blend"] {
        let transition = validate_transition(raw).expect("valid");
        assert_eq!(transition.display_name(), "Blend");
    }
}

#[test]
fn unknown_transition_lists_all_six_names() {
    let err = validate_transition("fade").expect_err("should fail");
    assert_eq!(err, ValidationError::InvalidTransition);
    let message = err.to_string();
    for name in ["none", "blend", "blur", "wipe", "slide", "glitch"] {
        assert!(message.contains(name), "{message} should list {name}");
    }
}

#[test]
fn empty_effects_are_rejected() {
    let none: [&str; 0] = [];
    assert_eq!(validate_effects(&none), Err(ValidationError::InvalidEffects));
}

#[test]
fn effects_keep_request_order() {
    let effects = validate_effects(&["blur", "BLOOM"]).expect("valid");
    let names: Vec<_> = effects.iter().map(|e| e.display_name()).collect();
    assert_eq!(names, vec!["Blur", "Bloom"]);
}

#[test]
fn one_unknown_effect_rejects_the_whole_list() {
    let err = validate_effects(&["blur", "sepia"]).expect_err("should fail");
    assert_eq!(err, ValidationError::InvalidEffects);
    assert_eq!(
        err.to_string(),
        "Available effects: blur, bloom, rgbshift, vignette, vignetteblur, motionblur, glitch"
    );
}

#[test]
fn goto_requires_an_image_name() {
    assert_eq!(
        require_image(None),
        Err(ValidationError::MissingParameter("image name"))
    );
    assert_eq!(
        require_image(Some("")),
        Err(ValidationError::MissingParameter("image name"))
    );
    assert_eq!(require_image(Some("sunset.jpg")), Ok("sunset.jpg"));
}

#[test]
fn goto_rejects_images_outside_catalog() {
    let catalog = vec![
        ImageFilename("beach.png".into()),
        ImageFilename("sunset.jpg".into()),
    ];
    let err = validate_goto("missing.png", &catalog).expect_err("should fail");
    assert_eq!(
        err,
        ValidationError::ImageNotFound {
            catalog: catalog.clone()
        }
    );
    assert_eq!(err.to_string(), "Image not listed in beach.png, sunset.jpg");

    let image = validate_goto("sunset.jpg", &catalog).expect("valid");
    assert_eq!(image, "sunset.jpg");
}

#[test]
fn lenient_config_accepts_both_sides() {
    let config = validate_config(Some("wipe"), &["vignette", "glitch"], ConfigPolicy::Lenient)
        .expect("valid");
    assert_eq!(config.transition, Some(TransitionName::Wipe));
    assert_eq!(
        config.effects,
        Some(vec![EffectName::Vignette, EffectName::Glitch])
    );
}

#[test]
fn lenient_config_rejects_only_when_both_sides_are_invalid() {
    let err = validate_config(Some("bogus"), &["bogus"], ConfigPolicy::Lenient)
        .expect_err("should fail");
    assert_eq!(err, ValidationError::InvalidConfig);

    let missing: [&str; 0] = [];
    let err = validate_config(None, &missing, ConfigPolicy::Lenient).expect_err("should fail");
    assert_eq!(err, ValidationError::InvalidConfig);
}

#[test]
fn lenient_config_drops_the_invalid_side() {
    let config =
        validate_config(Some("bogus"), &["blur"], ConfigPolicy::Lenient).expect("accepted");
    assert_eq!(config.transition, None);
    assert_eq!(config.effects, Some(vec![EffectName::Blur]));

    let missing: [&str; 0] = [];
    let config = validate_config(Some("SLIDE"), &missing, ConfigPolicy::Lenient).expect("accepted");
    assert_eq!(config.transition, Some(TransitionName::Slide));
    assert_eq!(config.effects, None);
}

#[test]
fn strict_config_rejects_either_invalid_side() {
    let err =
        validate_config(Some("bogus"), &["blur"], ConfigPolicy::Strict).expect_err("should fail");
    assert_eq!(err, ValidationError::InvalidTransition);

    let err =
        validate_config(Some("blend"), &["sepia"], ConfigPolicy::Strict).expect_err("should fail");
    assert_eq!(err, ValidationError::InvalidEffects);

    let err = validate_config(None, &["sepia"], ConfigPolicy::Strict).expect_err("should fail");
    assert_eq!(err, ValidationError::InvalidConfig);

    let config = validate_config(Some("blend"), &["bloom"], ConfigPolicy::Strict).expect("valid");
    assert_eq!(config.transition, Some(TransitionName::Blend));
}

#[test]
fn policy_parses_from_settings_strings() {
    assert_eq!(ConfigPolicy::parse("Strict"), Some(ConfigPolicy::Strict));
    assert_eq!(ConfigPolicy::parse(" lenient "), Some(ConfigPolicy::Lenient));
    assert_eq!(ConfigPolicy::parse("and"), None);
    assert_eq!(ConfigPolicy::default(), ConfigPolicy::Lenient);
}
