//! Tests for the dynamic model evaluator.
mod common;
use common::*;
use keisei::prelude::*;
use serde_json::json;

#[test]
fn test_static_hidden_flag() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let mut model = text_field("t", "firstName");
    model.hidden = true;

    let resolved = resolver.resolve(&model, &customer_context(30));
    assert!(resolved.hidden);
}

#[test]
fn test_visibility_expression_decides() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let mut model = text_field("t", "firstName");
    model.custom_visibility = Some("data.age >= 18".to_string());

    let resolved = resolver.resolve(&model, &customer_context(30));
    assert!(!resolved.hidden);

    let resolved = resolver.resolve(&model, &customer_context(10));
    assert!(resolved.hidden);
}

#[test]
fn test_designer_mode_never_hides() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let mut model = text_field("t", "firstName");
    model.hidden = true;
    model.custom_visibility = Some("false".to_string());

    let ctx = customer_context(10).with_mode(FormMode::Designer);
    let resolved = resolver.resolve(&model, &ctx);
    assert!(!resolved.hidden);
}

#[test]
fn test_broken_visibility_script_falls_open() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let mut model = text_field("t", "firstName");
    model.custom_visibility = Some("data.age >=".to_string());

    let resolved = resolver.resolve(&model, &customer_context(30));
    assert!(!resolved.hidden);
}

#[test]
fn test_enablement_expression_disables() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let mut model = text_field("t", "firstName");
    model.custom_enabled = Some("data.age >= 18".to_string());

    let resolved = resolver.resolve(&model, &customer_context(10));
    assert!(resolved.disabled);

    let resolved = resolver.resolve(&model, &customer_context(30));
    assert!(!resolved.disabled);
}

#[test]
fn test_readonly_mode_forces_components() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let ctx = customer_context(30).with_mode(FormMode::Readonly);

    let resolved = resolver.resolve(&text_field("t", "firstName"), &ctx);
    assert!(resolved.read_only);

    // Password inputs keep their editor active in a readonly form.
    let mut password = text_field("p", "secret");
    password.set_property("textType", json!("password"));
    let resolved = resolver.resolve(&password, &ctx);
    assert!(!resolved.read_only);
}

#[test]
fn test_label_and_property_interpolation() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let mut model = text_field("t", "firstName");
    model.label = Some("Name of {data.customer.name}".to_string());
    model.set_property("placeholder", json!("Enter {data.missing} here"));

    let resolved = resolver.resolve(&model, &customer_context(30));
    assert_eq!(resolved.model.label.as_deref(), Some("Name of Ada"));
    assert_eq!(
        resolved.model.property_str("placeholder"),
        Some("Enter  here")
    );
}

#[test]
fn test_style_expression() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);

    let mut model = text_field("t", "firstName");
    model.style = Some("'width: 100px'".to_string());
    let resolved = resolver.resolve(&model, &customer_context(30));
    assert_eq!(resolved.style, "width: 100px");

    // A faulting style script degrades to no styling.
    model.style = Some("data.age +".to_string());
    let resolved = resolver.resolve(&model, &customer_context(30));
    assert_eq!(resolved.style, "");
}

#[test]
fn test_cache_recomputes_on_changed_inputs() {
    let registry = ComponentRegistry::with_defaults();
    let resolver = ModelResolver::new(&registry);
    let mut cache = ResolveCache::new();

    let mut model = text_field("t", "firstName");
    model.custom_visibility = Some("data.age >= 18".to_string());

    let adult = customer_context(30);
    let first = resolver.resolve_cached(&mut cache, &model, &adult);
    assert!(!first.hidden);
    assert_eq!(cache.len(), 1);

    let second = resolver.resolve_cached(&mut cache, &model, &adult);
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);

    // A changed record invalidates the hit by equality.
    let minor = customer_context(10);
    let third = resolver.resolve_cached(&mut cache, &model, &minor);
    assert!(third.hidden);
}

#[test]
fn test_render_form_skips_hidden_and_unknown() {
    let registry = ComponentRegistry::with_defaults();
    let mut cache = ResolveCache::new();

    let mut hidden = text_field("hidden", "a");
    hidden.hidden = true;
    let markup = FormMarkup::new(vec![
        text_field("visible", "b"),
        hidden,
        ComponentModel::new("mystery", "holographicChart"),
    ]);

    let output = render_form(&registry, &mut cache, markup, &customer_context(30));

    assert!(output.migration_failures.is_empty());
    assert_eq!(output.components.len(), 1);
    assert_eq!(output.components[0].id, "visible");
    assert_eq!(output.components[0].widget, "text-input");
    println!("rendered props: {}", output.components[0].props);
}
