//! Integration tests for Keisei
//!
//! End-to-end tests that verify the complete functionality works together.
//!
mod common;
use common::*;
use keisei::prelude::*;
use serde_json::json;
use std::fs;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_markup_load_migrate_render() {
        let markup = FormMarkup::from_json(sample_markup_json()).expect("failed to parse markup");
        assert_eq!(markup.len(), 3);

        let registry = ComponentRegistry::with_defaults();
        let ctx = customer_context(30);
        let mut cache = ResolveCache::new();

        let output = render_form(&registry, &mut cache, markup, &ctx);

        assert!(output.migration_failures.is_empty());
        assert_eq!(output.components.len(), 3);

        println!("Rendered components:");
        for component in &output.components {
            println!("  {} [{}]", component.id, component.widget);
        }

        // The legacy `name` property was carried into the first-class field.
        let text = output
            .components
            .iter()
            .find(|c| c.id == "first-name")
            .expect("text field rendered");
        assert_eq!(text.widget, "text-input");
        assert_eq!(text.props["propertyName"], json!("firstName"));
    }

    #[test]
    fn test_visibility_reacts_to_record_data() {
        let registry = ComponentRegistry::with_defaults();

        // An adult record renders the age-gated checkbox, a minor one hides it.
        let markup = FormMarkup::from_json(sample_markup_json()).expect("failed to parse markup");
        let mut cache = ResolveCache::new();
        let output = render_form(&registry, &mut cache, markup, &customer_context(30));
        assert!(output.components.iter().any(|c| c.id == "newsletter"));

        let markup = FormMarkup::from_json(sample_markup_json()).expect("failed to parse markup");
        let mut cache = ResolveCache::new();
        let output = render_form(&registry, &mut cache, markup, &customer_context(10));
        assert!(!output.components.iter().any(|c| c.id == "newsletter"));
    }

    #[test]
    fn test_designer_mode_end_to_end() {
        let registry = ComponentRegistry::with_defaults();
        let markup = FormMarkup::from_json(sample_markup_json()).expect("failed to parse markup");
        let mut cache = ResolveCache::new();

        let ctx = customer_context(10).with_mode(FormMode::Designer);
        let output = render_form(&registry, &mut cache, markup, &ctx);

        // The designer canvas shows everything, whatever the scripts say.
        assert_eq!(output.components.len(), 3);
    }

    #[test]
    fn test_migrated_markup_serializes_at_current_versions() {
        let registry = ComponentRegistry::with_defaults();
        let markup = FormMarkup::from_json(sample_markup_json()).expect("failed to parse markup");

        let report = migrate_markup(&registry, markup);
        assert!(report.is_clean());

        let serialized = report.markup.to_json().expect("failed to serialize markup");
        let reloaded = FormMarkup::from_json(&serialized).expect("failed to reload markup");

        for model in reloaded.iter() {
            assert!(model.version.is_some(), "{} lost its version", model.id);
        }

        // Migrating again is a no-op.
        let again = migrate_markup(&registry, reloaded.clone());
        assert!(again.is_clean());
        assert_eq!(again.markup, reloaded);
    }

    #[test]
    fn test_compiled_form_artifact_round_trip() {
        let registry = ComponentRegistry::with_defaults();
        let markup = FormMarkup::from_json(sample_markup_json()).expect("failed to parse markup");
        let report = migrate_markup(&registry, markup);

        let versions = vec![
            ("textField".to_string(), 1),
            ("numberField".to_string(), 0),
            ("checkbox".to_string(), 1),
        ];
        let artifact =
            CompiledForm::new(&report.markup, versions.clone()).expect("failed to compile form");

        let path = std::env::temp_dir().join("keisei_artifact_round_trip.bin");
        let path = path.to_str().expect("temp path is not utf-8");

        artifact.save(path).expect("failed to save artifact");
        let loaded = CompiledForm::from_file(path).expect("failed to load artifact");

        assert_eq!(loaded.component_versions, versions);
        assert_eq!(loaded.markup().expect("markup decode"), report.markup);

        // The raw byte rendition decodes the same way.
        let bytes = fs::read(path).expect("failed to read artifact bytes");
        let from_bytes = CompiledForm::from_bytes(&bytes).expect("failed to decode bytes");
        assert_eq!(from_bytes.markup_json, loaded.markup_json);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_error_handling_integration() {
        let result = FormMarkup::from_json("{ invalid json }");
        assert!(result.is_err());
        if let Err(error) = result {
            println!("Correctly handled invalid markup JSON: {}", error);
        }

        let result = CompiledForm::from_bytes(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(result.is_err());

        let result = CompiledForm::from_file("/no/such/path.bin");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_wizard_over_rendered_steps() {
        let registry = ComponentRegistry::with_defaults();
        let ctx = customer_context(30).with_permissions(vec!["forms:edit".to_string()]);
        let dispatcher = ActionDispatcher::new();

        let mut model = three_step_wizard();
        model.steps[0].components = FormMarkup::from_json(sample_markup_json())
            .expect("failed to parse step markup");

        let mut wizard = Wizard::new(model, &ctx);
        assert_eq!(wizard.visible_steps().len(), 3);

        let step = wizard.current_step().expect("a current step");
        let mut cache = ResolveCache::new();
        let output = render_form(&registry, &mut cache, step.components.clone(), &ctx);
        assert_eq!(output.components.len(), 3);

        assert!(wizard.next(&dispatcher, &ctx).await.expect("next failed"));
        assert_eq!(wizard.current_step().expect("a current step").id, "details");
    }

    #[test]
    fn test_prelude_import_completeness() {
        // Verify that the prelude exports work correctly
        let _registry: Option<ComponentRegistry> = None;
        let _resolver: Option<ModelResolver> = None;
        let _cache: Option<ResolveCache> = None;
        let _markup: Option<FormMarkup> = None;
        let _model: Option<ComponentModel> = None;
        let _context: Option<FormContext> = None;
        let _mode: Option<FormMode> = None;
        let _artifact: Option<CompiledForm> = None;
        let _wizard: Option<WizardModel> = None;
        let _action: Option<ActionConfiguration> = None;
        let _report: Option<MigrationReport> = None;

        // Test Result alias
        let _result: Result<String> = Ok("test".to_string());

        println!("All prelude types are accessible");
    }
}
