use clap::Parser;
use form_builder::{
    cli::{
        commands::{
            cmd_add, cmd_list, cmd_move, cmd_new, cmd_publish, cmd_remove, cmd_render, cmd_save,
            cmd_set, cmd_show, cmd_submissions, cmd_submit, open_backend,
        },
        config::{
            AppConfig, BackendKind, Cli, Commands, RenderView, Settings, load_config,
            parse_key_val, resolve_settings,
        },
    },
    element::element_model::{ElementType, parse_elements},
    logging::default_directive,
    storage::{backend::FormBackend, file_backend::FileBackend, http_backend::HttpBackend},
};
use tempfile::TempDir;

use crate::common::fixtures::{ids, text};

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_new_with_description() {
    let cli = Cli::parse_from(["form-builder", "new", "Contact", "--description", "Reach us"]);
    match cli.command {
        Commands::New { name, description } => {
            assert_eq!(name, "Contact");
            assert_eq!(description, "Reach us");
        }
        _ => panic!("Expected New command"),
    }
}

#[test]
fn cli_parse_new_defaults_description() {
    let cli = Cli::parse_from(["form-builder", "new", "Contact"]);
    match cli.command {
        Commands::New { description, .. } => assert_eq!(description, ""),
        _ => panic!("Expected New command"),
    }
}

#[test]
fn cli_parse_add_with_alias_and_position() {
    let cli = Cli::parse_from(["form-builder", "add", "3", "checkbox", "--below", "el-1"]);
    match cli.command {
        Commands::Add {
            form_id,
            element_type,
            above,
            below,
        } => {
            assert_eq!(form_id, 3);
            assert_eq!(element_type, ElementType::CheckBoxField);
            assert!(above.is_none());
            assert_eq!(below.as_deref(), Some("el-1"));
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn cli_parse_add_rejects_unknown_type() {
    assert!(Cli::try_parse_from(["form-builder", "add", "1", "ImageField"]).is_err());
}

#[test]
fn cli_parse_add_rejects_both_positions() {
    let result = Cli::try_parse_from([
        "form-builder", "add", "1", "text", "--above", "a", "--below", "b",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parse_move_requires_a_position() {
    assert!(Cli::try_parse_from(["form-builder", "move", "1", "a"]).is_err());

    let cli = Cli::parse_from(["form-builder", "move", "1", "a", "--above", "b"]);
    match cli.command {
        Commands::Move { element_id, above, .. } => {
            assert_eq!(element_id, "a");
            assert_eq!(above.as_deref(), Some("b"));
        }
        _ => panic!("Expected Move command"),
    }
}

#[test]
fn cli_parse_set_collects_props() {
    let cli = Cli::parse_from([
        "form-builder", "set", "1", "a", "-p", "label=Email", "--prop", "required=true",
    ]);
    match cli.command {
        Commands::Set { props, .. } => {
            assert_eq!(
                props,
                vec![
                    ("label".to_string(), "Email".to_string()),
                    ("required".to_string(), "true".to_string()),
                ]
            );
        }
        _ => panic!("Expected Set command"),
    }
    assert!(Cli::try_parse_from(["form-builder", "set", "1", "a"]).is_err());
}

#[test]
fn cli_parse_render_defaults_to_designer() {
    let cli = Cli::parse_from(["form-builder", "render", "2"]);
    match cli.command {
        Commands::Render { view, output, .. } => {
            assert_eq!(view, RenderView::Designer);
            assert!(output.is_none());
        }
        _ => panic!("Expected Render command"),
    }

    let cli = Cli::parse_from(["form-builder", "render", "2", "--view", "preview", "-o", "out.html"]);
    match cli.command {
        Commands::Render { view, output, .. } => {
            assert_eq!(view, RenderView::Preview);
            assert_eq!(output.as_deref(), Some("out.html"));
        }
        _ => panic!("Expected Render command"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "form-builder", "list", "-vv", "--backend", "http", "--endpoint", "http://api",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.backend, Some(BackendKind::Http));
    assert_eq!(cli.endpoint.as_deref(), Some("http://api"));
    assert!(matches!(cli.command, Commands::List));
}

#[test]
fn parse_key_val_splits_on_first_equals() {
    assert_eq!(
        parse_key_val("label=a=b").unwrap(),
        ("label".to_string(), "a=b".to_string())
    );
    assert_eq!(parse_key_val("name=").unwrap(), ("name".to_string(), String::new()));
    assert!(parse_key_val("no-equals").is_err());
    assert!(parse_key_val("=value").is_err());
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn load_config_missing_file_returns_defaults() {
    let config = load_config(Some("/nonexistent/form-builder.yaml"));
    assert_eq!(config.storage.data_dir, ".form-builder");
    assert_eq!(config.server.base_url, "http://localhost:3000");
    assert_eq!(config.backend, BackendKind::File);
    assert!(config.http.endpoint.is_none());
}

#[test]
fn load_config_reads_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("form-builder.yaml");
    std::fs::write(
        &path,
        "backend: http\nhttp:\n  endpoint: http://api.local\nstorage:\n  activity_log: activity.jsonl\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.backend, BackendKind::Http);
    assert_eq!(config.http.endpoint.as_deref(), Some("http://api.local"));
    assert_eq!(config.storage.activity_log.as_deref(), Some("activity.jsonl"));
    // Unset sections keep their defaults
    assert_eq!(config.storage.data_dir, ".form-builder");
    assert_eq!(config.server.base_url, "http://localhost:3000");
}

#[test]
fn load_config_malformed_yaml_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "backend: [unclosed").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.backend, BackendKind::File);
}

#[test]
fn cli_flags_override_config() {
    let mut config = AppConfig::default();
    config.backend = BackendKind::Http;
    config.storage.data_dir = "from-config".to_string();
    config.server.base_url = "https://config.example".to_string();

    let cli = Cli::parse_from(["form-builder", "list", "--data-dir", "from-cli", "--backend", "file"]);
    let settings = resolve_settings(&cli, &config);
    assert_eq!(settings.backend, BackendKind::File);
    assert_eq!(settings.data_dir, "from-cli");
    assert_eq!(settings.base_url, "https://config.example");

    let cli = Cli::parse_from(["form-builder", "list"]);
    let settings = resolve_settings(&cli, &config);
    assert_eq!(settings.backend, BackendKind::Http);
    assert_eq!(settings.data_dir, "from-config");
}

#[test]
fn verbosity_maps_to_filter_directive() {
    assert_eq!(default_directive(0), "form_builder=warn");
    assert_eq!(default_directive(1), "form_builder=info");
    assert_eq!(default_directive(2), "form_builder=debug");
    assert_eq!(default_directive(7), "form_builder=trace");
}

#[test]
fn http_backend_builds_urls_without_double_slash() {
    let backend = HttpBackend::new("http://localhost:3000/api/");
    assert_eq!(backend.endpoint, "http://localhost:3000/api");
    assert_eq!(backend.url_for("/forms/7"), "http://localhost:3000/api/forms/7");
}

// ============================================================================
// Command Tests (file backend)
// ============================================================================

fn file_settings(dir: &TempDir) -> Settings {
    Settings {
        backend: BackendKind::File,
        data_dir: dir.path().join("data").to_string_lossy().to_string(),
        endpoint: None,
        base_url: "https://forms.example".to_string(),
        activity_log: None,
    }
}

fn stored_ids(backend: &FileBackend, form_id: u64) -> Vec<String> {
    let record = backend.load(form_id).unwrap();
    ids(&parse_elements(&record.content).unwrap())
        .into_iter()
        .map(String::from)
        .collect()
}

/// Id of the element added by `cmd_add`, taken from its output line.
fn added_id(output: &str) -> String {
    output.rsplit(' ').next().unwrap().to_string()
}

#[test]
fn open_backend_creates_file_store() {
    let dir = TempDir::new().unwrap();
    let settings = file_settings(&dir);
    let backend = open_backend(&settings).unwrap();
    assert!(backend.list().unwrap().is_empty());
    assert!(dir.path().join("data").join("forms").is_dir());
}

#[test]
fn design_publish_and_submit_flow() {
    let dir = TempDir::new().unwrap();
    let settings = file_settings(&dir);
    let mut backend = FileBackend::open(&settings.data_dir).unwrap();

    assert_eq!(cmd_list(&backend).unwrap(), "No forms yet");
    assert_eq!(cmd_new(&mut backend, "Contact", "").unwrap(), "Created form 1: Contact");

    let name = added_id(&cmd_add(&mut backend, 1, ElementType::TextField, None, None, &settings).unwrap());
    let terms = added_id(&cmd_add(&mut backend, 1, ElementType::CheckBoxField, None, None, &settings).unwrap());
    let title = added_id(
        &cmd_add(&mut backend, 1, ElementType::TitleField, Some(name.as_str()), None, &settings).unwrap(),
    );
    assert_eq!(stored_ids(&backend, 1), vec![title.clone(), name.clone(), terms.clone()]);

    let moved = cmd_move(&mut backend, 1, &title, None, Some(terms.as_str()), &settings).unwrap();
    assert_eq!(moved, format!("Moved {}", title));
    assert_eq!(stored_ids(&backend, 1), vec![name.clone(), terms.clone(), title.clone()]);
    let noop = cmd_move(&mut backend, 1, &title, None, Some(terms.as_str()), &settings).unwrap();
    assert!(noop.ends_with("already in place"));

    let set = cmd_set(
        &mut backend,
        1,
        &name,
        &[
            ("label".to_string(), "Name".to_string()),
            ("required".to_string(), "true".to_string()),
        ],
        &settings,
    )
    .unwrap();
    assert_eq!(set, format!("Updated {}: saved", name));

    let shown = cmd_show(&backend, 1, &settings).unwrap();
    assert!(shown.starts_with("=== Form 1: Contact (draft) ==="));
    assert!(shown.contains(&format!("{} [TextField] Name *", name)));

    assert_eq!(cmd_remove(&mut backend, 1, &title, &settings).unwrap(), format!("Removed {}", title));
    assert!(cmd_remove(&mut backend, 1, &title, &settings).unwrap().contains("nothing removed"));

    let preview = cmd_render(&backend, 1, RenderView::Preview, None, &settings).unwrap();
    assert!(preview.contains(&format!("name=\"field-{}\"", name)));

    let published = cmd_publish(&mut backend, 1, &settings).unwrap();
    let share_url = backend.load(1).unwrap().share_url;
    assert!(published.contains(&format!("https://forms.example/submit/{}", share_url)));
    assert!(cmd_add(&mut backend, 1, ElementType::TextField, None, None, &settings).is_err());
    assert!(cmd_show(&backend, 1, &settings).unwrap().contains("Share link:"));

    assert!(cmd_submit(&mut backend, &share_url, &[]).is_err());
    let submitted = cmd_submit(
        &mut backend,
        &share_url,
        &[
            (name.clone(), "Ada".to_string()),
            (terms.clone(), "true".to_string()),
        ],
    )
    .unwrap();
    assert_eq!(submitted, "Submitted 2 field(s)");

    let table = cmd_submissions(&backend, 1).unwrap();
    assert!(table.contains("=== Submissions: 1 ==="));
    assert!(table.contains("Name *"));
    assert!(table.contains("Ada | checked"));

    let listed = cmd_list(&backend).unwrap();
    assert!(listed.starts_with("1\tContact\tpublished"));
}

#[test]
fn save_imports_element_list_from_file() {
    let dir = TempDir::new().unwrap();
    let settings = file_settings(&dir);
    let mut backend = FileBackend::open(&settings.data_dir).unwrap();
    cmd_new(&mut backend, "Import", "").unwrap();

    let path = dir.path().join("elements.json");
    std::fs::write(&path, serde_json::to_string(&[text("a"), text("b")]).unwrap()).unwrap();
    let path = path.to_string_lossy().to_string();

    assert_eq!(cmd_save(&mut backend, 1, &path, &settings).unwrap(), "Form 1: saved");
    assert_eq!(stored_ids(&backend, 1), vec!["a", "b"]);
    assert_eq!(
        cmd_save(&mut backend, 1, &path, &settings).unwrap(),
        "Form 1: no changes to save"
    );

    let dupes = dir.path().join("dupes.json");
    std::fs::write(&dupes, serde_json::to_string(&[text("a"), text("a")]).unwrap()).unwrap();
    assert!(cmd_save(&mut backend, 1, &dupes.to_string_lossy(), &settings).is_err());
    assert_eq!(stored_ids(&backend, 1), vec!["a", "b"]);
}

#[test]
fn render_writes_designer_page_to_file() {
    let dir = TempDir::new().unwrap();
    let settings = file_settings(&dir);
    let mut backend = FileBackend::open(&settings.data_dir).unwrap();
    cmd_new(&mut backend, "Empty", "").unwrap();

    let out = dir.path().join("designer.html");
    let out_str = out.to_string_lossy().to_string();
    let message = cmd_render(&backend, 1, RenderView::Designer, Some(out_str.as_str()), &settings).unwrap();
    assert_eq!(message, format!("HTML written to: {}", out_str));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("Drop here"));
    assert!(html.contains("Drag and drop elements"));
}

#[test]
fn commands_on_missing_form_fail() {
    let dir = TempDir::new().unwrap();
    let settings = file_settings(&dir);
    let mut backend = FileBackend::open(&settings.data_dir).unwrap();

    assert!(cmd_show(&backend, 9, &settings).is_err());
    assert!(cmd_publish(&mut backend, 9, &settings).is_err());
    assert!(cmd_submissions(&backend, 9).is_err());
}
