use mkgen_lib::project::{ProjectError, load_project};
use serial_test::serial;

use super::common::{Workspace, run_with};

const SNAPSHOT: &str = r#"{
  "name": "demo",
  "source_dir": "src",
  "binary_dir": "build",
  "list_files": ["CMakeLists.txt", "CMakeLists.txt", "sub/CMakeLists.txt"],
  "variables": { "SHELL": "/bin/sh" },
  "generator": { "pass_makeflags": true },
  "targets": [
    { "name": "app",
      "sources": [
        "a.c",
        "b.c",
        { "path": "doc.h", "header_only": true },
        { "path": "gen.c", "custom_command": true }
      ] },
    { "name": "check", "in_all": false, "sources": ["sub/t.cpp"] }
  ]
}"#;

#[test]
fn snapshot_generates_expected_tree() {
  let ws = Workspace::new();
  let path = ws.write_root("mkgen.json", SNAPSHOT);

  let loaded = load_project(&path).unwrap();
  assert_eq!(loaded.project.binary_dir, ws.build);
  assert!(loaded.generator.pass_makeflags);

  let report = run_with(&loaded.project, &loaded.generator);
  assert!(report.is_success(), "{:?}", report.failures);

  let root = ws.read("Makefile2");
  assert!(root.contains("SHELL = /bin/sh\n"));
  assert!(root.contains("-$(MAKEFLAGS) all\n"));
  assert!(root.contains("all: app.requires\n"));
  assert!(root.contains("include check.dir/check.make\n"));

  assert!(ws.build_path("app.dir/a.c.o.make").is_file());
  assert!(ws.build_path("app.dir/b.c.o.make").is_file());
  assert!(!ws.build_path("app.dir/gen.c.o.make").exists());
  assert!(ws.build_path("check.dir/sub/t.cpp.o.make").is_file());

  let descriptor = ws.read("Makefile2.cmake");
  assert_eq!(descriptor.matches("CMakeLists.txt\"").count(), 2);
}

#[test]
#[serial]
fn environment_overrides_snapshot_settings() {
  let ws = Workspace::new();
  let path = ws.write_root("mkgen.json", SNAPSHOT);

  temp_env::with_vars(
    [("MKGEN_PASS_MAKEFLAGS", Some("off")), ("MKGEN_VERBOSE_MAKEFILE", Some("ON"))],
    || {
      let loaded = load_project(&path).unwrap();
      let config = loaded.generator.with_env_overrides();
      assert!(!config.pass_makeflags);
      assert!(config.verbose_makefile);

      run_with(&loaded.project, &config);
      let root = ws.read("Makefile2");
      assert!(!root.contains("MAKEFLAGS"));
      assert!(!root.contains(".SILENT:"));
    },
  );
}

#[test]
fn duplicate_target_names_are_rejected() {
  let ws = Workspace::new();
  let path = ws.write_root(
    "mkgen.json",
    r#"{ "name": "demo", "binary_dir": "build", "targets": [ { "name": "app" }, { "name": "app" } ] }"#,
  );

  let err = load_project(&path).unwrap_err();
  assert!(matches!(err, ProjectError::DuplicateTarget(name) if name == "app"));
}

#[test]
fn malformed_snapshot_names_the_file() {
  let ws = Workspace::new();
  let path = ws.write_root("mkgen.json", "{ not json");

  let err = load_project(&path).unwrap_err();
  assert!(matches!(err, ProjectError::Parse { .. }));
  assert!(err.to_string().contains("mkgen.json"));
}
