use predicates::prelude::*;

use super::common::{DEMO_PROJECT, TestEnv};

#[test]
fn generate_writes_rule_tree() {
  let env = TestEnv::with_project(DEMO_PROJECT);

  env
    .cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated demo"));

  let build = env.build_path();
  assert!(build.join("Makefile2").is_file());
  assert!(build.join("app.dir/a.c.o.make").is_file());
  assert!(build.join("app.dir/b.c.o.make").is_file());
  assert!(!build.join("app.dir/gen.c.o.make").exists());
  assert!(build.join("check.dir/sub/t.cpp.o.make").is_file());
  assert!(build.join("check.dir/util.c.o.make").is_file());

  let root = env.read_output("Makefile2");
  assert!(root.contains("all: app.requires\n"));
  assert!(root.contains("include check.dir/check.make\n"));
}

#[test]
fn second_run_reports_up_to_date() {
  let env = TestEnv::with_project(DEMO_PROJECT);
  env.cmd().arg("generate").assert().success();

  env
    .cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("Rule tree is up to date"));
}

#[test]
fn json_report_counts_files() {
  let env = TestEnv::with_project(DEMO_PROJECT);

  let output = env.cmd().args(["generate", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  // 4 objects + 2 targets + root
  assert_eq!(report["files"].as_array().unwrap().len(), 7);
  assert_eq!(report["stamps_created"].as_array().unwrap().len(), 6);
  assert!(report["failures"].as_array().unwrap().is_empty());
  assert!(report["files"].as_array().unwrap().iter().all(|f| f["outcome"] == "created"));
}

#[test]
fn flags_override_snapshot_and_environment() {
  let env = TestEnv::with_project(DEMO_PROJECT);

  env
    .cmd()
    .env("MKGEN_PASS_MAKEFLAGS", "0")
    .args(["generate", "--pass-makeflags", "--verbose-makefile"])
    .assert()
    .success();

  let root = env.read_output("Makefile2");
  assert!(root.contains("-$(MAKEFLAGS) all.depends"));
  assert!(!root.contains(".SILENT:"));
}

#[test]
fn environment_enables_verbose_makefile() {
  let env = TestEnv::with_project(DEMO_PROJECT);

  env
    .cmd()
    .env("MKGEN_VERBOSE_MAKEFILE", "yes")
    .arg("generate")
    .assert()
    .success();

  assert!(!env.read_output("Makefile2").contains(".SILENT:"));
}

#[test]
fn unwritable_root_file_fails_but_keeps_targets() {
  let env = TestEnv::with_project(DEMO_PROJECT);
  std::fs::create_dir_all(env.temp.path().join("build/Makefile2")).unwrap();

  env
    .cmd()
    .arg("generate")
    .assert()
    .failure()
    .stderr(predicate::str::contains("could not be generated"));

  assert!(env.build_path().join("app.dir/app.make").is_file());
  assert!(env.build_path().join("Makefile2.cmake").is_file());
}

#[test]
fn scanner_output_is_preserved_across_runs() {
  let env = TestEnv::with_project(DEMO_PROJECT);
  env.cmd().arg("generate").assert().success();

  env.write_file("build/app.dir/a.c.o.depends.make", "app.dir/a.c.o: src/a.h\n");
  env.cmd().arg("generate").assert().success();

  assert_eq!(env.read_output("app.dir/a.c.o.depends.make"), "app.dir/a.c.o: src/a.h\n");
}

#[test]
fn verbose_flag_emits_debug_logs() {
  let env = TestEnv::with_project(DEMO_PROJECT);

  env
    .cmd()
    .args(["-v", "generate"])
    .assert()
    .success()
    .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn explicit_project_path_is_honoured() {
  let env = TestEnv::with_project(DEMO_PROJECT);
  env.write_file("nested/other.json", r#"{ "name": "other", "binary_dir": "out" }"#);

  env.cmd().args(["generate", "nested/other.json"]).assert().success();

  assert!(env.temp.path().join("nested/out/Makefile2").is_file());
}
