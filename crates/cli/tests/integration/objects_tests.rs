use predicates::prelude::*;

use super::common::{DEMO_PROJECT, TestEnv};

#[test]
fn objects_lists_compiled_sources_only() {
  let env = TestEnv::with_project(DEMO_PROJECT);

  env
    .cmd()
    .arg("objects")
    .assert()
    .success()
    .stdout(predicate::str::contains("a.c.o"))
    .stdout(predicate::str::contains("b.c.o"))
    .stdout(predicate::str::contains("sub/t.cpp.o"))
    .stdout(predicate::str::contains("check (excluded from all)"))
    .stdout(predicate::str::contains("gen.c").not())
    .stdout(predicate::str::contains("doc.h").not());

  assert!(!env.temp.path().join("build").exists());
}

#[test]
fn objects_json_marks_out_of_tree_sources() {
  let env = TestEnv::with_project(DEMO_PROJECT);

  let output = env.cmd().args(["objects", "--output", "json"]).output().unwrap();
  assert!(output.status.success());

  let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let targets = listing.as_array().unwrap();
  assert_eq!(targets.len(), 2);
  assert_eq!(targets[0]["target"], "app");
  assert_eq!(targets[0]["objects"].as_array().unwrap().len(), 2);

  let check = &targets[1]["objects"];
  assert_eq!(check[0]["object"], "sub/t.cpp.o");
  assert_eq!(check[0]["in_tree"], true);
  assert_eq!(check[1]["object"], "util.c.o");
  assert_eq!(check[1]["in_tree"], false);
}
