use crate::common::{FileAssert, TestProject};
use pomflat_cli::test_utils::{MANAGED_PARENT_POM, ProjectFixture};

#[test]
fn test_generate_pom_writes_effective_descriptor() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();

    project.run_pomflat(&["generate-pom"]).unwrap().assert_success().assert_stdout_contains("Wrote");

    let output = project.target_file("effective-pom.xml");
    FileAssert::exists(&output);

    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(xml.contains("<project xmlns=\"http://maven.apache.org/POM/4.0.0\">"));
    assert!(xml.contains("<name>Sample App</name>"));

    // Transitive and test-scoped artifacts become explicit dependencies.
    assert!(xml.contains("<artifactId>slf4j-api</artifactId>\n      <version>2.0.9</version>"));
    assert!(xml.contains(
        "<artifactId>junit-jupiter</artifactId>\n      <version>5.10.0</version>\n      <type>jar</type>\n      <scope>test</scope>"
    ));
    assert_eq!(xml.matches("<artifactId>commons-lang3</artifactId>").count(), 1);
    assert!(!xml.contains("<artifactId>app</artifactId>\n      <version>"));
}

#[test]
fn test_generate_pom_uses_placeholders_for_paths() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();
    project.run_pomflat(&["generate-pom"]).unwrap().assert_success();

    let xml = project.read_file("target/effective-pom.xml");
    let build_dir = project.project_path().join("target");

    assert!(xml.contains(&format!("<directory>{}</directory>", build_dir.display())));
    assert!(xml.contains("<outputDirectory>${project.build.directory}/classes</outputDirectory>"));
    assert!(xml.contains(
        "<testOutputDirectory>${project.build.directory}/test-classes</testOutputDirectory>"
    ));
    assert!(xml.contains("<sourceDirectory>${project.basedir}/src/main/java</sourceDirectory>"));

    let without_declaration = xml.replace(&format!("<directory>{}</directory>", build_dir.display()), "");
    assert!(!without_declaration.contains(&project.project_path().display().to_string()));
}

#[test]
fn test_generate_pom_is_byte_stable() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();

    project.run_pomflat(&["generate-pom"]).unwrap().assert_success();
    let first = project.read_file("target/effective-pom.xml");

    project.run_pomflat(&["generate-pom"]).unwrap().assert_success();
    let second = project.read_file("target/effective-pom.xml");

    assert_eq!(first, second);
}

#[test]
fn test_generate_pom_with_coordinate_overrides() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();

    project
        .run_pomflat(&["generate-pom", "--group-id", "com.example.release", "--version", "2.0.0"])
        .unwrap()
        .assert_success();

    let xml = project.read_file("target/effective-pom.xml");
    assert!(xml.contains(
        "  <groupId>com.example.release</groupId>\n  <artifactId>app</artifactId>\n  <version>2.0.0</version>"
    ));
    // Release sibling moves with the project.
    assert!(xml.contains(
        "<groupId>com.example.release</groupId>\n      <artifactId>core</artifactId>\n      <version>2.0.0</version>"
    ));
    assert!(!xml.contains("<groupId>com.example</groupId>\n      <artifactId>core</artifactId>"));
    // Third-party versions are untouched.
    assert!(xml.contains("<artifactId>commons-lang3</artifactId>\n      <version>3.14.0</version>"));
}

#[test]
fn test_generate_pom_module_syncs_parent_and_drops_management() {
    let project = TestProject::with_parent(&ProjectFixture::module()).unwrap();

    project.run_pomflat(&["generate-pom"]).unwrap().assert_success();

    let xml = project.read_file("target/effective-pom.xml");
    assert!(xml.contains(
        "<parent>\n    <groupId>com.example</groupId>\n    <artifactId>parent</artifactId>\n    <version>1.1.0</version>\n  </parent>"
    ));
    assert!(!xml.contains("<dependencyManagement>"));
    assert!(xml.contains("<artifactId>commons-lang3</artifactId>\n      <version>3.14.0</version>"));
    assert!(xml.contains(
        "<artifactId>slf4j-api</artifactId>\n      <version>2.0.9</version>\n      <type>jar</type>\n      <scope>runtime</scope>"
    ));
}

#[test]
fn test_generate_pom_pins_versions_managed_by_parent() {
    let project =
        TestProject::with_parent_pom(MANAGED_PARENT_POM, &ProjectFixture::managed_module()).unwrap();

    project.run_pomflat(&["generate-pom"]).unwrap().assert_success();

    let xml = project.read_file("target/effective-pom.xml");
    assert!(!xml.contains("<dependencyManagement>"));
    assert!(xml.contains(
        "<groupId>org.lib</groupId>\n      <artifactId>lib</artifactId>\n      <version>3.0</version>"
    ));
    assert_eq!(xml.matches("<artifactId>lib</artifactId>").count(), 1);
}

#[test]
fn test_generate_pom_reads_config_and_cli_wins() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();
    project
        .write_file(
            "pomflat.toml",
            "[generate-pom]\noutput = \"dist/effective.xml\"\ngroup-id = \"com.from.config\"\n",
        )
        .unwrap();

    project
        .run_pomflat(&["generate-pom", "--version", "3.0.0"])
        .unwrap()
        .assert_success();

    let xml = project.read_file("dist/effective.xml");
    assert!(xml.contains("  <groupId>com.from.config</groupId>"));
    assert!(xml.contains("  <version>3.0.0</version>"));
    FileAssert::not_exists(project.target_file("effective-pom.xml"));

    project
        .run_pomflat(&["generate-pom", "--group-id", "com.from.cli"])
        .unwrap()
        .assert_success();
    FileAssert::contains(project.project_path().join("dist/effective.xml"), "  <groupId>com.from.cli</groupId>");
}

#[test]
fn test_generate_pom_custom_output_and_pom_path() {
    let project = TestProject::with_parent(&ProjectFixture::module()).unwrap();

    let output = project.root_path().join("out").join("module-pom.xml");
    let output_arg = output.display().to_string();
    let pom_arg = project.project_path().join("pom.xml").display().to_string();

    project
        .run_pomflat(&["--pom", &pom_arg, "generate-pom", "-o", &output_arg])
        .unwrap()
        .assert_success();

    FileAssert::contains(&output, "<artifactId>module</artifactId>");
}
