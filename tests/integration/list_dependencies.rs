use crate::common::{FileAssert, TestProject};
use pomflat_cli::test_utils::ProjectFixture;

#[test]
fn test_list_dependencies_default_report() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();

    project
        .run_pomflat(&["list-dependencies"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("5 artifacts");

    let report = project.read_file("target/dependencies.properties");
    let expected = "# Main Jar: \n\
                    #  GroupId | ArtifactId | Version | Name\n\
                    com.example|app|1.0.0|app-1.0.0.jar\n\
                    \n\
                    \n\
                    # Dependencies: \n\
                    #  GroupId | ArtifactId | Version | Classifier | Type | Scope | Name\n\
                    com.example|app|1.0.0||jar||app-1.0.0.jar\n\
                    org.apache.commons|commons-lang3|3.14.0||jar|compile|commons-lang3-3.14.0.jar\n\
                    com.example|core|1.0.0||jar|compile|core-1.0.0.jar\n\
                    org.junit.jupiter|junit-jupiter|5.10.0||jar|test|junit-jupiter-5.10.0.jar\n\
                    org.slf4j|slf4j-api|2.0.9||jar|compile|slf4j-api-2.0.9.jar\n";
    assert_eq!(report, expected);
}

#[test]
fn test_list_dependencies_separator_and_output() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();

    project
        .run_pomflat(&["list-dependencies", "--separator", ",", "--output", "deps.csv"])
        .unwrap()
        .assert_success();

    FileAssert::contains(project.project_path().join("deps.csv"), "com.example,app,1.0.0,app-1.0.0.jar\n");
    FileAssert::contains(
        project.project_path().join("deps.csv"),
        "org.slf4j,slf4j-api,2.0.9,,jar,compile,slf4j-api-2.0.9.jar\n",
    );
    FileAssert::not_exists(project.target_file("dependencies.properties"));
}

#[test]
fn test_list_dependencies_separator_from_config() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();
    project.write_file("pomflat.toml", "[list-dependencies]\nseparator = \"\\t\"\n").unwrap();

    project.run_pomflat(&["list-dependencies"]).unwrap().assert_success();

    FileAssert::contains(project.target_file("dependencies.properties"), "com.example\tapp\t1.0.0\tapp-1.0.0.jar\n");
}

#[test]
fn test_list_dependencies_without_graph_is_degraded_not_fatal() {
    let project = TestProject::new(&ProjectFixture::sample().without_graph()).unwrap();

    let output = project.run_pomflat(&["list-dependencies"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("without dependencies")
        .assert_stderr_contains("Failed to build dependency graph");

    let report = project.read_file("target/dependencies.properties");
    assert_eq!(
        report,
        "# Main Jar: \n#  GroupId | ArtifactId | Version | Name\ncom.example|app|1.0.0|app-1.0.0.jar\n"
    );
}

#[test]
fn test_list_dependencies_replaces_previous_report() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();
    project
        .write_file("target/dependencies.properties", &"stale line\n".repeat(100))
        .unwrap();

    project.run_pomflat(&["list-dependencies"]).unwrap().assert_success();

    let report = project.read_file("target/dependencies.properties");
    assert!(!report.contains("stale line"));
    assert!(report.starts_with("# Main Jar: \n"));
}
