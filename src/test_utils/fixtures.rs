//! Sample descriptors and dependency graphs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEPENDENCY_GRAPH_FILE_NAME, DESCRIPTOR_FILE_NAME};

/// A standalone `com.example:app:1.0.0` descriptor.
pub const SAMPLE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>app</artifactId>
  <version>1.0.0</version>
  <name>Sample App</name>
  <properties>
    <commons.version>3.14.0</commons.version>
  </properties>
  <dependencies>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
      <version>${commons.version}</version>
    </dependency>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>core</artifactId>
      <version>${project.version}</version>
    </dependency>
  </dependencies>
</project>
"#;

/// Resolved graph for [`SAMPLE_POM`].
pub const SAMPLE_GRAPH: &str = r#"{
  "groupId": "com.example", "artifactId": "app", "version": "1.0.0",
  "children": [
    {"groupId": "org.apache.commons", "artifactId": "commons-lang3", "version": "3.14.0", "scope": "compile"},
    {"groupId": "com.example", "artifactId": "core", "version": "1.0.0", "scope": "compile",
     "children": [
       {"groupId": "org.slf4j", "artifactId": "slf4j-api", "version": "2.0.9", "scope": "compile"}
     ]},
    {"groupId": "org.junit.jupiter", "artifactId": "junit-jupiter", "version": "5.10.0", "scope": "test"}
  ]
}"#;

/// Parent of [`MODULE_POM`], one directory up.
pub const PARENT_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>parent</artifactId>
  <version>1.1.0</version>
  <packaging>pom</packaging>
</project>
"#;

/// A module inheriting from `com.example:parent`, declaring a stale parent version.
pub const MODULE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.example</groupId>
    <artifactId>parent</artifactId>
    <version>1.0.0</version>
  </parent>
  <artifactId>module</artifactId>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.apache.commons</groupId>
        <artifactId>commons-lang3</artifactId>
        <version>3.14.0</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
    </dependency>
  </dependencies>
</project>
"#;

/// Resolved graph for [`MODULE_POM`].
pub const MODULE_GRAPH: &str = r#"{
  "groupId": "com.example", "artifactId": "module", "version": "1.0.0",
  "children": [
    {"groupId": "org.apache.commons", "artifactId": "commons-lang3", "version": "3.14.0", "scope": "compile"},
    {"groupId": "org.slf4j", "artifactId": "slf4j-api", "version": "2.0.9", "scope": "runtime"}
  ]
}"#;

/// A parent that manages dependency versions for its modules.
pub const MANAGED_PARENT_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>parent</artifactId>
  <version>1.1.0</version>
  <packaging>pom</packaging>
  <properties>
    <lib.version>3.0</lib.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.lib</groupId>
        <artifactId>lib</artifactId>
        <version>${lib.version}</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
</project>
"#;

/// A module whose dependency version comes only from [`MANAGED_PARENT_POM`].
pub const MANAGED_MODULE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.example</groupId>
    <artifactId>parent</artifactId>
    <version>1.1.0</version>
  </parent>
  <artifactId>service</artifactId>
  <dependencies>
    <dependency>
      <groupId>org.lib</groupId>
      <artifactId>lib</artifactId>
    </dependency>
  </dependencies>
</project>
"#;

/// Resolved graph for [`MANAGED_MODULE_POM`].
pub const MANAGED_MODULE_GRAPH: &str = r#"{
  "groupId": "com.example", "artifactId": "service", "version": "1.1.0",
  "children": [
    {"groupId": "org.lib", "artifactId": "lib", "version": "3.0", "scope": "compile"}
  ]
}"#;

/// A project directory layout to materialize in a test directory.
#[derive(Clone, Debug)]
pub struct ProjectFixture {
    pub pom: String,
    pub graph: Option<String>,
}

impl ProjectFixture {
    /// [`SAMPLE_POM`] with its graph at the default location.
    pub fn sample() -> Self {
        Self {
            pom: SAMPLE_POM.to_string(),
            graph: Some(SAMPLE_GRAPH.to_string()),
        }
    }

    /// [`MODULE_POM`] with its graph; pair with [`PARENT_POM`] one level up.
    pub fn module() -> Self {
        Self {
            pom: MODULE_POM.to_string(),
            graph: Some(MODULE_GRAPH.to_string()),
        }
    }

    /// [`MANAGED_MODULE_POM`] with its graph; pair with [`MANAGED_PARENT_POM`].
    pub fn managed_module() -> Self {
        Self {
            pom: MANAGED_MODULE_POM.to_string(),
            graph: Some(MANAGED_MODULE_GRAPH.to_string()),
        }
    }

    /// Drop the graph, as when the resolver failed.
    #[must_use]
    pub fn without_graph(mut self) -> Self {
        self.graph = None;
        self
    }

    /// Write `pom.xml` and `target/dependency-graph.json` into `dir`.
    ///
    /// Returns the descriptor path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let pom_path = dir.join(DESCRIPTOR_FILE_NAME);
        fs::write(&pom_path, &self.pom)?;

        if let Some(graph) = &self.graph {
            let target = dir.join("target");
            fs::create_dir_all(&target)?;
            fs::write(target.join(DEPENDENCY_GRAPH_FILE_NAME), graph)?;
        }

        Ok(pom_path)
    }
}
