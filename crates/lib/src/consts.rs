/// File name of the project definition, searched for in the working directory and its parents.
pub const PROJECT_FILE: &str = "project.yaml";

/// Directory under the project root that receives all build output.
pub const TARGET_DIR: &str = "target";
