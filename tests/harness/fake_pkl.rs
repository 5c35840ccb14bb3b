use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

pub const JSON_OUTPUT: &str = r#"{"stage": "prod", "url": "https://api.example.com/v1", "memory": 512}"#;
pub const YAML_OUTPUT: &str = "stage: prod\nurl: https://api.example.com/v1\nmemory: 512\n";

/// A stand-in `pkl` executable that logs its arguments and prints canned documents.
pub struct FakePkl {
    pub root: TempDir,
    pub bin: PathBuf,
    pub log_file: PathBuf,
}

impl FakePkl {
    pub fn new() -> Self {
        Self::with_script(
            r#"case "$3" in
    json)
        echo '__JSON__'
        ;;
    yaml)
        printf '__YAML__'
        ;;
    xml)
        echo '<root><stage>prod</stage></root>'
        ;;
esac
exit 0"#
                .replace("__JSON__", JSON_OUTPUT)
                .replace("__YAML__", &YAML_OUTPUT.replace('\n', "\\n")),
        )
    }

    /// A `pkl` that always fails with a diagnostic on stderr.
    pub fn failing(message: &str) -> Self {
        Self::with_script(format!("echo '{}' >&2\nexit 1", message))
    }

    fn with_script(body: String) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir for fake pkl");
        let bin = root.path().join("pkl");
        let log_file = root.path().join("pkl.log");

        let script = format!("#!/bin/sh\necho \"$@\" >> \"{}\"\n{}\n", log_file.display(), body);
        fs::write(&bin, script).expect("Failed to write pkl script");

        let mut perms = fs::metadata(&bin).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&bin, perms).expect("Failed to set permissions");

        Self { root, bin, log_file }
    }

    /// Every invocation's arguments, one line per call.
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log_file)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
