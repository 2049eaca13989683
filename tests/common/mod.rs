#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures {
    /// Colors API used across the integration tests.
    ///
    /// Document order matters: `/colors/{colorId}` precedes
    /// `/colors/favorites`, so the parameter route shadows the literal one
    /// for GET.
    pub const COLORS_YAML: &str = r#"openapi: 3.1.0
info:
  title: Colors API
  version: "1.2.0"
paths:
  /colors:
    get:
      operationId: getColors
      responses:
        "200": { description: OK }
    post:
      operationId: createColor
      responses:
        "201": { description: Created }
    options:
      operationId: colorsPreflight
      responses:
        "204": { description: No Content }
  /colors/{colorId}:
    summary: A single color
    parameters:
      - name: colorId
        in: path
        required: true
        schema: { type: string }
    get:
      operationId: getColorById
      responses:
        200: { description: OK }
    put:
      operationId: updateColor
      responses:
        "200": { description: OK }
    delete:
      responses:
        "200": { description: OK }
  /colors/favorites:
    get:
      operationId: getFavoriteColors
      responses:
        "200": { description: OK }
  /users/{userId}/colors/{colorId}:
    get:
      operationId: getUserColor
      responses:
        "200": { description: OK }
"#;

    /// Two operations that collapse onto `GET a/:x`
    pub const DUPLICATE_SHAPE_YAML: &str = r#"openapi: 3.1.0
info:
  title: Broken
  version: "0.1.0"
paths:
  /a/{x}:
    get:
      operationId: first
      responses:
        "200": { description: OK }
  /a/{y}:
    get:
      operationId: second
      responses:
        "200": { description: OK }
"#;

    /// Keys deliberately out of alphabetical order
    pub const ZOO_JSON: &str = r#"{
  "openapi": "3.1.0",
  "info": { "title": "Zoo", "version": "2.0.0" },
  "paths": {
    "/zebra": {
      "get": { "operationId": "getZebra", "responses": { "200": { "description": "OK" } } }
    },
    "/apple/{id}": {
      "get": { "operationId": "getApple", "responses": { "200": { "description": "OK" } } }
    }
  }
}"#;
}

pub mod temp_files {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write `content` as `<dir>/<name>` and return its path.
    pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Fresh temp dir holding `name` with `content`.
    pub fn spec_in_tempdir(name: &str, content: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, name, content);
        (dir, path)
    }
}

#[cfg(unix)]
pub mod stub_bin {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Executable shell script standing in for the OpenAPI generator.
    ///
    /// It writes its arguments, one per line, to `<dir>/args.log`, records
    /// `TS_POST_PROCESS_FILE` in `<dir>/env.log`, drops a `MARKER` file into
    /// the `-o` directory and exits with `exit_code`.
    pub fn fake_generator(dir: &Path, exit_code: i32) -> PathBuf {
        let script = format!(
            r#"#!/bin/sh
log="{dir}/args.log"
: > "$log"
out=""
prev=""
for a in "$@"; do
  echo "$a" >> "$log"
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
echo "$TS_POST_PROCESS_FILE" > "{dir}/env.log"
if [ -n "$out" ]; then mkdir -p "$out" && echo generated > "$out/MARKER"; fi
exit {exit_code}
"#,
            dir = dir.display(),
        );
        let path = dir.join("openapi-generator-cli");
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    /// Arguments recorded by the last [`fake_generator`] run
    pub fn recorded_args(dir: &Path) -> Vec<String> {
        fs::read_to_string(dir.join("args.log"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
