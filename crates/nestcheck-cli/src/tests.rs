use super::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::Cursor;

use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

struct TestWorld {
    config: Config,
    workspace: TempDir,
    files: HashMap<String, String>,
    stdin: Vec<u8>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_code: Option<ExitCode>,
}

impl TestWorld {
    fn new() -> Self {
        Self {
            config: Config::default(),
            workspace: TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}")),
            files: HashMap::new(),
            stdin: Vec::new(),
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        }
    }

    fn write_file(&mut self, name: &str, contents: &str) {
        let path = self.workspace.path().join(name);
        fs::write(&path, contents)
            .unwrap_or_else(|err| panic!("write {}: {err}", path.display()));
        self.files
            .insert(name.to_owned(), path.to_string_lossy().into_owned());
    }

    fn run(&mut self, command: &str) {
        self.stdout.clear();
        self.stderr.clear();
        let args = self.build_args(command);
        let loader = StaticConfigLoader {
            config: self.config.clone(),
        };
        let mut stdin = Cursor::new(self.stdin.clone());
        let mut io = IoStreams::new(&mut stdin, &mut self.stdout, &mut self.stderr, false);
        self.exit_code = Some(run_with_loader(args, &mut io, &loader));
    }

    fn build_args(&self, command: &str) -> Vec<OsString> {
        let mut args = vec![OsString::from("nestcheck")];
        args.extend(command.split_whitespace().map(|token| {
            self.files
                .get(token)
                .map_or_else(|| OsString::from(token), OsString::from)
        }));
        args
    }

    fn stdout_text(&self) -> String {
        String::from_utf8(self.stdout.clone()).unwrap_or_else(|err| panic!("stdout utf8: {err}"))
    }

    fn stderr_text(&self) -> String {
        String::from_utf8(self.stderr.clone()).unwrap_or_else(|err| panic!("stderr utf8: {err}"))
    }

    fn assert_exit_code(&self, expected: u8) {
        let exit = self
            .exit_code
            .unwrap_or_else(|| panic!("exit code recorded"));
        assert_eq!(
            exit,
            ExitCode::from(expected),
            "stdout: {}\nstderr: {}",
            self.stdout_text(),
            self.stderr_text()
        );
    }
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"')
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}

#[given("a source file {name} containing {contents}")]
fn given_source_file(world: &RefCell<TestWorld>, name: String, contents: String) {
    world
        .borrow_mut()
        .write_file(unquote(&name), unquote(&contents));
}

#[given("standard input containing {contents}")]
fn given_standard_input(world: &RefCell<TestWorld>, contents: String) {
    world.borrow_mut().stdin = unquote(&contents).as_bytes().to_vec();
}

#[given("an input size limit of {limit} bytes")]
fn given_input_limit(world: &RefCell<TestWorld>, limit: u64) {
    let mut state = world.borrow_mut();
    state.config = state.config.clone().with_max_input_bytes(limit);
}

#[when("the operator runs {command}")]
fn when_operator_runs(world: &RefCell<TestWorld>, command: String) {
    world.borrow_mut().run(unquote(&command));
}

#[then("the CLI exits with code {status}")]
fn then_exit_code(world: &RefCell<TestWorld>, status: u8) {
    world.borrow().assert_exit_code(status);
}

#[then("stdout contains {snippet}")]
fn then_stdout_contains(world: &RefCell<TestWorld>, snippet: String) {
    let stdout = world.borrow().stdout_text();
    let snippet = unquote(&snippet);
    assert!(
        stdout.contains(snippet),
        "stdout {stdout:?} did not contain {snippet:?}"
    );
}

#[then("stderr contains {snippet}")]
fn then_stderr_contains(world: &RefCell<TestWorld>, snippet: String) {
    let stderr = world.borrow().stderr_text();
    let snippet = unquote(&snippet);
    assert!(
        stderr.contains(snippet),
        "stderr {stderr:?} did not contain {snippet:?}"
    );
}

#[then("stdout is empty")]
fn then_stdout_empty(world: &RefCell<TestWorld>) {
    assert_eq!(world.borrow().stdout_text(), "");
}

#[scenario(path = "tests/features/nestcheck_cli.feature")]
fn nestcheck_cli_behaviour(world: RefCell<TestWorld>) {
    let _ = world;
}

#[rstest]
#[case(&["nestcheck", "main.c"], 1, &["nestcheck", "main.c"])]
#[case(&["nestcheck", "--log-filter", "debug", "main.c"], 3, &["nestcheck", "main.c"])]
#[case(&["nestcheck", "--log-format=json"], 2, &["nestcheck"])]
#[case(&["nestcheck"], 9, &["nestcheck"])]
fn prepares_command_arguments(
    #[case] args: &[&str],
    #[case] command_start: usize,
    #[case] expected: &[&str],
) {
    let args: Vec<OsString> = args.iter().map(OsString::from).collect();
    let split = ConfigArgumentSplit {
        config_arguments: Vec::new(),
        command_start,
    };
    let expected: Vec<OsString> = expected.iter().map(OsString::from).collect();
    assert_eq!(prepare_cli_arguments(&args, &split), expected);
}

#[test]
fn help_is_written_to_stdout_and_succeeds() {
    let mut state = TestWorld::new();
    state.run("--help");
    state.assert_exit_code(0);
    assert!(state.stdout_text().contains("Usage: nestcheck"));
    assert!(state.stderr_text().is_empty());
}

#[test]
fn unknown_flags_are_usage_errors() {
    let mut state = TestWorld::new();
    state.run("--colour main.c");
    state.assert_exit_code(10);
    assert!(state.stderr_text().contains("--colour"));
}

#[test]
fn profile_definitions_are_loaded_from_configuration() {
    let mut state = TestWorld::new();
    state.write_file(
        "profiles.json",
        r#"[{
            "name": "lua",
            "extensions": ["lua"],
            "line_comments": ["--"],
            "brackets": [{ "open": "(", "close": ")", "kind": "paren" }]
        }]"#,
    );
    state.write_file("init.lua", "print(1) -- )\n");
    let profiles_path = state
        .files
        .get("profiles.json")
        .cloned()
        .unwrap_or_else(|| panic!("profiles path"));
    state.config = Config::default().with_profiles_path(profiles_path);
    state.run("--output json init.lua");
    state.assert_exit_code(0);
    assert!(
        state
            .stdout_text()
            .contains("\"profile\":\"lua\",\"verdict\":\"balanced\"")
    );
}

#[test]
fn broken_profile_definitions_are_configuration_failures() {
    let mut state = TestWorld::new();
    state.write_file("profiles.json", "[{ \"name\": \"lua\" ");
    state.write_file("main.c", "f();");
    let profiles_path = state
        .files
        .get("profiles.json")
        .cloned()
        .unwrap_or_else(|| panic!("profiles path"));
    state.config = Config::default().with_profiles_path(profiles_path);
    state.run("main.c");
    state.assert_exit_code(2);
    assert!(
        state
            .stderr_text()
            .contains("failed to parse profile definitions")
    );
}
