//! Loader utilities for turning a file into a runnable program instance.
//!
//! Compiled programs (`.ron`) are deserialized and validated; anything else is
//! treated as script source and parsed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use robo_data::{Program, Variables, declared_names, validate_program};
use robo_script::{parse_program_fresh, program_from_ron};

/// A program together with its own variable store.
#[derive(Debug, Clone)]
pub struct LoadedProgram {
    pub program: Program,
    pub vars: Variables,
    /// File the program was read from
    pub origin: PathBuf,
}

/// Load a program from `path`, choosing the format by extension.
///
/// # Errors
/// Errors bubble up from file IO, parsing, deserialization, or validation.
pub fn load_program(path: &Path) -> Result<LoadedProgram> {
    let text = fs::read_to_string(path).with_context(|| format!("reading program from '{}'", path.display()))?;
    let is_compiled = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));
    let (program, vars) = if is_compiled {
        compiled_program(&text).with_context(|| format!("loading compiled program '{}'", path.display()))?
    } else {
        parse_program_fresh(&text).with_context(|| format!("parsing script '{}'", path.display()))?
    };
    info!(
        "loaded '{}' ({} statements, {} variables)",
        path.display(),
        program.statements.len(),
        vars.len()
    );
    Ok(LoadedProgram {
        program,
        vars,
        origin: path.to_path_buf(),
    })
}

/// Deserialize and validate a compiled program, then declare its variables.
///
/// # Errors
/// Returns an error if the RON is malformed or the tree fails validation.
pub fn compiled_program(text: &str) -> Result<(Program, Variables)> {
    let program = program_from_ron(text).context("parsing program RON")?;
    let errors = validate_program(&program);
    if let Some(first) = errors.first() {
        for err in &errors {
            warn!("invalid program: {err}");
        }
        bail!("program failed validation with {} error(s); first: {first}", errors.len());
    }
    let mut vars = Variables::new();
    for name in declared_names(&program) {
        vars.declare(&name);
    }
    Ok((program, vars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use robo_script::{ParseError, compile_program_to_ron};
    use tempfile::tempdir;

    #[test]
    fn source_and_compiled_files_load_to_the_same_tree() {
        let dir = tempdir().expect("temp dir");
        let src = "$d = wallDist; while (gt($d, 0)) { move; $d = sub($d, 1); }";
        let script = dir.path().join("walk.robo");
        fs::write(&script, src).expect("write script");

        let from_source = load_program(&script).expect("load source");
        let compiled = dir.path().join("walk.ron");
        fs::write(&compiled, compile_program_to_ron(&from_source.program).expect("compile")).expect("write ron");
        let from_ron = load_program(&compiled).expect("load ron");

        assert_eq!(from_source.program, from_ron.program);
        assert_eq!(from_ron.vars.get("$d"), Some(0));
        assert_eq!(from_ron.origin, compiled);
    }

    #[test]
    fn deeply_nested_programs_round_trip_through_files() {
        let dir = tempdir().expect("temp dir");
        let loops = 40;
        let adds = 50;
        let src = format!(
            "{}move({}1{});{}",
            "loop { ".repeat(loops),
            "add(1, ".repeat(adds),
            ")".repeat(adds),
            " }".repeat(loops)
        );
        let script = dir.path().join("deep.robo");
        fs::write(&script, &src).expect("write script");
        let from_source = load_program(&script).expect("load source");

        let compiled = dir.path().join("deep.ron");
        fs::write(&compiled, compile_program_to_ron(&from_source.program).expect("compile")).expect("write ron");
        let from_ron = load_program(&compiled).expect("load ron");
        assert_eq!(from_ron.program, from_source.program);
    }

    #[test]
    fn invalid_compiled_tree_is_rejected() {
        let ron = r#"(statements: [Action(Move(Some(Var("$ghost"))))])"#;
        let err = compiled_program(ron).unwrap_err();
        assert!(format!("{err}").contains("$ghost"));
    }

    #[test]
    fn parse_errors_keep_their_type() {
        let dir = tempdir().expect("temp dir");
        let script = dir.path().join("bad.robo");
        fs::write(&script, "loop { move;").expect("write script");
        let err = load_program(&script).unwrap_err();
        assert!(err.downcast_ref::<ParseError>().is_some());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_program(Path::new("no/such/program.robo")).unwrap_err();
        assert!(format!("{err:#}").contains("program.robo"));
    }
}
