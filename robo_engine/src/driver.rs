//! Tick driver.
//!
//! Each tick invokes the program from its root once. Under
//! [`LoopPolicy::SinglePass`](crate::LoopPolicy::SinglePass) this is what makes
//! a `loop` statement repeat. Variables persist across ticks.

use log::{debug, info};
use robo_data::{Value, Variables};

use crate::actor::Actor;
use crate::config::RunConfig;
use crate::interpreter::{ExecError, Interpreter};
use crate::loader::LoadedProgram;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub ticks: u64,
    pub actions: u64,
    pub vars: Vec<(String, Value)>,
}

impl RunReport {
    fn snapshot(ticks: u64, actions: u64, vars: &Variables) -> Self {
        Self {
            ticks,
            actions,
            vars: vars.iter().map(|(name, value)| (name.to_string(), value)).collect(),
        }
    }
}

/// Run `instance` for `config.ticks` ticks against `actor`.
///
/// # Errors
/// Stops at the first [`ExecError`]; ticks already run keep their effects.
pub fn run_ticks<A: Actor + ?Sized>(
    instance: &mut LoadedProgram,
    actor: &mut A,
    config: &RunConfig,
) -> Result<RunReport, ExecError> {
    let policy = config.loop_policy();
    info!(
        "running '{}' for {} tick(s) with {policy:?}",
        instance.origin.display(),
        config.ticks
    );
    let mut actions = 0;
    for tick in 0..config.ticks {
        let mut interp = Interpreter::new(&mut *actor, &mut instance.vars).with_loop_policy(policy);
        interp.run(&instance.program)?;
        actions += interp.actions_performed();
        debug!("tick {tick} done, {actions} action(s) so far");
    }
    info!("run finished: {} tick(s), {actions} action(s)", config.ticks);
    Ok(RunReport::snapshot(config.ticks, actions, &instance.vars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::HostAction;
    use crate::host::ScriptedActor;
    use robo_script::parse_program_fresh;
    use std::path::PathBuf;

    fn instance(src: &str) -> LoadedProgram {
        let (program, vars) = parse_program_fresh(src).expect("parse ok");
        LoadedProgram {
            program,
            vars,
            origin: PathBuf::from("inline.robo"),
        }
    }

    #[test]
    fn loop_repeats_once_per_tick() {
        let mut prog = instance("$t = 0; loop { move; } $t = add($t, 1);");
        let mut actor = ScriptedActor::default();
        let config = RunConfig {
            ticks: 3,
            ..RunConfig::default()
        };
        let report = run_ticks(&mut prog, &mut actor, &config).expect("run ok");
        assert_eq!(report.ticks, 3);
        assert_eq!(report.actions, 3);
        assert_eq!(actor.count(HostAction::Move), 3);
        assert_eq!(report.vars, vec![("$t".to_string(), 1)]);
    }

    #[test]
    fn variables_persist_across_ticks() {
        let mut prog = instance("$n = 0; $n = add($n, 1); wait;");
        // drop the initializer so each tick only increments
        prog.program.statements.remove(0);
        let mut actor = ScriptedActor::default();
        let config = RunConfig {
            ticks: 4,
            ..RunConfig::default()
        };
        let report = run_ticks(&mut prog, &mut actor, &config).expect("run ok");
        assert_eq!(report.actions, 4);
        assert_eq!(report.vars, vec![("$n".to_string(), 4)]);
    }

    #[test]
    fn zero_ticks_runs_nothing() {
        let mut prog = instance("move;");
        let mut actor = ScriptedActor::default();
        let config = RunConfig {
            ticks: 0,
            ..RunConfig::default()
        };
        let report = run_ticks(&mut prog, &mut actor, &config).expect("run ok");
        assert_eq!(report.actions, 0);
        assert!(actor.log().is_empty());
    }
}
