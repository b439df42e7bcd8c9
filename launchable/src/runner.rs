//! Process spawning for launchables.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{LaunchError, Result};

/// A command line ready to be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    program: String,
    arguments: Vec<String>,
}

impl Runner {
    /// Build a runner, splitting `arguments` into shell words.
    pub fn new(program: impl Into<String>, arguments: &str) -> Result<Self> {
        let arguments = shlex::split(arguments)
            .ok_or_else(|| LaunchError::InvalidArguments(arguments.to_string()))?;

        Ok(Self {
            program: program.into(),
            arguments,
        })
    }

    /// Build a runner from a full command line plus extra `arguments`.
    pub fn from_command(command: &str, arguments: &str) -> Result<Self> {
        let mut words = shlex::split(command)
            .ok_or_else(|| LaunchError::InvalidArguments(command.to_string()))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| LaunchError::InvalidArguments(command.to_string()))?;

        let mut runner = Self::new(program, arguments)?;
        let mut leading: Vec<String> = words.collect();
        leading.append(&mut runner.arguments);
        runner.arguments = leading;
        Ok(runner)
    }

    /// The program to start.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The split arguments.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Start the process without waiting for it.
    ///
    /// A background thread reaps the child so it does not linger as a zombie.
    pub fn spawn_detached(&self) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        debug!("Started {} (pid {})", self.program, child.id());

        let program = self.program.clone();
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                warn!("Failed to reap {program}: {e}");
            }
        });

        Ok(())
    }
}

/// Hand a path or URL to the platform opener.
pub(crate) fn open_target(target: &OsStr) -> Result<()> {
    open::that_detached(target).map_err(|source| LaunchError::Open {
        target: target.to_string_lossy().into_owned(),
        source,
    })
}
