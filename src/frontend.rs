//! Compile driver shared by every surface syntax
//!
//! The rest of a toolchain programs against [`Frontend`] only: hand it source
//! text, then read the tree back. A [`Driver`] owns the result of its last
//! successful compile and serializes compiles on the same instance, so a
//! reader never sees a half built tree. Separate drivers share nothing.

use crate::errors::{CompileError, DriverError};
use crate::parser::ast::Node;
use crate::parser::lexer::Lexer;
use crate::parser::{Parser, Syntax};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Names accepted by [`by_name`]
pub const SYNTAXES: [&str; 2] = ["myrmidon", "sml"];

/// Uniform compile and AST retrieval contract
pub trait Frontend: Send + Sync {
    /// Surface syntax name, e.g. `"myrmidon"`
    fn name(&self) -> &'static str;

    /// Compile `source`, replacing the stored tree on success.
    ///
    /// On failure the previous tree (if any) is kept and the first
    /// diagnostic is returned and remembered as [`Frontend::last_error`].
    fn compile(&self, source: &str) -> Result<(), CompileError>;

    /// Tree of the most recent successful compile
    fn ast(&self) -> Result<Arc<Node>, DriverError>;

    /// Source lines of the most recent successful compile
    fn lines(&self) -> Result<Vec<String>, DriverError>;

    /// One source line, 1-based
    fn line(&self, number: usize) -> Result<String, DriverError>;

    /// Error of the most recent compile, `None` if it succeeded
    fn last_error(&self) -> Option<CompileError>;
}

#[derive(Debug, Default)]
struct Session {
    tree: Option<Arc<Node>>,
    lines: Vec<Arc<str>>,
    last_error: Option<CompileError>,
}

/// [`Frontend`] for one [`Syntax`]
#[derive(Debug)]
pub struct Driver {
    syntax: Syntax,
    session: Mutex<Session>,
}

impl Driver {
    pub fn new(syntax: Syntax) -> Self {
        Self {
            syntax,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn myrmidon() -> Self {
        Self::new(Syntax::Myrmidon)
    }

    pub fn sml() -> Self {
        Self::new(Syntax::Sml)
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// The session only ever holds complete values, so a panic in another
    /// holder leaves nothing half written.
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Frontend for Driver {
    fn name(&self) -> &'static str {
        self.syntax.name()
    }

    fn compile(&self, source: &str) -> Result<(), CompileError> {
        // Held for the whole compile: concurrent callers queue here
        let mut session = self.session();
        debug!(syntax = self.name(), bytes = source.len(), "compiling");

        match compile_source(source, self.syntax) {
            Ok((tree, lines)) => {
                debug!(nodes = tree.walk().len(), lines = lines.len(), "compiled");
                session.tree = Some(Arc::new(tree));
                session.lines = lines;
                session.last_error = None;
                Ok(())
            }
            Err(err) => {
                debug!(%err, "compile failed");
                session.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn ast(&self) -> Result<Arc<Node>, DriverError> {
        self.session().tree.clone().ok_or(DriverError::NoResult)
    }

    fn lines(&self) -> Result<Vec<String>, DriverError> {
        let session = self.session();
        if session.tree.is_none() {
            return Err(DriverError::NoResult);
        }
        Ok(session.lines.iter().map(|line| line.to_string()).collect())
    }

    fn line(&self, number: usize) -> Result<String, DriverError> {
        let session = self.session();
        if session.tree.is_none() {
            return Err(DriverError::NoResult);
        }
        number
            .checked_sub(1)
            .and_then(|idx| session.lines.get(idx))
            .map(|line| line.to_string())
            .ok_or(DriverError::LineOutOfRange {
                line: number,
                count: session.lines.len(),
            })
    }

    fn last_error(&self) -> Option<CompileError> {
        self.session().last_error.clone()
    }
}

/// Run lexer and grammar over `source`, returning the tree and its lines
pub fn compile_source(source: &str, syntax: Syntax) -> Result<(Node, Vec<Arc<str>>), CompileError> {
    let mut parser = Parser::new(Lexer::new(source), syntax)?;
    let outcome = parser.parse_program();
    let lines = parser.into_source().into_lines();
    outcome.into_result().map(|tree| (tree, lines))
}

/// Driver for the syntax called `name`, if there is one
pub fn by_name(name: &str) -> Option<Box<dyn Frontend>> {
    Syntax::from_name(name).map(|syntax| Box::new(Driver::new(syntax)) as Box<dyn Frontend>)
}
