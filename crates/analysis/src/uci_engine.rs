//! External UCI engine driven over stdin/stdout.
//!
//! The process lives exactly as long as its [`UciEngine`] handle. Dropping the
//! handle sends `quit`, waits a short grace period and kills the process if it
//! is still running, so every exit path of an analysis run releases it.

use std::{
    io::{BufRead, BufReader, BufWriter, Write},
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use chess_core::{Position, parse_uci_move};

use crate::{
    config::EngineConfig,
    evaluator::{Evaluation, EvaluatorError, EvaluatorLauncher, MoveEvaluator, Score},
};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct UciEngine {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    name: String,
    think_time: Duration,
    shutdown_grace: Duration,
}

impl UciEngine {
    /// Starts the engine process and completes the `uci`/`isready` handshake.
    pub fn spawn(config: &EngineConfig) -> Result<Self, EvaluatorError> {
        let program = config.program.display().to_string();
        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EvaluatorError::Launch {
                program: program.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EvaluatorError::Closed("stdio pipes"));
        };

        // From here on Drop owns the process, including on handshake failure.
        let mut engine = Self {
            child,
            stdin: BufWriter::new(stdin),
            stdout: BufReader::new(stdout),
            name: program,
            think_time: config.think_time(),
            shutdown_grace: config.shutdown_grace(),
        };

        engine.send("uci")?;
        loop {
            let line = engine.read_line("uciok")?;
            if line == "uciok" {
                break;
            }
            if let Some(name) = line.strip_prefix("id name ") {
                engine.name = name.trim().to_string();
            }
        }
        for (option, value) in &config.options {
            engine.send(&format!("setoption name {option} value {value}"))?;
        }
        engine.sync()?;

        tracing::info!(
            engine = %engine.name,
            think_ms = engine.think_time.as_millis() as u64,
            "engine ready"
        );
        Ok(engine)
    }

    fn send(&mut self, command: &str) -> Result<(), EvaluatorError> {
        tracing::trace!(command, "-> engine");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self, waiting_for: &'static str) -> Result<String, EvaluatorError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(EvaluatorError::Closed(waiting_for));
        }
        let line = line.trim_end().to_string();
        tracing::trace!(line = %line, "<- engine");
        Ok(line)
    }

    fn sync(&mut self) -> Result<(), EvaluatorError> {
        self.send("isready")?;
        while self.read_line("readyok")? != "readyok" {}
        Ok(())
    }
}

impl MoveEvaluator for UciEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) -> Result<(), EvaluatorError> {
        self.send("ucinewgame")?;
        self.sync()
    }

    fn evaluate(&mut self, pos: &Position) -> Result<Evaluation, EvaluatorError> {
        self.send(&format!("position fen {}", pos.to_fen()))?;
        self.send(&format!("go movetime {}", self.think_time.as_millis()))?;

        let mut evaluation = Evaluation::from_score(Score::None);
        loop {
            let line = self.read_line("bestmove")?;
            if let Some(rest) = line
                .strip_prefix("bestmove")
                .filter(|rest| rest.is_empty() || rest.starts_with(' '))
            {
                evaluation.best_move = rest
                    .split_whitespace()
                    .next()
                    .and_then(|token| parse_uci_move(pos, token));
                return Ok(evaluation);
            }
            if let Some((score, depth)) = parse_info_score(&line) {
                evaluation.score = score;
                if depth.is_some() {
                    evaluation.depth = depth;
                }
            }
        }
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send("stop");
        let _ = self.send("quit");

        let deadline = Instant::now() + self.shutdown_grace;
        loop {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) if Instant::now() < deadline => thread::sleep(EXIT_POLL_INTERVAL),
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(engine = %self.name, error = %err, "failed to poll engine exit");
                    break;
                }
            }
        }

        tracing::warn!(engine = %self.name, "engine ignored quit, killing it");
        if let Err(err) = self.child.kill() {
            tracing::warn!(engine = %self.name, error = %err, "failed to kill engine");
        }
        let _ = self.child.wait();
    }
}

/// Extracts the score (and depth, when present) from a UCI `info` line.
///
/// Lines for secondary principal variations (`multipv` other than 1) are
/// ignored, as is everything after `pv` or `string`.
pub fn parse_info_score(line: &str) -> Option<(Score, Option<u32>)> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("info") {
        return None;
    }

    let mut score = None;
    let mut depth = None;
    while let Some(token) = tokens.next() {
        match token {
            "depth" => depth = tokens.next().and_then(|t| t.parse().ok()),
            "multipv" => {
                if tokens.next() != Some("1") {
                    return None;
                }
            }
            "score" => {
                let kind = tokens.next();
                let value = tokens.next().and_then(|t| t.parse::<i32>().ok());
                score = match (kind, value) {
                    (Some("cp"), Some(cp)) => Some(Score::Centipawns(cp)),
                    (Some("mate"), Some(moves)) => Some(Score::Mate(moves)),
                    _ => score,
                };
            }
            "pv" | "string" => break,
            _ => {}
        }
    }
    score.map(|score| (score, depth))
}

/// Launches one [`UciEngine`] per analysis run.
#[derive(Debug, Clone)]
pub struct UciLauncher {
    config: EngineConfig,
}

impl UciLauncher {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl EvaluatorLauncher for UciLauncher {
    fn launch(&self) -> Result<Box<dyn MoveEvaluator>, EvaluatorError> {
        Ok(Box::new(UciEngine::spawn(&self.config)?))
    }
}

#[cfg(test)]
#[path = "uci_engine_tests.rs"]
mod uci_engine_tests;
