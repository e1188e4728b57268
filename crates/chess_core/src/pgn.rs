//! Portable Game Notation reader.
//!
//! Only the mainline of each game is kept. Comments, recursive variations,
//! numeric annotation glyphs and move suffixes are skipped. A file may hold any
//! number of games; a game ends at its result token or where the next tag
//! section begins.

use thiserror::Error;

use crate::{
    board::{FenError, Position},
    san::{SanError, parse_san},
    types::Move,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PgnError {
    #[error("game {game}: malformed tag pair on line {line}")]
    MalformedTag { game: usize, line: usize },
    #[error("game {game}: unterminated comment starting on line {line}")]
    UnterminatedComment { game: usize, line: usize },
    #[error("game {game}: unbalanced ')' on line {line}")]
    UnbalancedVariation { game: usize, line: usize },
    #[error("game {game}: invalid FEN tag: {source}")]
    Fen {
        game: usize,
        #[source]
        source: FenError,
    },
    #[error("game {game}, ply {ply}: {source}")]
    Move {
        game: usize,
        ply: usize,
        #[source]
        source: SanError,
    },
}

/// One parsed game: its tag section, start position and mainline.
#[derive(Debug, Clone)]
pub struct Game {
    pub tags: Vec<(String, String)>,
    pub start: Position,
    pub moves: Vec<Move>,
    pub result: Option<String>,
}

impl Game {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Positions before each move, paired with the move played from them.
    pub fn replay(&self) -> impl Iterator<Item = (Position, Move)> + '_ {
        let mut pos = self.start.clone();
        self.moves.iter().map(move |&mv| {
            let before = pos.clone();
            pos.make_move(mv);
            (before, mv)
        })
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Tag(String, String),
    Symbol(String),
    Result(String),
}

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    text: &'a str,
    line: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            text,
            line: 1,
            at_line_start: true,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.at_line_start = true;
        } else {
            self.at_line_start = false;
        }
        Some(ch)
    }

    fn skip_line(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// `(` and `)` come back as symbols so the caller can track variation depth.
    fn next_token(&mut self, game: usize) -> Result<Option<Token>, PgnError> {
        loop {
            let Some(&(start, ch)) = self.chars.peek() else {
                return Ok(None);
            };
            match ch {
                '%' if self.at_line_start => self.skip_line(),
                c if c.is_whitespace() => {
                    self.bump();
                }
                ';' => self.skip_line(),
                '{' => {
                    let line = self.line;
                    loop {
                        match self.bump() {
                            Some('}') => break,
                            Some(_) => {}
                            None => return Err(PgnError::UnterminatedComment { game, line }),
                        }
                    }
                }
                '[' => return self.tag(game).map(Some),
                ']' | '}' => {
                    self.bump();
                }
                '(' | ')' => {
                    self.bump();
                    return Ok(Some(Token::Symbol(ch.to_string())));
                }
                _ => {
                    let mut end = start;
                    while let Some(&(idx, c)) = self.chars.peek() {
                        if c.is_whitespace() || "[]{}();".contains(c) {
                            break;
                        }
                        end = idx + c.len_utf8();
                        self.bump();
                    }
                    let word = &self.text[start..end];
                    if RESULTS.contains(&word) {
                        return Ok(Some(Token::Result(word.to_string())));
                    }
                    return Ok(Some(Token::Symbol(word.to_string())));
                }
            }
        }
    }

    fn tag(&mut self, game: usize) -> Result<Token, PgnError> {
        let line = self.line;
        let malformed = PgnError::MalformedTag { game, line };
        self.bump(); // '['

        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() || c == '"' || c == ']' {
                break;
            }
            name.push(c);
            self.bump();
        }
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.bump();
        }
        if name.is_empty() || self.bump() != Some('"') {
            return Err(malformed);
        }

        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(malformed),
                },
                Some('"') => break,
                Some('\n') | None => return Err(malformed),
                Some(c) => value.push(c),
            }
        }
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace() && *c != '\n') {
            self.bump();
        }
        if self.bump() != Some(']') {
            return Err(malformed);
        }
        Ok(Token::Tag(name, value))
    }
}

/// Strips a leading move number (`12.`, `12...`) from a symbol; returns the
/// remaining move text, which may be empty.
fn strip_move_number(symbol: &str) -> &str {
    let digits = symbol.len() - symbol.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = &symbol[digits..];
    if digits > 0 && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        symbol
    }
}

fn is_annotation(symbol: &str) -> bool {
    symbol.starts_with('$') || symbol.chars().all(|c| c == '!' || c == '?')
}

#[derive(Default)]
struct GameBuilder {
    tags: Vec<(String, String)>,
    position: Option<Position>,
    start: Option<Position>,
    moves: Vec<Move>,
    result: Option<String>,
}

impl GameBuilder {
    fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.moves.is_empty() && self.result.is_none()
    }

    fn in_movetext(&self) -> bool {
        !self.moves.is_empty() || self.result.is_some()
    }

    fn ensure_started(&mut self, game: usize) -> Result<&mut Position, PgnError> {
        if self.position.is_none() {
            let start = match self.tags.iter().find(|(k, _)| k.eq_ignore_ascii_case("FEN")) {
                Some((_, fen)) => Position::from_fen(fen)
                    .map_err(|source| PgnError::Fen { game, source })?,
                None => Position::startpos(),
            };
            self.start = Some(start.clone());
            self.position = Some(start);
        }
        Ok(self.position.get_or_insert_with(Position::startpos))
    }

    fn push_san(&mut self, game: usize, san: &str) -> Result<(), PgnError> {
        let ply = self.moves.len() + 1;
        let pos = self.ensure_started(game)?;
        let mv = parse_san(pos, san).map_err(|source| PgnError::Move { game, ply, source })?;
        pos.make_move(mv);
        self.moves.push(mv);
        Ok(())
    }

    fn finish(mut self, game: usize) -> Result<Game, PgnError> {
        self.ensure_started(game)?;
        Ok(Game {
            start: self.start.unwrap_or_default(),
            tags: self.tags,
            moves: self.moves,
            result: self.result,
        })
    }
}

/// Parses every game in `text`.
pub fn read_games(text: &str) -> Result<Vec<Game>, PgnError> {
    let mut lexer = Lexer::new(text);
    let mut games = Vec::new();
    let mut current = GameBuilder::default();
    let mut depth = 0usize;

    while let Some(token) = lexer.next_token(games.len() + 1)? {
        let game = games.len() + 1;
        match token {
            Token::Tag(name, value) => {
                if current.in_movetext() {
                    games.push(std::mem::take(&mut current).finish(game)?);
                    depth = 0;
                }
                current.tags.push((name, value));
            }
            Token::Symbol(s) if s == "(" => depth += 1,
            Token::Symbol(s) if s == ")" => {
                if depth == 0 {
                    return Err(PgnError::UnbalancedVariation {
                        game,
                        line: lexer.line,
                    });
                }
                depth -= 1;
            }
            Token::Result(_) if depth > 0 => {}
            Token::Result(result) => {
                current.result = Some(result);
                games.push(std::mem::take(&mut current).finish(game)?);
            }
            Token::Symbol(_) if depth > 0 => {}
            Token::Symbol(symbol) => {
                let san = strip_move_number(&symbol);
                if san.is_empty() || is_annotation(san) {
                    continue;
                }
                current.push_san(game, san)?;
            }
        }
    }

    if !current.is_empty() {
        let game = games.len() + 1;
        games.push(current.finish(game)?);
    }
    Ok(games)
}

#[cfg(test)]
#[path = "pgn_tests.rs"]
mod pgn_tests;
