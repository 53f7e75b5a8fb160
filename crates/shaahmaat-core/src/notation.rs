//! ShaahMaat block parser.
//!
//! A block is a run of `name: value` header lines, a blank line, then the
//! FEN or PGN body:
//!
//! ```text
//! orientation: black
//! format: fen
//! highlights: e4 e5
//! arrows: e2->e4 e7->e5
//!
//! rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::board_info::{
    Arrow, BoardInfo, NotationFormat, Orientation, SquareName, DEFAULT_BOARD_SIZE,
};
use crate::error::FormatError;
use crate::rules::{ChessRules, ShakmatyRules};

static SQUARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-h])([1-8])$").expect("valid square regex"));
static ARROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-h])([1-8])->([a-h])([1-8])$").expect("valid arrow regex")
});
// parseInt-style: leading integer, anything after it is ignored.
static SIZE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid size regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Fail on header names other than the five known ones instead of skipping them.
    pub reject_unknown_headers: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NotationParser {
    options: ParserOptions,
}

impl NotationParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse with a fresh shakmaty-backed rules engine.
    pub fn parse(&self, source: &str) -> Result<BoardInfo, FormatError> {
        self.parse_with(source, &mut ShakmatyRules::new())
    }

    pub fn parse_with<R: ChessRules + ?Sized>(
        &self,
        source: &str,
        rules: &mut R,
    ) -> Result<BoardInfo, FormatError> {
        let (header_lines, game_notation) = split_block(source);

        let mut headers = HeaderBlock::default();
        for line in header_lines {
            let header = parse_header(line)?;
            headers.apply(&header, &self.options)?;
        }

        let orientation = headers
            .orientation
            .ok_or_else(|| FormatError::missing("Missing orientation header!"))?;
        let size = headers.size.unwrap_or(DEFAULT_BOARD_SIZE);
        let format = headers
            .format
            .ok_or_else(|| FormatError::missing("Missing format header!"))?;

        match format {
            NotationFormat::Fen => rules.load_fen(&game_notation)?,
            NotationFormat::Pgn => rules.load_pgn(&game_notation)?,
        }

        debug!(
            ?orientation,
            ?format,
            size,
            highlights = headers.highlighted_squares.len(),
            arrows = headers.arrows.len(),
            "Parsed ShaahMaat block"
        );

        Ok(BoardInfo {
            board: Some(rules.current_grid()),
            orientation,
            size,
            highlighted_squares: headers.highlighted_squares,
            arrows: headers.arrows,
            format,
            game_notation,
        })
    }
}

/// Parse a block with default options.
pub fn parse(source: &str) -> Result<BoardInfo, FormatError> {
    NotationParser::new().parse(source)
}

/// Parse a block with default options and a caller-supplied rules engine.
pub fn parse_with<R: ChessRules + ?Sized>(
    source: &str,
    rules: &mut R,
) -> Result<BoardInfo, FormatError> {
    NotationParser::new().parse_with(source, rules)
}

/// Split into header lines and the body. The header block ends at the first
/// empty line after a header; empty lines before any header are skipped.
fn split_block(source: &str) -> (Vec<&str>, String) {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut headers = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            headers.push(*line);
        } else if !headers.is_empty() {
            return (headers, lines[i + 1..].join("\n"));
        }
    }
    (headers, String::new())
}

#[derive(Debug, PartialEq, Eq)]
struct Header<'a> {
    name: &'a str,
    value: &'a str,
}

fn parse_header(line: &str) -> Result<Header<'_>, FormatError> {
    let Some(colon) = line.find(':') else {
        return Err(FormatError::syntax("Invalid ShaahMaat header"));
    };
    if colon == 0 {
        return Err(FormatError::syntax("ShaahMaat header must have a name"));
    }
    if colon == line.len() - 1 {
        return Err(FormatError::syntax("ShaahMaat header must have a value"));
    }

    Ok(Header {
        name: line[..colon].trim(),
        value: line[colon + 1..].trim(),
    })
}

/// Header values accumulated while walking the header block.
#[derive(Debug, Default)]
struct HeaderBlock {
    orientation: Option<Orientation>,
    format: Option<NotationFormat>,
    size: Option<u32>,
    highlighted_squares: Vec<SquareName>,
    arrows: Vec<Arrow>,
}

impl HeaderBlock {
    fn apply(&mut self, header: &Header<'_>, options: &ParserOptions) -> Result<(), FormatError> {
        match header.name {
            "orientation" => {
                if self.orientation.is_some() {
                    return Err(FormatError::semantic("Only one orientation header is allowed!"));
                }
                self.orientation = Some(match header.value {
                    "white" => Orientation::White,
                    "black" => Orientation::Black,
                    _ => {
                        return Err(FormatError::semantic(
                            "Invalid orientation. Expected white or black!",
                        ))
                    }
                });
            }
            "format" => {
                if self.format.is_some() {
                    return Err(FormatError::semantic("Only one format header is allowed!"));
                }
                self.format = Some(match header.value {
                    "fen" => NotationFormat::Fen,
                    "pgn" => NotationFormat::Pgn,
                    _ => return Err(FormatError::semantic("Invalid format. Expected fen or pgn!")),
                });
            }
            "highlights" => {
                // A previous highlights header only counts once it produced squares.
                if !self.highlighted_squares.is_empty() {
                    return Err(FormatError::semantic("Only one highlight header is allowed!"));
                }
                for token in header.value.split(' ') {
                    let square = SQUARE_RE
                        .captures(token)
                        .and_then(|caps| square_from_caps(&caps, 1))
                        .ok_or_else(|| FormatError::semantic("Invalid highlight header!"))?;
                    self.highlighted_squares.push(square);
                }
            }
            "size" => {
                if self.size.is_some() {
                    return Err(FormatError::semantic("Only one size header is allowed!"));
                }
                self.size = Some(parse_size(header.value)?);
            }
            "arrows" => {
                if !self.arrows.is_empty() {
                    return Err(FormatError::semantic("Only one arrows header is allowed!"));
                }
                for token in header.value.split(' ') {
                    let arrow = ARROW_RE
                        .captures(token)
                        .and_then(|caps| {
                            Some(Arrow {
                                from: square_from_caps(&caps, 1)?,
                                to: square_from_caps(&caps, 3)?,
                            })
                        })
                        .ok_or_else(|| FormatError::semantic("Invalid annotation header!"))?;
                    self.arrows.push(arrow);
                }
            }
            unknown if options.reject_unknown_headers => {
                return Err(FormatError::semantic(format!(
                    "Unknown ShaahMaat header: {unknown}"
                )));
            }
            unknown => debug!(header = unknown, "Ignoring unknown ShaahMaat header"),
        }
        Ok(())
    }
}

/// Reads the file/rank pair starting at capture group `first`.
fn square_from_caps(caps: &regex::Captures<'_>, first: usize) -> Option<SquareName> {
    let file = caps.get(first)?.as_str().chars().next()?;
    let rank = caps.get(first + 1)?.as_str().chars().next()?;
    SquareName::from_chars(file, rank)
}

fn parse_size(value: &str) -> Result<u32, FormatError> {
    SIZE_PREFIX_RE
        .find(value)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .filter(|&size| size > 0)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(|| FormatError::semantic("Invalid size header!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_info::Grid;
    use crate::error::PositionDecodeError;

    /// Records what the parser hands to the engine.
    #[derive(Default)]
    struct RecordingRules {
        fen: Option<String>,
        pgn: Option<String>,
    }

    impl ChessRules for RecordingRules {
        fn load_fen(&mut self, fen: &str) -> Result<(), PositionDecodeError> {
            self.fen = Some(fen.to_string());
            Ok(())
        }

        fn load_pgn(&mut self, pgn: &str) -> Result<(), PositionDecodeError> {
            self.pgn = Some(pgn.to_string());
            Ok(())
        }

        fn current_grid(&self) -> Grid {
            [[None; 8]; 8]
        }
    }

    #[test]
    fn test_parse_header_trims_name_and_value() {
        let header = parse_header("  orientation :   white ").unwrap();
        assert_eq!(header, Header { name: "orientation", value: "white" });

        // Only the first colon separates.
        let header = parse_header("note: a:b").unwrap();
        assert_eq!(header, Header { name: "note", value: "a:b" });
    }

    #[test]
    fn test_parse_header_errors() {
        let err = parse_header("bogus").unwrap_err();
        assert!(matches!(err, FormatError::HeaderSyntax(_)));
        assert_eq!(err.to_string(), "Invalid ShaahMaat header");

        let err = parse_header(":white").unwrap_err();
        assert_eq!(err.to_string(), "ShaahMaat header must have a name");

        let err = parse_header("orientation:").unwrap_err();
        assert_eq!(err.to_string(), "ShaahMaat header must have a value");
    }

    #[test]
    fn test_body_is_rejoined_without_trailing_newline() {
        let mut rules = RecordingRules::default();
        let source = "orientation: white\nformat: pgn\n\n1. e4 e5\n2. Nf3 Nc6\n";
        let info = parse_with(source, &mut rules).unwrap();

        assert_eq!(info.game_notation, "1. e4 e5\n2. Nf3 Nc6\n");
        assert_eq!(rules.pgn.as_deref(), Some("1. e4 e5\n2. Nf3 Nc6\n"));
        assert!(rules.fen.is_none());
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let mut rules = RecordingRules::default();
        let info = parse_with(
            "\n\norientation: black\nformat: fen\n\n8/8/8/8/8/8/8/8 w - - 0 1",
            &mut rules,
        )
        .unwrap();
        assert_eq!(info.orientation, Orientation::Black);
        assert_eq!(rules.fen.as_deref(), Some("8/8/8/8/8/8/8/8 w - - 0 1"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut rules = RecordingRules::default();
        let info = parse_with(
            "orientation: white\r\nformat: fen\r\n\r\n8/8/8/8/8/8/8/8 w - - 0 1",
            &mut rules,
        )
        .unwrap();
        assert_eq!(info.format, NotationFormat::Fen);
        assert_eq!(info.game_notation, "8/8/8/8/8/8/8/8 w - - 0 1");
    }

    #[test]
    fn test_no_blank_line_means_empty_body() {
        let mut rules = RecordingRules::default();
        let info = parse_with("orientation: white\nformat: pgn", &mut rules).unwrap();
        assert_eq!(info.game_notation, "");
        assert_eq!(rules.pgn.as_deref(), Some(""));
    }

    #[test]
    fn test_size_is_parsed_like_parse_int() {
        assert_eq!(parse_size("300").unwrap(), 300);
        assert_eq!(parse_size("320px").unwrap(), 320);
        assert_eq!(parse_size("+64").unwrap(), 64);
        assert!(parse_size("px320").is_err());
        assert!(parse_size("0").is_err());
        assert!(parse_size("-8").is_err());
        assert!(parse_size("99999999999999999999").is_err());
    }

    #[test]
    fn test_duplicate_headers() {
        let mut rules = RecordingRules::default();
        for (source, msg) in [
            ("format: fen\nformat: pgn\norientation: white", "Only one format header is allowed!"),
            ("size: 200\nsize: 300\norientation: white", "Only one size header is allowed!"),
            (
                "highlights: e4\nhighlights: d4\norientation: white",
                "Only one highlight header is allowed!",
            ),
            (
                "arrows: e2->e4\narrows: d2->d4\norientation: white",
                "Only one arrows header is allowed!",
            ),
        ] {
            let err = parse_with(source, &mut rules).unwrap_err();
            assert!(matches!(err, FormatError::HeaderSemantic(_)), "{source}");
            assert_eq!(err.to_string(), msg);
        }
    }

    #[test]
    fn test_invalid_tokens() {
        let mut rules = RecordingRules::default();
        for (source, msg) in [
            ("highlights: e4  e5", "Invalid highlight header!"),
            ("highlights: e9", "Invalid highlight header!"),
            ("highlights: e4e5", "Invalid highlight header!"),
            ("arrows: e2-e4", "Invalid annotation header!"),
            ("arrows: e2=>e4", "Invalid annotation header!"),
            ("arrows: e2->e9", "Invalid annotation header!"),
            ("format: san", "Invalid format. Expected fen or pgn!"),
            ("orientation: purple", "Invalid orientation. Expected white or black!"),
        ] {
            let err = parse_with(source, &mut rules).unwrap_err();
            assert_eq!(err.to_string(), msg, "{source}");
        }
    }

    #[test]
    fn test_unknown_headers() {
        let source = "orientation: white\ntheme: dark\nformat: fen\n\n8/8/8/8/8/8/8/8 w - - 0 1";

        let mut rules = RecordingRules::default();
        assert!(NotationParser::new().parse_with(source, &mut rules).is_ok());

        let strict = NotationParser::with_options(ParserOptions {
            reject_unknown_headers: true,
        });
        let err = strict.parse_with(source, &mut rules).unwrap_err();
        assert_eq!(err.to_string(), "Unknown ShaahMaat header: theme");
    }

    #[test]
    fn test_missing_orientation_checked_before_format() {
        let mut rules = RecordingRules::default();
        let err = parse_with("size: 300\n\n", &mut rules).unwrap_err();
        assert!(matches!(err, FormatError::MissingHeader(_)));
        assert_eq!(err.to_string(), "Missing orientation header!");
        assert!(rules.fen.is_none() && rules.pgn.is_none());
    }

    #[test]
    fn test_engine_failure_propagates() {
        let err = parse("orientation: white\nformat: pgn\n\n1. e4 e5 2. Ke3").unwrap_err();
        match err {
            FormatError::PositionDecode(PositionDecodeError::IllegalMove { san, .. }) => {
                assert_eq!(san, "Ke3")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
