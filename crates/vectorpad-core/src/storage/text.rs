//! Native line-oriented text format.
//!
//! One record per line, fields separated by whitespace:
//!
//! ```text
//! line sx sy ex ey (r,g,b)
//! rect sx sy ex ey (r,g,b) s
//! rect sx sy ex ey (r,g,b) r radius
//! begin
//! end
//! ```
//!
//! Groups are written as `begin`, their children, then `end`. Group anchors
//! are not stored; they are rebuilt from the children on load.

use super::{StorageError, StorageResult};
use crate::canvas::CanvasDocument;
use crate::shapes::{Color, CornerStyle, Group, Line, Point, Rectangle, Shape};
use std::fmt::Write;

/// Serialize a document, depth-first.
pub fn encode(document: &CanvasDocument) -> String {
    let mut out = String::new();
    for shape in document.shapes_ordered() {
        write_shape(&mut out, shape);
    }
    out
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Line(line) => {
            let _ = writeln!(
                out,
                "line {} {} {} {} {}",
                line.start.x,
                line.start.y,
                line.end.x,
                line.end.y,
                ColorToken(line.color)
            );
        }
        Shape::Rectangle(rect) => {
            let _ = write!(
                out,
                "rect {} {} {} {} {}",
                rect.start.x,
                rect.start.y,
                rect.end.x,
                rect.end.y,
                ColorToken(rect.color)
            );
            let _ = match rect.corner {
                CornerStyle::Square => writeln!(out, " s"),
                CornerStyle::Rounded { radius } => writeln!(out, " r {radius}"),
            };
        }
        Shape::Group(group) => {
            out.push_str("begin\n");
            for child in group.children() {
                write_shape(out, child);
            }
            out.push_str("end\n");
        }
    }
}

struct ColorToken(Color);

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0.r, self.0.g, self.0.b)
    }
}

/// Parse a document. Blank lines are ignored.
///
/// # Errors
///
/// Returns [`StorageError::MalformedRecord`] for a record that cannot be
/// parsed (including an `end` with no open group, or groups nested deeper
/// than [`MAX_GROUP_DEPTH`]) and [`StorageError::UnterminatedGroup`] when
/// the input ends inside a group.
pub fn decode(input: &str) -> StorageResult<CanvasDocument> {
    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty())
        .collect();

    let mut pos = 0;
    let shapes = parse_nodes(&lines, &mut pos, None, 0)?;

    let mut document = CanvasDocument::new();
    for shape in shapes {
        document.add_shape(shape);
    }
    Ok(document)
}

/// Deepest group nesting accepted by [`decode`].
pub const MAX_GROUP_DEPTH: usize = 256;

/// Parse records until EOF, or until the `end` closing the group opened on
/// line `open`. `depth` counts the groups currently open.
fn parse_nodes(
    lines: &[(usize, &str)],
    pos: &mut usize,
    open: Option<usize>,
    depth: usize,
) -> StorageResult<Vec<Shape>> {
    let mut nodes = Vec::new();

    while let Some(&(line, text)) = lines.get(*pos) {
        *pos += 1;
        let fields: Vec<&str> = text.split_whitespace().collect();
        match fields[..] {
            ["line", ref rest @ ..] => nodes.push(parse_line(line, rest)?),
            ["rect", ref rest @ ..] => nodes.push(parse_rect(line, rest)?),
            ["begin"] => {
                if depth >= MAX_GROUP_DEPTH {
                    return Err(malformed(line, "groups nested too deeply"));
                }
                let children = parse_nodes(lines, pos, Some(line), depth + 1)?;
                nodes.push(Group::new(children).into());
            }
            ["end"] => {
                return match open {
                    Some(_) => Ok(nodes),
                    None => Err(malformed(line, "`end` without a matching `begin`")),
                };
            }
            [keyword @ ("begin" | "end"), ref rest @ ..] => {
                return Err(malformed(
                    line,
                    format!("`{keyword}` expects no fields, found {}", rest.len()),
                ));
            }
            [keyword, ..] => return Err(malformed(line, format!("unknown record `{keyword}`"))),
            [] => {}
        }
    }

    match open {
        Some(line) => Err(StorageError::UnterminatedGroup { line }),
        None => Ok(nodes),
    }
}

fn parse_line(line: usize, fields: &[&str]) -> StorageResult<Shape> {
    let [sx, sy, ex, ey, color] = fields else {
        return Err(malformed(line, format!("`line` expects 5 fields, found {}", fields.len())));
    };
    let start = parse_point(line, sx, sy)?;
    let end = parse_point(line, ex, ey)?;
    let color = parse_color(line, color)?;
    Ok(Line::new(start, end, color).into())
}

fn parse_rect(line: usize, fields: &[&str]) -> StorageResult<Shape> {
    let (geometry, corner) = match fields {
        [sx, sy, ex, ey, color, "s"] => ([sx, sy, ex, ey, color], CornerStyle::Square),
        [sx, sy, ex, ey, color, "r", radius] => {
            let radius = radius
                .parse::<u32>()
                .map_err(|_| malformed(line, format!("invalid radius `{radius}`")))?;
            ([sx, sy, ex, ey, color], CornerStyle::Rounded { radius })
        }
        [_, _, _, _, _, style, ..] if *style != "s" && *style != "r" => {
            return Err(malformed(line, format!("unknown corner style `{style}`")));
        }
        _ => {
            return Err(malformed(
                line,
                format!("`rect` expects 6 or 7 fields, found {}", fields.len()),
            ));
        }
    };

    let [sx, sy, ex, ey, color] = geometry;
    let mut rect = Rectangle::new(parse_point(line, sx, sy)?, parse_point(line, ex, ey)?, parse_color(line, color)?);
    rect.corner = corner;
    Ok(rect.into())
}

fn parse_point(line: usize, x: &str, y: &str) -> StorageResult<Point> {
    Ok(Point::new(parse_coord(line, x)?, parse_coord(line, y)?))
}

fn parse_coord(line: usize, field: &str) -> StorageResult<i32> {
    field
        .parse()
        .map_err(|_| malformed(line, format!("invalid coordinate `{field}`")))
}

fn parse_color(line: usize, field: &str) -> StorageResult<Color> {
    let invalid = || malformed(line, format!("invalid color `{field}`"));

    let inner = field
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let channels = inner
        .split(',')
        .map(|channel| channel.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match channels[..] {
        [r, g, b] => Ok(Color::new(r, g, b)),
        _ => Err(invalid()),
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> StorageError {
    StorageError::MalformedRecord {
        line,
        reason: reason.into(),
    }
}
