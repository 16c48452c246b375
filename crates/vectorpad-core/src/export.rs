//! One-way XML export.
//!
//! The export mirrors the shape tree: a `<drawing>` root, one element per
//! node in z-order, groups nesting their children. There is no reader.

use crate::canvas::CanvasDocument;
use crate::shapes::{Color, Point, Shape};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Name used for a color in the export. Only the four palette colors have
/// names; everything else is `unknown`.
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::RED => "red",
        Color::GREEN => "green",
        Color::BLUE => "blue",
        Color::BLACK => "black",
        _ => "unknown",
    }
}

/// Render the document as an indented XML string.
pub fn to_xml(document: &CanvasDocument) -> String {
    let mut out = String::new();
    if document.is_empty() {
        out.push_str("<drawing />\n");
        return out;
    }

    out.push_str("<drawing>\n");
    for shape in document.shapes_ordered() {
        write_shape(&mut out, shape, 1);
    }
    out.push_str("</drawing>\n");
    out
}

fn write_shape(out: &mut String, shape: &Shape, depth: usize) {
    match shape {
        Shape::Line(line) => {
            open(out, "line", depth);
            write_point(out, "begin", line.start, depth + 1);
            write_point(out, "end", line.end, depth + 1);
            leaf(out, "color", color_name(line.color), depth + 1);
            close(out, "line", depth);
        }
        Shape::Rectangle(rect) => {
            let corner = if rect.corner.is_rounded() { "rounded" } else { "square" };
            open(out, "rectangle", depth);
            write_point(out, "upper-left", rect.start, depth + 1);
            write_point(out, "lower-right", rect.end, depth + 1);
            leaf(out, "color", color_name(rect.color), depth + 1);
            leaf(out, "corner", corner, depth + 1);
            close(out, "rectangle", depth);
        }
        Shape::Group(group) if group.children().is_empty() => {
            let _ = writeln!(out, "{}<group />", INDENT.repeat(depth));
        }
        Shape::Group(group) => {
            open(out, "group", depth);
            for child in group.children() {
                write_shape(out, child, depth + 1);
            }
            close(out, "group", depth);
        }
    }
}

fn write_point(out: &mut String, tag: &str, point: Point, depth: usize) {
    open(out, tag, depth);
    leaf(out, "x", point.x, depth + 1);
    leaf(out, "y", point.y, depth + 1);
    close(out, tag, depth);
}

fn open(out: &mut String, tag: &str, depth: usize) {
    let _ = writeln!(out, "{}<{tag}>", INDENT.repeat(depth));
}

fn close(out: &mut String, tag: &str, depth: usize) {
    let _ = writeln!(out, "{}</{tag}>", INDENT.repeat(depth));
}

fn leaf(out: &mut String, tag: &str, value: impl std::fmt::Display, depth: usize) {
    let _ = writeln!(out, "{}<{tag}>{value}</{tag}>", INDENT.repeat(depth));
}
