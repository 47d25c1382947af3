use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use circlepack_core::Packing;
use thiserror::Error;

/// Rendered size of the longer box side, in pixels.
const DISPLAY_SIZE: f64 = 600.0;

/// Errors that can occur when rendering an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot draw a {width} x {height} box")]
    DegenerateBox { width: f64, height: f64 },

    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write image")]
    Write(#[from] io::Error),
}

/// Writes `packing` as an SVG image.
///
/// The view box spans `[0, width] × [0, height]` with the y axis pointing
/// up, so the image matches the model's coordinates. Circles and the box
/// are drawn as unfilled outlines, and the title reads `Area = …`.
///
/// # Errors
///
/// Returns [`RenderError::DegenerateBox`] if either box side is not finite
/// and positive, or [`RenderError::Write`] if writing fails.
pub fn write_svg<W: Write>(packing: &Packing, out: &mut W) -> Result<(), RenderError> {
    let (w, h) = (packing.width, packing.height);
    if !(w.is_finite() && w > 0.0 && h.is_finite() && h > 0.0) {
        return Err(RenderError::DegenerateBox {
            width: w,
            height: h,
        });
    }

    let scale = DISPLAY_SIZE / w.max(h);
    let stroke = w.max(h) / 300.0;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{:.0}" height="{:.0}">"#,
        w * scale,
        h * scale,
    )?;
    writeln!(out, "  <title>Area = {:.3}</title>", packing.area())?;
    writeln!(
        out,
        r#"  <g transform="matrix(1 0 0 -1 0 {h})" fill="none" stroke="black" stroke-width="{stroke}">"#
    )?;
    writeln!(out, r#"    <rect x="0" y="0" width="{w}" height="{h}"/>"#)?;
    for c in &packing.circles {
        writeln!(
            out,
            r#"    <circle cx="{}" cy="{}" r="{}"/>"#,
            c.x, c.y, c.radius
        )?;
    }
    writeln!(out, "  </g>")?;
    writeln!(out, "</svg>")?;
    Ok(())
}

/// Writes `packing` as an SVG image at `path`.
///
/// # Errors
///
/// Returns [`RenderError::DegenerateBox`] for an undrawable box, or
/// [`RenderError::Io`] if the file cannot be created or written.
pub fn save_svg(packing: &Packing, path: &Path) -> Result<(), RenderError> {
    let io_error = |source| RenderError::Io {
        path: path.to_owned(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
    match write_svg(packing, &mut out) {
        Err(RenderError::Write(source)) => return Err(io_error(source)),
        other => other?,
    }
    out.flush().map_err(io_error)?;

    tracing::info!(path = %path.display(), "wrote packing image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use circlepack_core::PlacedCircle;
    use tempfile::TempDir;

    fn two_circles() -> Packing {
        Packing {
            circles: vec![
                PlacedCircle {
                    index: 0,
                    x: 13.0,
                    y: 13.0,
                    radius: 13.0,
                },
                PlacedCircle {
                    index: 1,
                    x: 38.9,
                    y: 13.0,
                    radius: 13.0,
                },
            ],
            width: 51.9,
            height: 26.0,
        }
    }

    fn render(packing: &Packing) -> String {
        let mut buf = Vec::new();
        write_svg(packing, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn draws_one_outline_per_circle_inside_the_box() {
        let text = render(&two_circles());

        assert!(text.contains(r#"viewBox="0 0 51.9 26""#));
        assert!(text.contains(r#"<rect x="0" y="0" width="51.9" height="26"/>"#));
        assert_eq!(text.matches("<circle ").count(), 2);
        assert!(text.contains(r#"<circle cx="38.9" cy="13" r="13"/>"#));
        assert!(text.contains(r#"fill="none""#));
    }

    #[test]
    fn flips_y_axis_and_titles_with_area() {
        let text = render(&two_circles());

        assert!(text.contains(r#"transform="matrix(1 0 0 -1 0 26)""#));
        assert!(text.contains(&format!("<title>Area = {:.3}</title>", 51.9 * 26.0)));
    }

    #[test]
    fn rejects_degenerate_box() {
        let mut packing = two_circles();
        packing.height = 0.0;

        let err = write_svg(&packing, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RenderError::DegenerateBox { .. }));
    }

    #[test]
    fn saves_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("packing.svg");

        save_svg(&two_circles(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("</svg>\n"));
    }

    #[test]
    fn reports_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("packing.svg");

        let err = save_svg(&two_circles(), &path).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
