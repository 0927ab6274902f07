//! Loading `(x, y)` sample points
//!
//! Point files hold one `x,y` pair per line. Surrounding whitespace is ignored, as are blank lines
//! and lines starting with `#`.
//!
//! ```text
//! # x, y
//! 0.5, 1.93
//! 1.0, 2.98
//! ```
//!
//! [`PointSource`] lets the solver take either a path to such a file or points already in memory.
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Parses `x,y` pairs from the contents of a point file.
///
/// # Errors
/// Returns [`Error::Parse`] with the 1-based line number for the first line that is not two
/// comma-separated numbers.
///
/// # Example
/// ```rust
/// # use gaussfit::points::parse_points;
/// let points: Vec<(f64, f64)> = parse_points("# comment\n1, 2\n\n3.5,-4\n").unwrap();
/// assert_eq!(points, vec![(1.0, 2.0), (3.5, -4.0)]);
/// ```
pub fn parse_points<T: Value>(text: &str) -> Result<Vec<(T, T)>> {
    let mut points = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let point = parse_line(line).ok_or_else(|| Error::Parse {
            line: index + 1,
            content: line.to_string(),
        })?;
        points.push((T::try_cast(point.0)?, T::try_cast(point.1)?));
    }

    Ok(points)
}

fn parse_line(line: &str) -> Option<(f64, f64)> {
    let (x, y) = line.split_once(',')?;
    let x = x.trim().parse().ok()?;
    let y = y.trim().parse().ok()?;
    Some((x, y))
}

/// Reads and parses a point file.
///
/// # Errors
/// - [`Error::Io`] if the file cannot be read.
/// - [`Error::Parse`] if a line is malformed.
pub fn read_points<T: Value>(path: impl AsRef<Path>) -> Result<Vec<(T, T)>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let points = parse_points(&contents)?;
    log::debug!("Read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Something the solver can take its points from: a file path or an in-memory point set.
pub trait PointSource<T: Value = f64> {
    /// Loads the points.
    ///
    /// # Errors
    /// Returns an error if the points cannot be read or parsed.
    fn points(&self) -> Result<Cow<'_, [(T, T)]>>;
}

impl<T: Value> PointSource<T> for [(T, T)] {
    fn points(&self) -> Result<Cow<'_, [(T, T)]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: Value> PointSource<T> for Vec<(T, T)> {
    fn points(&self) -> Result<Cow<'_, [(T, T)]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: Value, const N: usize> PointSource<T> for [(T, T); N] {
    fn points(&self) -> Result<Cow<'_, [(T, T)]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: Value> PointSource<T> for Path {
    fn points(&self) -> Result<Cow<'_, [(T, T)]>> {
        read_points(self).map(Cow::Owned)
    }
}

impl<T: Value> PointSource<T> for PathBuf {
    fn points(&self) -> Result<Cow<'_, [(T, T)]>> {
        read_points(self).map(Cow::Owned)
    }
}

impl<T: Value> PointSource<T> for str {
    fn points(&self) -> Result<Cow<'_, [(T, T)]>> {
        read_points(self).map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let text = "  1.0 , 2.5  \n# header\n\n-3,4e-1\n";
        let points: Vec<(f64, f64)> = parse_points(text).unwrap();
        assert_eq!(points, vec![(1.0, 2.5), (-3.0, 0.4)]);

        let empty: Vec<(f64, f64)> = parse_points("").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_error_line_number() {
        let text = "1,2\n\n3;4\n";
        match parse_points::<f64>(text) {
            Err(Error::Parse { line, content }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "3;4");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }

        assert!(matches!(
            parse_points::<f64>("1,two"),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_points::<f64>("1"),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("definitely/not/a/real/points.txt");
        match read_points::<f64>(path) {
            Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an io error, got {other:?}"),
        }
    }

    #[test]
    fn test_sources() {
        let data = vec![(0.0, 1.0), (1.0, 3.0)];
        assert_eq!(*data.points().unwrap(), *data.as_slice());
        assert_eq!(PointSource::<f64>::points(&[(2.0, 2.0)]).unwrap().len(), 1);

        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/quadratic.txt");
        let from_str: Cow<'_, [(f64, f64)]> = path.points().unwrap();
        let from_path: Cow<'_, [(f64, f64)]> = Path::new(path).points().unwrap();
        assert!(!from_str.is_empty());
        assert_eq!(from_str, from_path);
    }
}
