//! Plain-text pose lists.
//!
//! One pose per line as `x,y,theta` (commas or whitespace). Blank lines and
//! `#` comments are skipped, and a single non-numeric header line before
//! the first pose is tolerated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::Pose2D;
use crate::error::PathFileError;

/// Load a pose list from a file.
pub fn load_path(path: &Path) -> Result<Vec<Pose2D>, PathFileError> {
    let file = File::open(path)?;
    read_path(BufReader::new(file))
}

/// Read a pose list from any buffered reader.
pub fn read_path<R: BufRead>(reader: R) -> Result<Vec<Pose2D>, PathFileError> {
    let mut poses = Vec::new();
    let mut header_allowed = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        }
        .trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        let parsed: Result<Vec<f64>, _> = fields.iter().map(|f| f.parse::<f64>()).collect();
        match parsed {
            Ok(values) if values.len() == 3 => {
                poses.push(Pose2D::new(values[0], values[1], values[2]));
            }
            Ok(values) => {
                return Err(PathFileError::Parse {
                    line: idx + 1,
                    message: format!("expected 3 values (x, y, theta), found {}", values.len()),
                });
            }
            Err(_) if header_allowed && poses.is_empty() => {}
            Err(e) => {
                return Err(PathFileError::Parse {
                    line: idx + 1,
                    message: format!("invalid number in '{}': {}", content, e),
                });
            }
        }
        header_allowed = false;
    }

    if poses.is_empty() {
        return Err(PathFileError::Empty);
    }
    Ok(poses)
}

/// Write a pose list in the format accepted by [`load_path`].
pub fn write_path<W: std::io::Write>(writer: &mut W, poses: &[Pose2D]) -> std::io::Result<()> {
    writeln!(writer, "x,y,theta")?;
    for pose in poses {
        writeln!(writer, "{},{},{}", pose.x, pose.y, pose.theta)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_comma_and_whitespace() {
        let data = "0,0,0\n1.5 2.5 0.1\n  3,\t4, -0.2  \n";
        let poses = read_path(Cursor::new(data)).unwrap();
        assert_eq!(
            poses,
            vec![
                Pose2D::new(0.0, 0.0, 0.0),
                Pose2D::new(1.5, 2.5, 0.1),
                Pose2D::new(3.0, 4.0, -0.2),
            ]
        );
    }

    #[test]
    fn test_header_comments_and_blanks() {
        let data = "# planner output\nx,y,theta\n\n0,0,0 # start\n1,0,0\n";
        let poses = read_path(Cursor::new(data)).unwrap();
        assert_eq!(poses.len(), 2);
    }

    #[test]
    fn test_second_header_rejected() {
        let data = "x,y,theta\nx,y,theta\n0,0,0\n";
        assert!(matches!(
            read_path(Cursor::new(data)),
            Err(PathFileError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_text_after_poses_rejected() {
        let data = "0,0,0\nend\n";
        assert!(matches!(
            read_path(Cursor::new(data)),
            Err(PathFileError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_wrong_arity() {
        let data = "0,0\n";
        assert!(matches!(
            read_path(Cursor::new(data)),
            Err(PathFileError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            read_path(Cursor::new("# nothing here\n\n")),
            Err(PathFileError::Empty)
        ));
        assert!(matches!(
            read_path(Cursor::new("x,y,theta\n")),
            Err(PathFileError::Empty)
        ));
    }

    #[test]
    fn test_write_then_load() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("path.csv");
        let poses = vec![Pose2D::new(0.0, 0.0, 0.0), Pose2D::new(1.25, -2.0, 3.0)];

        let mut out = File::create(&file).unwrap();
        write_path(&mut out, &poses).unwrap();
        drop(out);

        assert_eq!(load_path(&file).unwrap(), poses);
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            load_path(&temp.path().join("nope.csv")),
            Err(PathFileError::Io(_))
        ));
    }
}
