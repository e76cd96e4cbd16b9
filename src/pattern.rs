//! plain-text pattern files.
//!
//! one character per cell, one line per row. `#`, `O` and `*` are alive; `.`,
//! space, `-` and `_` are dead. lines starting with `!` are comments, except
//! `!origin X Y` which places the first cell of the following rows.

use std::{fs, path::Path};

use log::{debug, info};

use crate::{pos, PatternError, Pos, World};

const ORIGIN: &str = "!origin";

fn is_alive(c: char) -> Option<bool> {
    match c {
        '#' | 'O' | '*' => Some(true),
        '.' | ' ' | '-' | '_' => Some(false),
        _ => None,
    }
}

pub fn parse(text: &str) -> Result<Vec<Pos>, PatternError> {
    let mut result = vec![];
    let mut origin = pos!(0, 0);
    let mut row = 0i64;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        if let Some(rest) = line.strip_prefix(ORIGIN) {
            origin = parse_origin(rest).ok_or_else(|| PatternError::BadOrigin {
                line: line_number,
                text: line.to_string(),
            })?;
            row = 0;
            continue;
        }
        if line.starts_with('!') {
            continue;
        }

        for (column, c) in line.trim_end_matches('\r').chars().enumerate() {
            let alive = is_alive(c).ok_or(PatternError::UnknownCell {
                line: line_number,
                column: column + 1,
                ch: c,
            })?;
            if alive {
                let out_of_range = |_| PatternError::OutOfRange {
                    line: line_number,
                    column: column + 1,
                };
                let x = i32::try_from(origin.x as i64 + column as i64).map_err(out_of_range)?;
                let y = i32::try_from(origin.y as i64 + row).map_err(out_of_range)?;
                result.push(pos!(x, y));
            }
        }
        row += 1;
    }
    Ok(result)
}

fn parse_origin(rest: &str) -> Option<Pos> {
    let mut parts = rest.split_whitespace().map(str::parse::<i32>);
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    parts.next().is_none().then_some(pos!(x, y))
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Pos>, PatternError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let actives = parse(&content)?;
    debug!("loaded {} live cells from {}", actives.len(), path.display());
    Ok(actives)
}

/// writes `world` in the format read by [`parse`], origin included.
pub fn serialize(world: &World) -> String {
    let Some((min, max)) = world.bounds() else {
        return String::new();
    };
    let mut result = String::new();
    result.push_str(&format!("{ORIGIN} {} {}\n", min.x, min.y));
    for y in min.y..=max.y {
        let line: String = (min.x..=max.x)
            .map(|x| if world.is_alive(pos!(x, y)) { 'O' } else { '.' })
            .collect();
        result.push_str(line.trim_end_matches('.'));
        result.push('\n');
    }
    result
}

pub fn save(path: impl AsRef<Path>, world: &World) -> Result<(), PatternError> {
    let path = path.as_ref();
    fs::write(path, serialize(world))?;
    info!("saved {} live cells to {}", world.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_alive_characters() {
        let actives = parse("#.O\n  *\n").unwrap();
        assert_eq!(actives, vec![pos!(0, 0), pos!(2, 0), pos!(2, 1)]);
    }

    #[test]
    fn parse_skips_comments_and_honors_origin() {
        let text = "!Name: glider\n!origin -5 10\n.O\n..O\nOOO\n";
        let world: World = parse(text).unwrap().into_iter().collect();
        let expected: World = [pos!(-4, 10), pos!(-3, 11), pos!(-5, 12), pos!(-4, 12), pos!(-3, 12)]
            .into_iter()
            .collect();
        assert_eq!(world, expected);
    }

    #[test]
    fn parse_rejects_unknown_cells() {
        let error = parse("..\n.x\n").unwrap_err();
        assert!(matches!(
            error,
            PatternError::UnknownCell {
                line: 2,
                column: 2,
                ch: 'x'
            }
        ));
    }

    #[test]
    fn parse_rejects_bad_origin() {
        assert!(matches!(
            parse("!origin 1\nO\n"),
            Err(PatternError::BadOrigin { line: 1, .. })
        ));
    }

    #[test]
    fn parse_rejects_cells_past_range() {
        let text = format!("!origin {} 0\n.O\n", i32::MAX);
        assert!(matches!(
            parse(&text),
            Err(PatternError::OutOfRange { line: 2, column: 2 })
        ));
    }

    #[test]
    fn parse_accepts_crlf() {
        assert_eq!(parse("O\r\n.O\r\n").unwrap(), vec![pos!(0, 0), pos!(1, 1)]);
    }

    #[test]
    fn serialize_round_trips_negative_coordinates() {
        let world: World = [pos!(-7, -3), pos!(-5, -3), pos!(2, 4), pos!(-6, 0)]
            .into_iter()
            .collect();
        let text = serialize(&world);
        assert!(text.starts_with("!origin -7 -3\n"));
        let parsed: World = parse(&text).unwrap().into_iter().collect();
        assert_eq!(parsed, world);
    }

    #[test]
    fn serialize_empty_world_is_empty() {
        assert_eq!(serialize(&World::default()), "");
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn load_bundled_acorn() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("patterns/acorn.txt");
        let actives = load(path).unwrap();
        assert_eq!(actives.len(), 7);
        assert!(actives.contains(&pos!(6, 2)));
    }

    #[test]
    fn save_then_load_keeps_cells() {
        let path = std::env::temp_dir().join(format!("sparse-life-{}-save.txt", std::process::id()));
        let world: World = [pos!(-100, 3), pos!(-99, 4), pos!(7, -8)].into_iter().collect();
        save(&path, &world).unwrap();
        let loaded: World = load(&path).unwrap().into_iter().collect();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, world);
    }

    #[test]
    fn load_reports_missing_file() {
        let missing = std::env::temp_dir().join("sparse-life-no-such-pattern.txt");
        assert!(matches!(load(missing), Err(PatternError::Io(_))));
    }
}
