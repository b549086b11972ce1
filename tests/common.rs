use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use ricochet_solver::{Colour, Direction};

pub const SEPARATOR: &str = "================\n";
pub const TEST_DIR: &str = "tests";
pub const EXTENSION: &str = "map";

#[allow(unused)]
pub fn parse_direction(ch: char) -> Result<Direction> {
    Ok(match ch {
        'N' => Direction::North,
        'E' => Direction::East,
        'S' => Direction::South,
        'W' => Direction::West,
        _ => bail!("Invalid direction: {ch:?}"),
    })
}

#[allow(unused)]
pub fn parse_colour(ch: char) -> Result<Colour> {
    Ok(match ch {
        'B' => Colour::Blue,
        'Y' => Colour::Yellow,
        'G' => Colour::Green,
        'R' => Colour::Red,
        'S' => Colour::Silver,
        _ => bail!("Invalid robot: {ch:?}"),
    })
}

/// Expectation files under `tests/<subdir>`, sorted by name.
fn cases(subdir: &str) -> Vec<(String, PathBuf)> {
    let dir = Path::new(TEST_DIR).join(subdir);
    let mut cases = std::fs::read_dir(&dir)
        .unwrap_or_else(|err| panic!("Cannot read {}: {err}", dir.display()))
        .map(|ent| ent.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
        .map(|path| (path.file_stem().unwrap().to_string_lossy().into_owned(), path))
        .collect::<Vec<_>>();
    cases.sort();
    cases
}

/// The first line where `got` and `expect` disagree, 1-based.
fn first_mismatch(got: &str, expect: &str) -> (usize, String, String) {
    let mut got_lines = got.lines();
    let mut expect_lines = expect.lines();
    for lineno in 1.. {
        match (got_lines.next(), expect_lines.next()) {
            (None, None) => break,
            (g, e) if g == e => continue,
            (g, e) => {
                let show =
                    |line: Option<&str>| line.map_or("<eof>".into(), |l| format!("{l:?}"));
                return (lineno, show(g), show(e));
            }
        }
    }
    // Only trailing newlines differ.
    (got.lines().count() + 1, format!("{got:?}"), format!("{expect:?}"))
}

/// Runs `f` on every expectation file of `subdir` and compares its output with
/// the whole file. With `UPDATE_EXPECT=1`, mismatching files are rewritten.
pub fn run_tests(subdir: &str, mut f: impl FnMut(&str) -> Result<String>) {
    let update = std::env::var("UPDATE_EXPECT").is_ok_and(|v| v == "1");
    let cases = cases(subdir);

    let mut failed = Vec::new();
    for (name, path) in &cases {
        eprint!("{subdir}/{name}: ");
        let expect = std::fs::read_to_string(path).unwrap();
        match f(&expect) {
            Ok(got) if got == expect => eprintln!("\x1B[32mOK\x1B[0m"),
            Ok(got) if update => {
                std::fs::write(path, got).unwrap();
                eprintln!("\x1B[33mUpdated\x1B[0m");
            }
            Ok(got) => {
                let (lineno, got, expect) = first_mismatch(&got, &expect);
                eprintln!("\x1B[31mFAILED\x1B[0m line {lineno}: got {got}, expected {expect}");
                failed.push(name);
            }
            Err(err) => {
                eprintln!("\x1B[31mFAILED\x1B[0m\n{err:?}");
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("{}/{} {subdir} tests failed: {failed:?}", failed.len(), cases.len());
        std::process::exit(1);
    }
}
