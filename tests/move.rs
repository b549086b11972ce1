use std::fmt::Write;

use anyhow::{bail, ensure, Context};
use common::*;
use ricochet_solver::Game;

mod common;

fn main() {
    run_tests("move", |content| {
        let input = content
            .split_once(SEPARATOR)
            .map_or(content, |(input, _)| input)
            .trim();
        let (actions, map) = input.split_once('\n').context("No actions")?;
        ensure!(!actions.trim().is_empty(), "No actions");

        let game = map.parse::<Game>().context("Invalid map")?;
        let mut state = game.state();
        let mut got = format!("{input}\n\n{SEPARATOR}");
        for (action, i) in actions.split_whitespace().zip(1..) {
            (|| {
                let mut chars = action.chars();
                let (Some(robot), Some(dir), None) = (chars.next(), chars.next(), chars.next())
                else {
                    bail!("Invalid action: {action:?}");
                };
                let (colour, dir) = (parse_colour(robot)?, parse_direction(dir)?);
                state.go(colour, dir).context("Move failed")
            })()
            .with_context(|| format!("Failed to perform step {i} {action}"))?;
            write!(got, "{state}{SEPARATOR}").unwrap();
        }

        Ok(got)
    });
}
